// src/physics/mod.rs
pub mod conversion;
pub mod kpath;
pub mod strain;

pub use conversion::{Backend, CellType};
pub use kpath::{calculate_kpath, calculate_kpath_with, BandPath, Convention};
pub use strain::{apply_uniaxial_strain, Axis};
