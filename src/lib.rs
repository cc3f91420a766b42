// src/lib.rs
//
// Crystal structure conversion (POSCAR, Quantum ESPRESSO, primitive and
// conventional cells) and templated Quantum ESPRESSO input decks.

pub mod cli;
pub mod compare;
pub mod config;
pub mod decks;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod template;
pub mod utils;

pub use error::{Error, Result};
pub use model::{Atom, Structure};
