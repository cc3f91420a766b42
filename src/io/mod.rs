// src/io/mod.rs
pub mod namelist;
pub mod poscar;
pub mod pwi;
pub mod qe;

use std::path::Path;

use crate::error::Result;
use crate::model::Structure;

/// Whether the extension names a Quantum ESPRESSO input or output file.
pub fn is_qe_file(path: impl AsRef<Path>) -> bool {
    let p = path.as_ref().to_string_lossy().to_lowercase();
    [".in", ".pwi", ".out", ".pwo", ".log"]
        .iter()
        .any(|ext| p.ends_with(ext))
}

/// QE input/output by extension, POSCAR otherwise.
pub fn load_structure(path: impl AsRef<Path>) -> Result<Structure> {
    let path = path.as_ref();

    if is_qe_file(path) {
        log::debug!("Reading {:?} as Quantum ESPRESSO", path);
        qe::parse(path)
    } else {
        // Fallback to POSCAR for unknown or explicit POSCAR/CONTCAR
        log::debug!("Reading {:?} as POSCAR", path);
        poscar::parse(path)
    }
}
