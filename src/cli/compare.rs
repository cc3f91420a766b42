// src/cli/compare.rs

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::compare;
use crate::config::Settings;
use crate::error::Result;
use crate::io::poscar::{self, RawPoscar};

/// Compare two POSCAR files field by field
#[derive(Parser, Debug)]
#[command(name = "compare-poscar", version, about, long_about = None)]
pub struct Args {
    /// Path to the first POSCAR file (both files are echoed to stderr with -v)
    #[arg(long)]
    pub poscar1: PathBuf,

    /// Path to the second POSCAR file
    #[arg(long)]
    pub poscar2: PathBuf,

    /// Largest difference still counted as equal (0 = exact)
    #[arg(long, default_value_t = 0.0)]
    pub tolerance: f64,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn read(path: &Path) -> Result<RawPoscar> {
    let text = fs::read_to_string(path)?;
    log::info!("Contents of the POSCAR file {}:\n{}", path.display(), text.trim_end());
    poscar::read_raw(&text)
}

impl Tool for Args {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(&self, _settings: &Settings) -> Result<String> {
        let first = read(&self.poscar1)?;
        let second = read(&self.poscar2)?;
        Ok(compare::compare(&first, &second, self.tolerance).report())
    }
}
