// src/cli/convert.rs

use std::path::PathBuf;

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::io::{self, poscar};
use crate::model::symmetry;
use crate::physics::conversion::{self, Backend, CellType};
use crate::utils::report;

/// Convert a crystal structure to its primitive or conventional cell
#[derive(Parser, Debug)]
#[command(name = "convert-crystal", version, about, long_about = None)]
pub struct Args {
    /// Input structure (POSCAR, or QE input/output by extension)
    #[arg(short, long = "input-file", visible_alias = "input_file")]
    pub input_file: PathBuf,

    /// Target cell: p (primitive) or c (conventional)
    #[arg(short = 't', long = "cell-type", visible_alias = "cell_type")]
    pub cell_type: CellType,

    /// Output POSCAR
    #[arg(short, long = "output-file", visible_alias = "output_file")]
    pub output_file: PathBuf,

    /// Symmetry engine: moyo (built in) or aflow (external program)
    #[arg(long, default_value = "moyo")]
    pub backend: Backend,

    /// Override symmetry tolerance (Angstrom)
    #[arg(long)]
    pub symprec: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Tool for Args {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(&self, settings: &Settings) -> Result<String> {
        let structure = super::read_structure(&self.input_file)?;

        match self.backend {
            Backend::Moyo => {
                let symprec = self.symprec.unwrap_or(settings.symprec);
                let info = symmetry::analyze(&structure, symprec)?;
                log::info!(
                    "Space group #{} ({}), {} system",
                    info.number,
                    info.symbol,
                    info.system
                );
                let cell = conversion::convert_with_moyo(&structure, self.cell_type, symprec)?;
                poscar::write(&self.output_file, &cell)?;
            }
            Backend::Aflow => {
                // POSCAR inputs go to aflow as written
                let text = if io::is_qe_file(&self.input_file) {
                    poscar::to_string(&structure)?
                } else {
                    std::fs::read_to_string(&self.input_file)?
                };
                let converted =
                    conversion::convert_with_aflow(&text, self.cell_type, &settings.aflow_binary)?;
                std::fs::write(&self.output_file, converted)?;
            }
        }

        Ok(report::message(&format!(
            "Successfully converted {} cell using {} and saved to {}",
            self.cell_type,
            self.backend,
            self.output_file.display()
        )))
    }

    fn failure_hint(&self, err: &Error) -> Option<&'static str> {
        match err {
            Error::External { .. } => Some("An error occurred while converting the cell."),
            _ => None,
        }
    }
}
