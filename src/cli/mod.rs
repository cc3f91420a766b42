// src/cli/mod.rs
//
// One `Args` struct per tool; the binaries in src/bin/ only parse and
// hand over to `execute`.

pub mod compare;
pub mod convert;
pub mod gen_bands;
pub mod gen_dos;
pub mod gen_pdos;
pub mod gen_strain;
pub mod poscar2pwi;
pub mod pwo2poscar;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::utils::logger;

/// Flags every tool accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Settings file to use instead of the per-user one
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    pub fn settings(&self) -> Settings {
        let (settings, msg) = Settings::load_from(self.config.as_deref());
        if msg.starts_with("Error") || msg.starts_with("Could") {
            log::warn!("{}", msg);
        } else {
            log::debug!("{}", msg);
        }
        settings
    }
}

pub trait Tool {
    fn common(&self) -> &CommonArgs;

    /// Does the work and returns the text to print on success.
    fn run(&self, settings: &Settings) -> Result<String>;

    /// Extra line printed on stderr before the error itself.
    fn failure_hint(&self, _err: &Error) -> Option<&'static str> {
        None
    }
}

pub fn execute<T: Tool>(tool: T) -> ExitCode {
    let level = logger::level_from_verbosity(tool.common().verbose);
    if logger::init(level).is_err() {
        eprintln!("Logger already initialised");
    }

    let settings = tool.common().settings();
    match tool.run(&settings) {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            if let Some(hint) = tool.failure_hint(&e) {
                eprintln!("{}", hint);
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Reads a structure and logs its summary.
pub(crate) fn read_structure(path: &std::path::Path) -> Result<crate::model::Structure> {
    let structure = crate::io::load_structure(path)?;
    log::info!(
        "\n{}",
        crate::utils::report::structure_summary(&structure, &path.display().to_string())
    );
    Ok(structure)
}
