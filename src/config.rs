// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::model::symmetry::SYMPREC;

/// Tunables shared by the tools; flags override them per run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
  /// Symmetry tolerance (Angstrom)
  pub symprec: f64,

  /// k-points between consecutive band path vertices
  pub points_per_segment: usize,

  // dos.x energy window (eV)
  pub dos_emin: f64,
  pub dos_emax: f64,
  pub dos_delta_e: f64,

  pub aflow_binary: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      symprec: SYMPREC,
      points_per_segment: 10,
      dos_emin: -20.0,
      dos_emax: 20.0,
      dos_delta_e: 0.1,
      aflow_binary: "aflow".to_string(),
    }
  }
}

impl Settings {
  /// Loads settings from the standard OS location (e.g. ~/.config/crysconv/settings.json)
  pub fn load() -> (Self, String) {
    Self::load_from(None)
  }

  /// Like `load`, reading `path` instead of the standard location when given.
  pub fn load_from(path: Option<&Path>) -> (Self, String) {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Self::get_path);
    if path.exists() {
      match File::open(&path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Settings loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing settings: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening settings: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No settings found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves settings to `path`, or to the standard OS location
  pub fn save(&self, path: Option<&Path>) -> String {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Self::get_path);
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(&path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Settings saved to {:?}", path),
          Err(e) => format!("Failed to save settings: {}", e),
        }
      }
      Err(e) => format!("Could not create settings file: {}", e),
    }
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "crysconv", "crysconv") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
