// src/template.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};

/// JSON deck template: pw.x namelists plus the deck-level options.
///
/// ```json
/// {
///   "control":   { "calculation": "scf", "pseudo_dir": "./pseudo" },
///   "system":    { "ecutwfc": 40.0, "occupations": "smearing" },
///   "electrons": { "conv_thr": 1e-8 },
///   "pseudopotentials": { "Si": "Si.pbe-n-rrkjus_psl.1.0.0.UPF" },
///   "kspacing": 0.2,
///   "crystal_coordinates": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckTemplate {
    #[serde(default)]
    pub pseudopotentials: BTreeMap<String, String>,

    /// Monkhorst-Pack spacing in 1/Angstrom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kspacing: Option<f64>,

    /// Explicit grid, used when no spacing is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpts: Option<[u32; 3]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub koffset: Option<[u32; 3]>,

    #[serde(default)]
    pub crystal_coordinates: bool,

    /// Namelist sections in file order (`control`, `system`, ...)
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl DeckTemplate {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let raw: Self = serde_json::from_reader(BufReader::new(file))?;
        let template = raw.normalized()?;
        log::info!(
            "Template loaded from {:?} ({} sections, {} pseudopotentials)",
            path,
            template.sections.len(),
            template.pseudopotentials.len()
        );
        Ok(template)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str::<Self>(text)?.normalized()
    }

    /// Lower-cases section and key names and rejects non-object sections.
    fn normalized(self) -> Result<Self> {
        let mut sections = Map::new();
        for (name, value) in self.sections {
            match value {
                Value::Object(keys) => {
                    let keys: Map<String, Value> =
                        keys.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect();
                    sections.insert(name.to_lowercase(), Value::Object(keys));
                }
                Value::Null => {}
                other => {
                    return Err(Error::Template(format!(
                        "'{}' must be a namelist object, found {}",
                        name, other
                    )))
                }
            }
        }

        if let Some(spacing) = self.kspacing {
            if spacing <= 0.0 || !spacing.is_finite() {
                return Err(Error::Template(format!(
                    "kspacing must be positive, got {}",
                    spacing
                )));
            }
        }

        Ok(Self { sections, ..self })
    }

    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.sections
            .get(&name.to_lowercase())
            .and_then(Value::as_object)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.section(section)
            .and_then(|s| s.get(&key.to_lowercase()))
    }

    /// Sets `section.key`, creating the section when missing.
    /// Names are case-insensitive; an existing key keeps its position.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<Value>) {
        let entry = self
            .sections
            .entry(section.to_lowercase())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(key.to_lowercase(), value.into());
        }
    }

    /// Copy with `prefix`, `title` and `outdir` derived from the system name.
    pub fn with_system_name(&self, name: &str) -> Self {
        let mut t = self.clone();
        t.set("control", "prefix", name);
        t.set("control", "title", name);
        t.set("control", "outdir", format!("./{}", name));
        t
    }

    /// `control.prefix`, falling back to pw.x's default
    pub fn prefix(&self) -> String {
        self.get("control", "prefix")
            .and_then(Value::as_str)
            .unwrap_or("pwscf")
            .to_string()
    }

    /// `control.outdir`, falling back to pw.x's default
    pub fn outdir(&self) -> String {
        self.get("control", "outdir")
            .and_then(Value::as_str)
            .unwrap_or("./")
            .to_string()
    }
}
