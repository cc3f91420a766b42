// src/io/namelist.rs
//
// Fortran namelist groups for the post-processing codes (bands.x, dos.x,
// projwfc.x) and the value formatting shared with the pw.x writer.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Namelist {
    group: String,
    entries: Vec<(String, Value)>,
}

impl Namelist {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            entries: Vec::new(),
        }
    }

    /// Replaces the value in place when the key (case-insensitive) exists.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// `&group` / `    key = value` / `/`, group and keys lower-cased.
    pub fn render(&self) -> String {
        let mut out = format!("&{}\n", self.group.to_lowercase());
        for (key, value) in &self.entries {
            if let Some(text) = fortran_value(value) {
                out.push_str(&format!("    {} = {}\n", key.to_lowercase(), text));
            }
        }
        out.push_str("/\n");
        out
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// Scalar JSON value as a Fortran literal. `None` for null and for
/// compound values, which have no scalar form.
pub fn fortran_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        Value::Bool(true) => Some(".true.".to_string()),
        Value::Bool(false) => Some(".false.".to_string()),
        Value::String(s) => Some(format!("'{}'", s.replace('\'', "''"))),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => format!("{:?}", f),
            _ => n.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_dos_group() {
        let nml = Namelist::new("DOS")
            .set("prefix", "si")
            .set("outdir", "./si")
            .set("Emin", -20)
            .set("Emax", 20)
            .set("DeltaE", 0.1)
            .set("fildos", "si.dos");

        let expected = "\
&dos
    prefix = 'si'
    outdir = './si'
    emin = -20
    emax = 20
    deltae = 0.1
    fildos = 'si.dos'
/
";
        assert_eq!(nml.render(), expected);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let nml = Namelist::new("bands")
            .set("prefix", "a")
            .set("filband", "x")
            .set("PREFIX", "b");
        assert_eq!(nml.get("prefix"), Some(&json!("b")));
        assert!(nml.render().starts_with("&bands\n    prefix = 'b'\n    filband"));
    }

    #[test]
    fn test_fortran_literals() {
        assert_eq!(fortran_value(&json!(true)).as_deref(), Some(".true."));
        assert_eq!(fortran_value(&json!(false)).as_deref(), Some(".false."));
        assert_eq!(fortran_value(&json!(1.0)).as_deref(), Some("1.0"));
        assert_eq!(fortran_value(&json!(1e-10)).as_deref(), Some("1e-10"));
        assert_eq!(fortran_value(&json!("it's")).as_deref(), Some("'it''s'"));
        assert_eq!(fortran_value(&Value::Null), None);
    }
}
