// src/physics/conversion.rs

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::structure::Structure;
use crate::model::symmetry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
  Primitive,
  Conventional,
}

impl CellType {
  /// aflow flag producing this cell
  pub fn aflow_flag(self) -> &'static str {
    match self {
      CellType::Primitive => "--prim",
      CellType::Conventional => "--std_conv",
    }
  }
}

impl FromStr for CellType {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "p" | "primitive" => Ok(CellType::Primitive),
      "c" | "conventional" => Ok(CellType::Conventional),
      other => Err(format!("unknown cell type '{}' (expected p or c)", other)),
    }
  }
}

impl fmt::Display for CellType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CellType::Primitive => f.write_str("primitive"),
      CellType::Conventional => f.write_str("conventional"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
  #[default]
  Moyo,
  Aflow,
}

impl FromStr for Backend {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "moyo" => Ok(Backend::Moyo),
      "aflow" => Ok(Backend::Aflow),
      other => Err(format!("unknown backend '{}' (expected moyo or aflow)", other)),
    }
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Backend::Moyo => f.write_str("moyo"),
      Backend::Aflow => f.write_str("aflow"),
    }
  }
}

pub fn convert_with_moyo(structure: &Structure, cell_type: CellType, symprec: f64) -> Result<Structure> {
  let out = match cell_type {
    CellType::Primitive => symmetry::to_primitive_cell(structure, symprec)?,
    CellType::Conventional => symmetry::to_conventional_cell(structure, symprec)?,
  };
  log::info!(
    "{} cell: {} -> {} atoms, volume {:.4} -> {:.4}",
    cell_type,
    structure.atoms.len(),
    out.atoms.len(),
    structure.volume(),
    out.volume()
  );
  Ok(out)
}

/// Pipes `poscar` into `program --prim|--std_conv` and returns its stdout.
pub fn convert_with_aflow(poscar: &str, cell_type: CellType, program: &str) -> Result<String> {
  let external = |message: String| Error::External {
    program: program.to_string(),
    message,
  };

  log::debug!("Running {} {}", program, cell_type.aflow_flag());
  let mut child = Command::new(program)
    .arg(cell_type.aflow_flag())
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .map_err(|e| external(e.to_string()))?;

  if let Some(mut stdin) = child.stdin.take() {
    stdin
      .write_all(poscar.as_bytes())
      .map_err(|e| external(e.to_string()))?;
  }

  let output = child.wait_with_output().map_err(|e| external(e.to_string()))?;
  if !output.status.success() {
    return Err(external(format!(
      "{} ({})",
      String::from_utf8_lossy(&output.stderr).trim(),
      output.status
    )));
  }

  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rocksalt_conventional() -> Structure {
    let a = 5.64;
    let lattice = [[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]];
    let mut elements = Vec::new();
    let mut fracs = Vec::new();
    for f in [[0.0, 0.0, 0.0], [0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]] {
      elements.push("Na".to_string());
      fracs.push(f);
      elements.push("Cl".to_string());
      fracs.push([f[0] + 0.5, f[1], f[2]]);
    }
    Structure::from_fractional("NaCl", lattice, &elements, &fracs)
  }

  #[test]
  fn test_cell_type_values() {
    assert_eq!("p".parse::<CellType>(), Ok(CellType::Primitive));
    assert_eq!("Conventional".parse::<CellType>(), Ok(CellType::Conventional));
    assert!("x".parse::<CellType>().is_err());
    assert_eq!(CellType::Primitive.aflow_flag(), "--prim");
    assert_eq!(CellType::Conventional.aflow_flag(), "--std_conv");
  }

  #[test]
  fn test_moyo_primitive_and_back() {
    let conv = rocksalt_conventional();
    let prim = convert_with_moyo(&conv, CellType::Primitive, 1e-4).unwrap();
    assert_eq!(prim.atoms.len(), 2);
    assert!((prim.volume() - conv.volume() / 4.0).abs() < 1e-6);

    let back = convert_with_moyo(&prim, CellType::Conventional, 1e-4).unwrap();
    assert_eq!(back.atoms.len(), 8);
    assert!((back.volume() - conv.volume()).abs() < 1e-6);
    let species: Vec<String> = back.species();
    assert!(species.contains(&"Na".to_string()) && species.contains(&"Cl".to_string()));
  }

  #[test]
  fn test_missing_aflow_binary() {
    let err = convert_with_aflow("x\n", CellType::Primitive, "definitely-not-aflow-binary").unwrap_err();
    assert!(matches!(err, Error::External { .. }));
  }

  /// Writes an executable shell script standing in for aflow.
  #[cfg(unix)]
  fn fake_aflow(dir: &std::path::Path, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("aflow");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
  }

  #[cfg(unix)]
  #[test]
  fn test_aflow_output_returned_verbatim() {
    let dir = tempfile::TempDir::new().unwrap();
    let program = fake_aflow(dir.path(), "echo \"flag $1\"\ncat");
    let poscar = "NaCl\n1.0\n  5.64 0 0\n";

    let out = convert_with_aflow(poscar, CellType::Conventional, &program).unwrap();
    assert_eq!(out, format!("flag --std_conv\n{}", poscar));
  }

  #[cfg(unix)]
  #[test]
  fn test_aflow_failure_status() {
    let dir = tempfile::TempDir::new().unwrap();
    let program = fake_aflow(dir.path(), "cat > /dev/null\necho 'bad POSCAR' >&2\nexit 3");

    match convert_with_aflow("x\n", CellType::Primitive, &program) {
      Err(Error::External { program: p, message }) => {
        assert_eq!(p, program);
        assert!(message.contains("bad POSCAR"));
      }
      other => panic!("expected an external failure, got {:?}", other),
    }
  }
}
