// src/utils/report.rs

use std::path::Path;

use crate::model::structure::Structure;
use crate::utils::linalg;

const RULE: &str = "-----------------------------------------------------------";

/// Dashed status block, one aligned `label : path` line per file.
///
/// ```text
/// -----------------------------------------------------------
/// Quantum Espresso SCF input file  : si.scf.in
/// DOS data collection file         : si.dos
/// -----------------------------------------------------------
/// ```
pub fn banner(lines: &[(&str, &Path)]) -> String {
  let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
  let mut out = String::new();
  out.push_str(RULE);
  out.push('\n');
  for (label, path) in lines {
    out.push_str(&format!("{:<width$} : {}\n", label, path.display(), width = width));
  }
  out.push_str(RULE);
  out.push('\n');
  out
}

/// One-line message framed like `banner`.
pub fn message(text: &str) -> String {
  format!("{}\n{}\n{}\n", RULE, text, RULE)
}

/// Table of the cell and the first atoms, used for `info!` logging.
pub fn structure_summary(structure: &Structure, filename: &str) -> String {
  let [a, b, c, alpha, beta, gamma] = linalg::lattice_parameters(&structure.lattice);

  let mut out = String::new();
  out.push_str(&format!("File: {}\n", filename));
  out.push_str(&format!("Formula: {}\n", structure.formula()));
  out.push_str(&format!(
    "Cell: a={:.4} b={:.4} c={:.4}  alpha={:.2} beta={:.2} gamma={:.2}  V={:.4}\n",
    a,
    b,
    c,
    alpha.to_degrees(),
    beta.to_degrees(),
    gamma.to_degrees(),
    structure.volume()
  ));
  out.push_str(RULE);
  out.push('\n');
  out.push_str(&format!(
    "{:<8} {:<8} {:<10} {:<10} {:<10}\n",
    "Index", "Element", "X", "Y", "Z"
  ));
  out.push_str(RULE);
  out.push('\n');

  for (i, atom) in structure.atoms.iter().take(20).enumerate() {
    out.push_str(&format!(
      "{:<8} {:<8} {:<10.4} {:<10.4} {:<10.4}\n",
      i, atom.element, atom.position[0], atom.position[1], atom.position[2]
    ));
  }

  if structure.atoms.len() > 20 {
    out.push_str(&format!("... and {} more atoms.\n", structure.atoms.len() - 20));
  }

  out
}
