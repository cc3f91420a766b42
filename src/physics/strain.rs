// src/physics/strain.rs

use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix3;

use crate::error::{Error, Result};
use crate::model::structure::Structure;
use crate::utils::linalg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
  X,
  Y,
  Z,
}

impl Axis {
  fn index(self) -> usize {
    match self {
      Axis::X => 0,
      Axis::Y => 1,
      Axis::Z => 2,
    }
  }
}

impl FromStr for Axis {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "x" => Ok(Axis::X),
      "y" => Ok(Axis::Y),
      "z" => Ok(Axis::Z),
      other => Err(format!("unknown strain direction '{}' (expected x, y or z)", other)),
    }
  }
}

impl fmt::Display for Axis {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Axis::X => "x",
      Axis::Y => "y",
      Axis::Z => "z",
    };
    f.write_str(s)
  }
}

/// Identity with `1 + percent/100` on the diagonal entry of `axis`.
pub fn strain_matrix(axis: Axis, percent: f64) -> Matrix3<f64> {
  let mut m = Matrix3::identity();
  m[(axis.index(), axis.index())] = 1.0 + percent / 100.0;
  m
}

/// Scales the Cartesian `axis` component of every lattice vector.
/// Atoms keep their fractional coordinates.
pub fn apply_uniaxial_strain(structure: &Structure, axis: Axis, percent: f64) -> Result<Structure> {
  if !percent.is_finite() || percent <= -100.0 {
    return Err(Error::Geometry(format!(
      "strain of {}% along {} collapses the cell",
      percent, axis
    )));
  }

  let fracs = structure.fractional_positions()?;

  // Row vectors: new = old x strain
  let strained = linalg::rows_to_matrix(&structure.lattice) * strain_matrix(axis, percent);
  let lattice = linalg::matrix_to_rows(&strained);

  log::debug!(
    "Strain {}% along {}: volume {:.4} -> {:.4}",
    percent,
    axis,
    structure.volume(),
    linalg::determinant(&lattice).abs()
  );

  let elements: Vec<String> = structure.atoms.iter().map(|a| a.element.clone()).collect();
  Ok(Structure::from_fractional(
    structure.title.clone(),
    lattice,
    &elements,
    &fracs,
  ))
}
