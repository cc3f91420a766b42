// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

/// Lattice vectors as rows: [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
pub type Rows3 = [[f64; 3]; 3];

const SINGULAR_DET: f64 = 1e-10;

/// Row-major lattice to a matrix whose rows are the lattice vectors.
pub fn rows_to_matrix(lattice: &Rows3) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    lattice[0][0],
    lattice[0][1],
    lattice[0][2],
    lattice[1][0],
    lattice[1][1],
    lattice[1][2],
    lattice[2][0],
    lattice[2][1],
    lattice[2][2],
  ])
}

pub fn matrix_to_rows(m: &Matrix3<f64>) -> Rows3 {
  [
    [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
    [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
    [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
  ]
}

/// Matrix whose columns are basis vectors back to row-major lattice.
pub fn columns_to_rows(m: &Matrix3<f64>) -> Rows3 {
  matrix_to_rows(&m.transpose())
}

pub fn determinant(lattice: &Rows3) -> f64 {
  rows_to_matrix(lattice).determinant()
}

pub fn is_singular(lattice: &Rows3) -> bool {
  determinant(lattice).abs() < SINGULAR_DET
}

/// Convert fractional coordinates to Cartesian using lattice matrix
///
/// # Formula
/// ```text
/// Cartesian = Lattice^T × Fractional
/// ```
pub fn frac_to_cart(frac: [f64; 3], lattice: &Rows3) -> [f64; 3] {
  let cart_vec = rows_to_matrix(lattice).transpose() * Vector3::from(frac);
  [cart_vec.x, cart_vec.y, cart_vec.z]
}

/// Convert Cartesian coordinates to fractional using lattice matrix
///
/// Returns None if the lattice is singular.
///
/// # Formula
/// ```text
/// Fractional = (Lattice^T)^-1 × Cartesian
/// ```
pub fn cart_to_frac(cart: [f64; 3], lattice: &Rows3) -> Option<[f64; 3]> {
  if is_singular(lattice) {
    return None;
  }
  let inv_lat = rows_to_matrix(lattice).transpose().try_inverse()?;
  let frac_vec = inv_lat * Vector3::from(cart);
  Some([frac_vec.x, frac_vec.y, frac_vec.z])
}

/// Reciprocal lattice rows without the 2π factor (b_i · a_j = δ_ij).
pub fn reciprocal(lattice: &Rows3) -> Option<Rows3> {
  if is_singular(lattice) {
    return None;
  }
  let inv = rows_to_matrix(lattice).try_inverse()?;
  Some(matrix_to_rows(&inv.transpose()))
}

pub fn norm(v: [f64; 3]) -> f64 {
  (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Angle between two vectors in radians.
pub fn angle(u: [f64; 3], v: [f64; 3]) -> f64 {
  let dot = u[0] * v[0] + u[1] * v[1] + u[2] * v[2];
  (dot / (norm(u) * norm(v))).clamp(-1.0, 1.0).acos()
}

/// (a, b, c, alpha, beta, gamma), angles in radians.
pub fn lattice_parameters(lattice: &Rows3) -> [f64; 6] {
  let [a, b, c] = *lattice;
  [
    norm(a),
    norm(b),
    norm(c),
    angle(b, c),
    angle(a, c),
    angle(a, b),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cubic_lattice() {
    let lattice = [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]];

    let cart = frac_to_cart([0.5, 0.5, 0.5], &lattice);

    assert!((cart[0] - 2.5).abs() < 1e-10);
    assert!((cart[1] - 2.5).abs() < 1e-10);
    assert!((cart[2] - 2.5).abs() < 1e-10);
  }

  #[test]
  fn test_roundtrip_skewed() {
    let lattice = [[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.0, 0.0, 5.0]];

    let frac_orig = [0.333, 0.667, 0.25];
    let cart = frac_to_cart(frac_orig, &lattice);
    let frac_back = cart_to_frac(cart, &lattice).unwrap();

    for i in 0..3 {
      assert!((frac_back[i] - frac_orig[i]).abs() < 1e-10);
    }
  }

  #[test]
  fn test_singular_lattice() {
    let flat = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]];
    assert!(cart_to_frac([0.1, 0.2, 0.0], &flat).is_none());
    assert!(reciprocal(&flat).is_none());
  }

  #[test]
  fn test_reciprocal_is_dual() {
    let lattice = [[3.0, 0.0, 0.0], [1.0, 2.0, 0.0], [0.5, 0.5, 4.0]];
    let rec = reciprocal(&lattice).unwrap();
    for i in 0..3 {
      for j in 0..3 {
        let dot: f64 = (0..3).map(|k| rec[i][k] * lattice[j][k]).sum();
        let expected = if i == j { 1.0 } else { 0.0 };
        assert!((dot - expected).abs() < 1e-12);
      }
    }
  }

  #[test]
  fn test_hexagonal_parameters() {
    let a = 3.0;
    let lattice = [
      [a, 0.0, 0.0],
      [-0.5 * a, 0.75f64.sqrt() * a, 0.0],
      [0.0, 0.0, 5.0],
    ];
    let p = lattice_parameters(&lattice);
    assert!((p[1] - a).abs() < 1e-12);
    assert!((p[5].to_degrees() - 120.0).abs() < 1e-9);
    assert!((p[3].to_degrees() - 90.0).abs() < 1e-9);
  }
}
