use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::linalg::{self, Rows3};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    /// Cartesian position in Angstrom
    pub position: [f64; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    // Free-form label (POSCAR comment line)
    pub title: String,
    // Lattice vectors: [a_vec, b_vec, c_vec]
    pub lattice: Rows3,
    pub atoms: Vec<Atom>,
}

impl Structure {
    pub fn new(title: impl Into<String>, lattice: Rows3, atoms: Vec<Atom>) -> Self {
        Self {
            title: title.into(),
            lattice,
            atoms,
        }
    }

    /// Builds a structure from fractional coordinates.
    pub fn from_fractional(
        title: impl Into<String>,
        lattice: Rows3,
        elements: &[String],
        fractional: &[[f64; 3]],
    ) -> Self {
        let atoms = elements
            .iter()
            .zip(fractional)
            .map(|(el, frac)| Atom {
                element: el.clone(),
                position: linalg::frac_to_cart(*frac, &lattice),
            })
            .collect();
        Self::new(title, lattice, atoms)
    }

    /// Distinct element labels in order of first appearance.
    pub fn species(&self) -> Vec<String> {
        let mut species: Vec<String> = Vec::new();
        for atom in &self.atoms {
            if !species.contains(&atom.element) {
                species.push(atom.element.clone());
            }
        }
        species
    }

    pub fn species_counts(&self) -> Vec<(String, usize)> {
        self.species()
            .into_iter()
            .map(|el| {
                let n = self.atoms.iter().filter(|a| a.element == el).count();
                (el, n)
            })
            .collect()
    }

    /// 0-based species index of every atom.
    pub fn type_indices(&self) -> Vec<usize> {
        let species = self.species();
        self.atoms
            .iter()
            .map(|a| species.iter().position(|s| *s == a.element).unwrap_or(0))
            .collect()
    }

    pub fn fractional_positions(&self) -> Result<Vec<[f64; 3]>> {
        self.atoms
            .iter()
            .map(|a| {
                linalg::cart_to_frac(a.position, &self.lattice).ok_or_else(|| {
                    Error::Geometry("lattice is singular (determinant is zero)".to_string())
                })
            })
            .collect()
    }

    pub fn volume(&self) -> f64 {
        linalg::determinant(&self.lattice).abs()
    }

    /// e.g. "Si2O4": species order, count omitted when it is 1
    pub fn formula(&self) -> String {
        self.species_counts()
            .into_iter()
            .map(|(el, c)| if c > 1 { format!("{}{}", el, c) } else { el })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rocksalt_fragment() -> Structure {
        let lattice = [[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]];
        let elements: Vec<String> = ["Na", "Cl", "Na", "Cl"].iter().map(|s| s.to_string()).collect();
        let fracs = [
            [0.0, 0.0, 0.0],
            [0.5, 0.0, 0.0],
            [0.5, 0.5, 0.0],
            [0.0, 0.5, 0.0],
        ];
        Structure::from_fractional("NaCl", lattice, &elements, &fracs)
    }

    #[test]
    fn test_species_order_and_counts() {
        let s = rocksalt_fragment();
        assert_eq!(s.species(), vec!["Na".to_string(), "Cl".to_string()]);
        assert_eq!(
            s.species_counts(),
            vec![("Na".to_string(), 2), ("Cl".to_string(), 2)]
        );
        assert_eq!(s.type_indices(), vec![0, 1, 0, 1]);
        assert_eq!(s.formula(), "Na2Cl2");
    }

    #[test]
    fn test_fractional_roundtrip() {
        let s = rocksalt_fragment();
        let fracs = s.fractional_positions().unwrap();
        assert!((fracs[2][0] - 0.5).abs() < 1e-12);
        assert!((fracs[2][1] - 0.5).abs() < 1e-12);
        assert!((s.atoms[1].position[0] - 2.0).abs() < 1e-12);
        assert!((s.volume() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_singular_cell_is_rejected() {
        let mut s = rocksalt_fragment();
        s.lattice[2] = [0.0, 0.0, 0.0];
        assert!(matches!(s.fractional_positions(), Err(Error::Geometry(_))));
    }
}
