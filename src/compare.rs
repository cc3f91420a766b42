// src/compare.rs
//
// Field-by-field comparison of two POSCAR files read at fixed line offsets.

use std::fmt::Write as _;

use crate::io::poscar::RawPoscar;

/// One field that differs, with both values already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub field: &'static str,
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub differences: Vec<Difference>,
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn report(&self) -> String {
        if self.is_identical() {
            return "The two POSCAR files are identical.\n".to_string();
        }
        let mut out = String::new();
        for d in &self.differences {
            let _ = writeln!(out, "{} are different:", d.field);
            let _ = writeln!(out, "POSCAR 1: {}", d.first);
            let _ = writeln!(out, "POSCAR 2: {}", d.second);
        }
        out
    }
}

/// `tolerance == 0` means exact equality.
pub fn compare(a: &RawPoscar, b: &RawPoscar, tolerance: f64) -> Comparison {
    let mut differences = Vec::new();
    let mut check = |field: &'static str, same: bool, first: String, second: String| {
        if !same {
            differences.push(Difference {
                field,
                first,
                second,
            });
        }
    };

    check(
        "Lattice parameters",
        floats_match(&a.lattice_parameters, &b.lattice_parameters, tolerance),
        format!("{:?}", a.lattice_parameters),
        format!("{:?}", b.lattice_parameters),
    );
    for (va, vb) in a.lattice_vectors.iter().zip(&b.lattice_vectors) {
        check(
            "Lattice vectors",
            floats_match(va, vb, tolerance),
            format!("{:?}", va),
            format!("{:?}", vb),
        );
    }
    check(
        "Atom types",
        a.atom_types == b.atom_types,
        format!("{:?}", a.atom_types),
        format!("{:?}", b.atom_types),
    );
    check(
        "Atom numbers",
        a.atom_numbers == b.atom_numbers,
        format!("{:?}", a.atom_numbers),
        format!("{:?}", b.atom_numbers),
    );
    let positions_match = a.atomic_positions.len() == b.atomic_positions.len()
        && a
            .atomic_positions
            .iter()
            .zip(&b.atomic_positions)
            .all(|(pa, pb)| floats_match(pa, pb, tolerance));
    check(
        "Atomic positions",
        positions_match,
        format!("{:?}", a.atomic_positions),
        format!("{:?}", b.atomic_positions),
    );

    log::debug!("{} field(s) differ", differences.len());
    Comparison { differences }
}

fn floats_match(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            if tolerance > 0.0 {
                (x - y).abs() <= tolerance
            } else {
                x == y
            }
        })
}
