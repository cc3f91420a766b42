// src/physics/kpath/mod.rs
//
// High-symmetry band paths through the Brillouin zone of a structure.
// Two conventions share the symmetry search and the basis bookkeeping:
// Setyawan & Curtarolo (the labels and default paths of ASE) and
// Hinuma et al. (seekpath).

mod hpkot;
mod setyawan;

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Vector3};

use crate::error::{Error, Result};
use crate::io::pwi::PathPoint;
use crate::model::structure::Structure;
use crate::model::symmetry::{self, info_for_number};
use crate::utils::linalg;

pub use hpkot::ExtBravais;
pub use setyawan::Lattice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    /// Setyawan & Curtarolo, Comp. Mat. Sci. 49, 299 (2010)
    #[default]
    SetyawanCurtarolo,
    /// Hinuma et al., Comp. Mat. Sci. 128, 140 (2017)
    Hpkot,
}

impl FromStr for Convention {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sc" | "setyawan-curtarolo" | "ase" => Ok(Convention::SetyawanCurtarolo),
            "hpkot" | "seekpath" => Ok(Convention::Hpkot),
            other => Err(format!(
                "unknown band path convention '{}' (expected setyawan-curtarolo or hpkot)",
                other
            )),
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::SetyawanCurtarolo => f.write_str("setyawan-curtarolo"),
            Convention::Hpkot => f.write_str("hpkot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KPoint {
    pub label: String,
    /// Fractional coordinates in the reciprocal basis of the input cell
    pub coords: [f64; 3],
}

#[derive(Debug, Clone)]
pub struct BandPath {
    pub spacegroup: i32,
    pub convention: Convention,
    /// Lattice name in the convention's own nomenclature (`FCC`, `cF2`, ...)
    pub lattice: String,
    /// Every special point of the lattice
    pub points: Vec<KPoint>,
    /// Continuous runs of point labels
    pub subpaths: Vec<Vec<String>>,
}

impl BandPath {
    pub fn point(&self, label: &str) -> Option<&KPoint> {
        self.points.iter().find(|p| p.label == label)
    }

    /// `crystal_b` entries: `density` points per segment, weight 1 at the
    /// end of each run so no points are spent on the jump to the next one.
    pub fn crystal_b_points(&self, density: usize) -> Vec<PathPoint> {
        let mut out = Vec::new();
        for run in &self.subpaths {
            for (i, label) in run.iter().enumerate() {
                let Some(p) = self.point(label) else { continue };
                let weight = if i + 1 == run.len() { 1 } else { density };
                out.push(PathPoint {
                    label: label.clone(),
                    coords: p.coords,
                    weight,
                });
            }
        }
        out
    }

    /// e.g. `G-X-W-K-G-L-U-W-L-K|U-X`
    pub fn path_string(&self) -> String {
        self.subpaths
            .iter()
            .map(|run| run.join("-"))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Band path in the default (Setyawan-Curtarolo) convention.
pub fn calculate_kpath(structure: &Structure, symprec: f64) -> Result<BandPath> {
    calculate_kpath_with(structure, symprec, Convention::default())
}

pub fn calculate_kpath_with(
    structure: &Structure,
    symprec: f64,
    convention: Convention,
) -> Result<BandPath> {
    let cell = StdCell::new(structure, symprec)?;
    let table = match convention {
        Convention::SetyawanCurtarolo => setyawan::path_table(&cell)?,
        Convention::Hpkot => hpkot::path_table(&cell)?,
    };
    log::info!(
        "Band path ({}): SG #{} ({}) -> {}",
        convention,
        cell.spacegroup,
        cell.symbol,
        table.lattice
    );

    // Reciprocal coordinates transform with the inverse transpose
    let k_map = (cell.to_conventional * table.to_primitive)
        .try_inverse()
        .ok_or_else(|| Error::Symmetry("singular cell transformation".to_string()))?
        .transpose();

    let points = table
        .points
        .into_iter()
        .map(|p| {
            let k = k_map * Vector3::from(p.coords);
            KPoint {
                label: p.label,
                coords: [clean(k.x), clean(k.y), clean(k.z)],
            }
        })
        .collect();

    Ok(BandPath {
        spacegroup: cell.spacegroup,
        convention,
        lattice: table.lattice,
        points,
        subpaths: table.subpaths,
    })
}

/// The standardized conventional cell and how the input maps onto it.
struct StdCell {
    spacegroup: i32,
    symbol: String,
    centering: char,
    /// Columns are the conventional lattice vectors
    conventional: Matrix3<f64>,
    /// Input basis -> conventional basis
    to_conventional: Matrix3<f64>,
}

impl StdCell {
    fn new(structure: &Structure, symprec: f64) -> Result<Self> {
        let std = symmetry::standardize(structure, symprec)?;
        let dataset = &std.dataset;
        let info = info_for_number(dataset.number);

        let input = linalg::rows_to_matrix(&structure.lattice).transpose();
        let conventional = dataset.std_cell.lattice.basis;
        let to_conventional = input_to_conventional(&input, &conventional, &dataset.std_linear)?;

        Ok(Self {
            spacegroup: dataset.number,
            symbol: info.symbol,
            centering: info.centering,
            conventional,
            to_conventional,
        })
    }
}

/// What a convention contributes: its points in the reciprocal basis of
/// its primitive cell and that cell in the conventional basis.
struct PathTable {
    lattice: String,
    /// Columns are the primitive vectors in the conventional basis
    to_primitive: Matrix3<f64>,
    points: Vec<KPoint>,
    subpaths: Vec<Vec<String>>,
}

/// The linear map T with conventional = R * input * T for some rotation R.
///
/// The candidates are the forms the dataset's transformation can take; the
/// one that carries the input metric onto the conventional metric wins.
fn input_to_conventional(
    input: &Matrix3<f64>,
    conv: &Matrix3<f64>,
    linear: &Matrix3<f64>,
) -> Result<Matrix3<f64>> {
    let g_in = input.transpose() * input;
    let g_conv = conv.transpose() * conv;
    let scale = g_conv.diagonal().max().max(1e-12);

    let mut candidates = vec![*linear, linear.transpose()];
    if let Some(inv) = linear.try_inverse() {
        candidates.push(inv);
        candidates.push(inv.transpose());
    }

    let best = candidates
        .into_iter()
        .map(|t| {
            let residual = (t.transpose() * g_in * t - g_conv).abs().max() / scale;
            (t, residual)
        })
        .min_by(|x, y| x.1.total_cmp(&y.1));

    match best {
        Some((t, residual)) if residual < 5e-2 => {
            log::debug!("input -> conventional metric residual {:.2e}", residual);
            Ok(t)
        }
        Some((_, residual)) => Err(Error::Symmetry(format!(
            "cannot relate input cell to its standardized cell (metric residual {:.2e})",
            residual
        ))),
        None => Err(Error::Symmetry("no cell transformation available".to_string())),
    }
}

fn clean(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        0.0
    } else {
        x
    }
}

fn kp(label: &str, x: f64, y: f64, z: f64) -> KPoint {
    KPoint {
        label: label.to_string(),
        coords: [x, y, z],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Length (1/Angstrom, no 2*pi) of a point given in the input reciprocal basis
    fn k_length(structure: &Structure, coords: [f64; 3]) -> f64 {
        let rec = linalg::reciprocal(&structure.lattice).unwrap();
        let k: Vec<f64> = (0..3)
            .map(|j| (0..3).map(|i| coords[i] * rec[i][j]).sum())
            .collect();
        linalg::norm([k[0], k[1], k[2]])
    }

    fn crystal(lattice: linalg::Rows3, fracs: &[[f64; 3]]) -> Structure {
        let elements = vec!["X".to_string(); fracs.len()];
        Structure::from_fractional("test", lattice, &elements, fracs)
    }

    fn orthogonal(a: f64, b: f64, c: f64) -> linalg::Rows3 {
        [[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]]
    }

    fn hexagonal(a: f64, c: f64) -> linalg::Rows3 {
        [[a, 0.0, 0.0], [-0.5 * a, 0.75f64.sqrt() * a, 0.0], [0.0, 0.0, c]]
    }

    /// Monoclinic cell with b unique
    fn monoclinic(a: f64, b: f64, c: f64, beta_deg: f64) -> linalg::Rows3 {
        let beta = beta_deg.to_radians();
        [[a, 0.0, 0.0], [0.0, b, 0.0], [c * beta.cos(), 0.0, c * beta.sin()]]
    }

    fn from_parameters(a: f64, b: f64, c: f64, angles_deg: [f64; 3]) -> linalg::Rows3 {
        let [al, be, ga] = angles_deg.map(f64::to_radians);
        let cx = c * be.cos();
        let cy = c * (al.cos() - be.cos() * ga.cos()) / ga.sin();
        let cz = (c * c - cx * cx - cy * cy).sqrt();
        [[a, 0.0, 0.0], [b * ga.cos(), b * ga.sin(), 0.0], [cx, cy, cz]]
    }

    const BODY: [[f64; 3]; 2] = [[0.0; 3], [0.5; 3]];
    const FACES: [[f64; 3]; 4] = [[0.0; 3], [0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]];
    const C_FACE: [[f64; 3]; 2] = [[0.0; 3], [0.5, 0.5, 0.0]];
    const RHOMBOHEDRAL: [[f64; 3]; 3] = [
        [0.0; 3],
        [2.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
        [1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0],
    ];

    fn fcc_primitive(a: f64) -> Structure {
        let h = a / 2.0;
        crystal([[0.0, h, h], [h, 0.0, h], [h, h, 0.0]], &[[0.0; 3], [0.25; 3]])
    }

    fn hcp(a: f64, c: f64) -> Structure {
        crystal(
            hexagonal(a, c),
            &[[1.0 / 3.0, 2.0 / 3.0, 0.25], [2.0 / 3.0, 1.0 / 3.0, 0.75]],
        )
    }

    /// One structure per lattice family and variant
    fn samples() -> Vec<(&'static str, Structure)> {
        vec![
            ("CUB", crystal(orthogonal(3.35, 3.35, 3.35), &[[0.0; 3]])),
            ("FCC", fcc_primitive(5.43)),
            ("BCC", crystal(orthogonal(2.87, 2.87, 2.87), &BODY)),
            ("TET", crystal(orthogonal(3.0, 3.0, 4.0), &[[0.0; 3]])),
            ("BCT1", crystal(orthogonal(4.0, 4.0, 2.5), &BODY)),
            ("BCT2", crystal(orthogonal(3.25, 3.25, 4.95), &BODY)),
            ("ORC", crystal(orthogonal(5.0, 3.0, 4.0), &[[0.0; 3]])),
            ("ORCF1", crystal(orthogonal(4.0, 3.0, 5.0), &FACES)),
            ("ORCF2", crystal(orthogonal(5.0, 4.0, 6.0), &FACES)),
            ("ORCI", crystal(orthogonal(5.0, 3.0, 4.0), &BODY)),
            ("ORCC", crystal(orthogonal(5.0, 3.0, 4.0), &C_FACE)),
            ("HEX", hcp(3.21, 5.21)),
            ("RHL1", crystal(hexagonal(4.54, 11.86), &RHOMBOHEDRAL)),
            ("RHL2", crystal(hexagonal(5.0, 2.5), &RHOMBOHEDRAL)),
            ("MCL", crystal(monoclinic(5.0, 6.0, 7.0, 100.0), &[[0.0; 3]])),
            ("MCLC3", crystal(monoclinic(5.0, 6.0, 7.0, 100.0), &C_FACE)),
            (
                "TRI",
                crystal(from_parameters(4.0, 5.0, 6.0, [80.0, 85.0, 75.0]), &[[0.0; 3]]),
            ),
        ]
    }

    /// Same crystal with the axes relabelled a -> c, b -> a, c -> b
    fn cycled(s: &Structure) -> Structure {
        let mut out = s.clone();
        out.lattice = [s.lattice[1], s.lattice[2], s.lattice[0]];
        out
    }

    fn lengths(path: &BandPath, s: &Structure) -> Vec<(String, f64)> {
        path.points
            .iter()
            .map(|p| (p.label.clone(), k_length(s, p.coords)))
            .collect()
    }

    fn assert_length(path: &BandPath, s: &Structure, label: &str, expected: f64) {
        let p = path
            .point(label)
            .unwrap_or_else(|| panic!("{} has no point {}", path.lattice, label));
        let got = k_length(s, p.coords);
        assert!(
            (got - expected).abs() < 1e-9,
            "{} {}: |k| = {}, expected {}",
            path.lattice,
            label,
            got,
            expected
        );
    }

    #[test]
    fn test_convention_values() {
        assert_eq!(Convention::default(), Convention::SetyawanCurtarolo);
        assert_eq!("ase".parse::<Convention>(), Ok(Convention::SetyawanCurtarolo));
        assert_eq!("HPKOT".parse::<Convention>(), Ok(Convention::Hpkot));
        assert_eq!("seekpath".parse::<Convention>(), Ok(Convention::Hpkot));
        assert!("bilbao".parse::<Convention>().is_err());
        assert_eq!(Convention::SetyawanCurtarolo.to_string(), "setyawan-curtarolo");
    }

    #[test]
    fn test_fcc_default_path() {
        let a = 5.43;
        let s = fcc_primitive(a);
        let path = calculate_kpath(&s, 1e-4).unwrap();

        assert_eq!(path.spacegroup, 227);
        assert_eq!(path.convention, Convention::SetyawanCurtarolo);
        assert_eq!(path.lattice, "FCC");
        assert_eq!(path.path_string(), "G-X-W-K-G-L-U-W-L-K|U-X");

        assert_length(&path, &s, "X", 1.0 / a);
        assert_length(&path, &s, "L", 3f64.sqrt() / (2.0 * a));
        assert_length(&path, &s, "W", 5f64.sqrt() / (2.0 * a));
        assert_length(&path, &s, "K", 3.0 * 2f64.sqrt() / (4.0 * a));
        assert_length(&path, &s, "U", 3.0 * 2f64.sqrt() / (4.0 * a));
    }

    #[test]
    fn test_conventional_fcc_input() {
        let a = 4.05;
        let s = crystal(orthogonal(a, a, a), &FACES);
        let path = calculate_kpath(&s, 1e-4).unwrap();
        assert_eq!(path.lattice, "FCC");
        assert_length(&path, &s, "X", 1.0 / a);
        assert_length(&path, &s, "K", 3.0 * 2f64.sqrt() / (4.0 * a));
    }

    #[test]
    fn test_default_lattice_names() {
        for (name, s) in samples() {
            let path = calculate_kpath(&s, 1e-4).unwrap();
            assert!(
                path.lattice.starts_with(name),
                "expected {}, got {}",
                name,
                path.lattice
            );
            assert_eq!(path.point("G").map(|p| p.coords), Some([0.0; 3]));
        }
    }

    #[test]
    fn test_default_point_lengths() {
        let samples = samples();
        let sample = |name: &str| {
            let s = samples
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, s)| s.clone())
                .unwrap();
            let path = calculate_kpath(&s, 1e-4).unwrap();
            (s, path)
        };

        let a = 3.35;
        let (s, p) = sample("CUB");
        assert_length(&p, &s, "X", 0.5 / a);
        assert_length(&p, &s, "M", 2f64.sqrt() / (2.0 * a));
        assert_length(&p, &s, "R", 3f64.sqrt() / (2.0 * a));

        let a = 2.87;
        let (s, p) = sample("BCC");
        assert_length(&p, &s, "H", 1.0 / a);
        assert_length(&p, &s, "N", 1.0 / (2f64.sqrt() * a));
        assert_length(&p, &s, "P", 3f64.sqrt() / (2.0 * a));

        let (a, c) = (3.0, 4.0);
        let (s, p) = sample("TET");
        assert_length(&p, &s, "X", 0.5 / a);
        assert_length(&p, &s, "Z", 0.5 / c);
        assert_length(&p, &s, "A", (0.5 / (a * a) + 0.25 / (c * c)).sqrt());

        let (a, c) = (4.0, 2.5);
        let (s, p) = sample("BCT1");
        assert_length(&p, &s, "M", 1.0 / a);
        assert_length(&p, &s, "X", 1.0 / (2f64.sqrt() * a));
        assert_length(&p, &s, "Z", (1.0 + c * c / (a * a)) / (2.0 * c));

        let (a, c) = (3.25, 4.95);
        let (s, p) = sample("BCT2");
        assert_length(&p, &s, "Z", 1.0 / c);
        assert_length(&p, &s, "X", 1.0 / (2f64.sqrt() * a));
        assert_length(&p, &s, "P", (0.5 / (a * a) + 0.25 / (c * c)).sqrt());

        // axes sorted a < b < c whatever the input order
        let (s, p) = sample("ORC");
        assert_length(&p, &s, "X", 0.5 / 3.0);
        assert_length(&p, &s, "Y", 0.5 / 4.0);
        assert_length(&p, &s, "Z", 0.5 / 5.0);

        let (a, b, c) = (3.0f64, 4.0f64, 5.0f64);
        let (s, p) = sample("ORCF1");
        let eta = (1.0 + a * a / (b * b) + a * a / (c * c)) / 4.0;
        assert_length(&p, &s, "X", 2.0 * eta / a);
        assert_length(&p, &s, "Y", 1.0 / b);
        assert_length(&p, &s, "Z", 1.0 / c);

        let (s, p) = sample("ORCF2");
        assert_length(&p, &s, "X", 1.0 / 4.0);
        assert_length(&p, &s, "Y", 1.0 / 5.0);
        assert_length(&p, &s, "Z", 1.0 / 6.0);

        let (s, p) = sample("ORCI");
        let zeta = (1.0 + a * a / (c * c)) / 4.0;
        assert_length(&p, &s, "X", 2.0 * zeta / a);
        assert_length(&p, &s, "Z", 1.0 / c);
        assert_length(&p, &s, "S", (0.25 / (b * b) + 0.25 / (c * c)).sqrt());
        assert_length(&p, &s, "T", (0.25 / (a * a) + 0.25 / (b * b)).sqrt());

        // C-centred face has edges 5 and 3: a = 3, b = 5, c = 4
        let (a, b, c) = (3.0f64, 5.0f64, 4.0f64);
        let (s, p) = sample("ORCC");
        let zeta = (1.0 + a * a / (b * b)) / 4.0;
        assert_length(&p, &s, "X", 2.0 * zeta / a);
        assert_length(&p, &s, "Y", 1.0 / b);
        assert_length(&p, &s, "Z", 0.5 / c);
        assert_length(&p, &s, "S", (0.25 / (a * a) + 0.25 / (b * b)).sqrt());

        let (a, c) = (3.21, 5.21);
        let (s, p) = sample("HEX");
        assert_length(&p, &s, "M", 1.0 / (3f64.sqrt() * a));
        assert_length(&p, &s, "K", 2.0 / (3.0 * a));
        assert_length(&p, &s, "A", 0.5 / c);

        let (s, p) = sample("RHL1");
        assert_length(&p, &s, "Z", 1.5 / 11.86);

        // unique axis 6, then b = 5 and c = 7 at alpha = 80 degrees
        let sina = 80f64.to_radians().sin();
        let (s, p) = sample("MCL");
        assert_length(&p, &s, "Z", 0.5 / 6.0);
        assert_length(&p, &s, "X", 0.5 / (5.0 * sina));
        assert_length(&p, &s, "Y", 0.5 / (7.0 * sina));

        let (s, p) = sample("MCLC3");
        assert_length(&p, &s, "Z", 0.5 / (7.0 * sina));
        assert_length(&p, &s, "N", 0.5 * (1.0 / 36.0 + 1.0 / (25.0 * sina * sina)).sqrt());
    }

    #[test]
    fn test_triclinic_points_are_half_lattice_vectors() {
        let (_, s) = samples().pop().unwrap();
        let path = calculate_kpath(&s, 1e-4).unwrap();
        assert!(path.lattice.starts_with("TRI"));
        assert_eq!(path.path_string(), "X-G-Y|L-G-Z|N-G-M|R-G");
        for p in &path.points {
            for x in p.coords {
                assert!((2.0 * x - (2.0 * x).round()).abs() < 1e-9, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_lengths_do_not_depend_on_axis_labels() {
        for convention in [Convention::SetyawanCurtarolo, Convention::Hpkot] {
            for (name, s) in samples() {
                let t = cycled(&s);
                let first = calculate_kpath_with(&s, 1e-4, convention).unwrap();
                let second = calculate_kpath_with(&t, 1e-4, convention).unwrap();
                assert_eq!(first.lattice, second.lattice, "{} ({})", name, convention);
                assert_eq!(first.path_string(), second.path_string());

                let other = lengths(&second, &t);
                for (label, len) in lengths(&first, &s) {
                    let (_, len2) = other.iter().find(|(l, _)| *l == label).unwrap();
                    assert!(
                        (len - len2).abs() < 1e-9,
                        "{} ({}) {}: {} vs {}",
                        name,
                        convention,
                        label,
                        len,
                        len2
                    );
                }
            }
        }
    }

    #[test]
    fn test_hpkot_paths() {
        let a = 5.43;
        let s = fcc_primitive(a);
        let path = calculate_kpath_with(&s, 1e-4, Convention::Hpkot).unwrap();
        assert_eq!(path.lattice, "cF2");
        assert_eq!(path.path_string(), "G-X-U|K-G-L-W-X");
        assert_length(&path, &s, "X", 1.0 / a);
        assert_length(&path, &s, "L", 3f64.sqrt() / (2.0 * a));
        assert_length(&path, &s, "W", 5f64.sqrt() / (2.0 * a));

        let (a, c) = (2.46, 6.7);
        let s = hcp(a, c);
        let path = calculate_kpath_with(&s, 1e-4, Convention::Hpkot).unwrap();
        assert_eq!(path.spacegroup, 194);
        assert_eq!(path.lattice, "hP2");
        assert_length(&path, &s, "M", 1.0 / (3f64.sqrt() * a));
        assert_length(&path, &s, "K", 2.0 / (3.0 * a));
        assert_length(&path, &s, "A", 0.5 / c);

        let (a, c) = (3.25, 4.95);
        let s = crystal(orthogonal(a, a, c), &BODY);
        let path = calculate_kpath_with(&s, 1e-4, Convention::Hpkot).unwrap();
        assert_eq!(path.lattice, "tI2");
        assert_length(&path, &s, "M", 1.0 / c);
        assert_length(&path, &s, "X", 1.0 / (2f64.sqrt() * a));

        let s = crystal(hexagonal(4.54, 11.86), &RHOMBOHEDRAL);
        let path = calculate_kpath_with(&s, 1e-4, Convention::Hpkot).unwrap();
        assert_eq!(path.lattice, "hR1");
        assert_length(&path, &s, "T", 1.5 / 11.86);
    }

    #[test]
    fn test_crystal_b_weights() {
        let s = fcc_primitive(5.43);
        let path = calculate_kpath(&s, 1e-4).unwrap();
        let pts = path.crystal_b_points(10);
        let weights: Vec<usize> = pts.iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![10, 10, 10, 10, 10, 10, 10, 10, 10, 1, 10, 1]);
        assert_eq!(pts[0].label, "G");
        assert_eq!(pts[0].coords, [0.0, 0.0, 0.0]);
        assert_eq!(pts[10].label, "U");
    }
}
