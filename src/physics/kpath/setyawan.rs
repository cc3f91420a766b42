// src/physics/kpath/setyawan.rs
//
// Band paths after Setyawan & Curtarolo, Comp. Mat. Sci. 49, 299 (2010),
// with the point labels and default paths ASE uses (Gamma is `G`).

use nalgebra::{Matrix3, Vector3};

use super::{kp, KPoint, PathTable, StdCell};
use crate::error::{Error, Result};

/// Tolerance on cosines when a variant sits on a boundary
const EPS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lattice {
    Cub,
    Fcc,
    Bcc,
    Tet,
    Bct1,
    Bct2,
    Orc,
    Orcf1,
    Orcf2,
    Orcf3,
    Orci,
    Orcc,
    Hex,
    Rhl1,
    Rhl2,
    Mcl,
    Mclc1,
    Mclc2,
    Mclc3,
    Mclc4,
    Mclc5,
    Tri1a,
    Tri1b,
    Tri2a,
    Tri2b,
}

impl Lattice {
    pub fn name(self) -> &'static str {
        use Lattice::*;
        match self {
            Cub => "CUB",
            Fcc => "FCC",
            Bcc => "BCC",
            Tet => "TET",
            Bct1 => "BCT1",
            Bct2 => "BCT2",
            Orc => "ORC",
            Orcf1 => "ORCF1",
            Orcf2 => "ORCF2",
            Orcf3 => "ORCF3",
            Orci => "ORCI",
            Orcc => "ORCC",
            Hex => "HEX",
            Rhl1 => "RHL1",
            Rhl2 => "RHL2",
            Mcl => "MCL",
            Mclc1 => "MCLC1",
            Mclc2 => "MCLC2",
            Mclc3 => "MCLC3",
            Mclc4 => "MCLC4",
            Mclc5 => "MCLC5",
            Tri1a => "TRI1a",
            Tri1b => "TRI1b",
            Tri2a => "TRI2a",
            Tri2b => "TRI2b",
        }
    }
}

/// Lattice family as the symmetry search sees it, before the variant split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Cubic(char),
    Tetragonal(char),
    Orthorhombic(char),
    Hexagonal,
    Rhombohedral,
    Monoclinic(char),
    Triclinic,
}

impl Family {
    fn of(sg: i32, centering: char) -> Self {
        match sg {
            1..=2 => Family::Triclinic,
            3..=15 => Family::Monoclinic(centering),
            16..=74 => Family::Orthorhombic(centering),
            75..=142 => Family::Tetragonal(centering),
            143..=194 if centering == 'R' => Family::Rhombohedral,
            143..=194 => Family::Hexagonal,
            _ => Family::Cubic(centering),
        }
    }
}

pub(super) fn path_table(cell: &StdCell) -> Result<PathTable> {
    let family = Family::of(cell.spacegroup, cell.centering);
    let change = setting(family, &cell.conventional)?;
    let basis = cell.conventional * change;
    let (lattice, primitive) = variant(family, &basis)?;

    let (a, b, c) = (length(&basis, 0), length(&basis, 1), length(&basis, 2));
    let alpha = match lattice {
        Lattice::Rhl1 | Lattice::Rhl2 => angle(&(basis * primitive), 0, 1),
        _ => angle(&basis, 1, 2),
    };
    let (points, path) = special_points(lattice, a, b, c, alpha);
    log::debug!(
        "{}: a = {:.4}, b = {:.4}, c = {:.4}, alpha = {:.2} deg",
        lattice.name(),
        a,
        b,
        c,
        alpha.to_degrees()
    );

    Ok(PathTable {
        lattice: lattice.name().to_string(),
        to_primitive: change * primitive,
        points,
        subpaths: parse_path(path),
    })
}

// --- SETTING ---

fn length(m: &Matrix3<f64>, i: usize) -> f64 {
    m.column(i).norm()
}

fn cosine(m: &Matrix3<f64>, i: usize, j: usize) -> f64 {
    m.column(i).dot(&m.column(j)) / (length(m, i) * length(m, j))
}

fn angle(m: &Matrix3<f64>, i: usize, j: usize) -> f64 {
    cosine(m, i, j).clamp(-1.0, 1.0).acos()
}

fn unit(i: usize) -> Vector3<f64> {
    let mut v = Vector3::zeros();
    v[i] = 1.0;
    v
}

/// Column k of `basis * permutation(order)` is column `order[k]` of `basis`.
fn permutation(order: [usize; 3]) -> Matrix3<f64> {
    Matrix3::from_columns(&[unit(order[0]), unit(order[1]), unit(order[2])])
}

/// Change of basis from the standardized conventional cell to the one the
/// tables assume: a < b < c for orthorhombic lattices, the C face centred
/// for ORCC, and for monoclinic lattices the unique axis first with
/// alpha < 90 degrees.
fn setting(family: Family, conv: &Matrix3<f64>) -> Result<Matrix3<f64>> {
    let by_length = |mut order: [usize; 3]| {
        order.sort_by(|&i, &j| length(conv, i).total_cmp(&length(conv, j)));
        order
    };

    let change = match family {
        Family::Orthorhombic('A' | 'B' | 'C') => {
            let face = match family {
                Family::Orthorhombic('A') => [1, 2, 0],
                Family::Orthorhombic('B') => [2, 0, 1],
                _ => [0, 1, 2],
            };
            if length(conv, face[0]) > length(conv, face[1]) {
                permutation([face[1], face[0], face[2]])
            } else {
                permutation(face)
            }
        }
        Family::Orthorhombic(_) => permutation(by_length([0, 1, 2])),
        Family::Monoclinic(centering) => monoclinic_setting(conv, centering),
        Family::Triclinic => triclinic_setting(conv)?.0,
        _ => Matrix3::identity(),
    };
    Ok(change)
}

fn unique_axis(conv: &Matrix3<f64>) -> usize {
    let skew = |i: usize| cosine(conv, i, (i + 1) % 3).abs() + cosine(conv, i, (i + 2) % 3).abs();
    (0..3)
        .min_by(|&i, &j| skew(i).total_cmp(&skew(j)))
        .unwrap_or(1)
}

fn monoclinic_setting(conv: &Matrix3<f64>, centering: char) -> Matrix3<f64> {
    let u = unique_axis(conv);
    let (i, j) = ((u + 1) % 3, (u + 2) % 3);
    let len = |q: &Vector3<f64>| (conv * q).norm();
    let dot = |p: &Vector3<f64>, q: &Vector3<f64>| (conv * p).dot(&(conv * q));

    let (mut qb, mut qc) = match centering {
        'P' => (unit(i), unit(j)),
        // (a + b + c) / 2 becomes (a + b') / 2
        'I' => (unit(i) + unit(j), unit(j)),
        face => {
            let pair = match face {
                'A' => [1, 2],
                'B' => [0, 2],
                _ => [0, 1],
            };
            let k = if pair[0] == u { pair[1] } else { pair[0] };
            (unit(k), unit(3 - u - k))
        }
    };

    // Shorten the pair without moving the centring off the (a, b) face
    let centred = centering != 'P';
    for _ in 0..64 {
        if !centred && len(&qc) < len(&qb) {
            std::mem::swap(&mut qb, &mut qc);
        }
        let n = (dot(&qb, &qc) / dot(&qb, &qb)).round();
        let m = if centred {
            2.0 * (dot(&qb, &qc) / (2.0 * dot(&qc, &qc))).round()
        } else {
            0.0
        };
        if n == 0.0 && m == 0.0 {
            break;
        }
        qc -= n * qb;
        qb -= m * qc;
    }

    if dot(&qb, &qc) < 0.0 {
        qc = -qc;
    }
    Matrix3::from_columns(&[unit(u), qb, qc])
}

/// Reciprocal cosines (k_alpha, k_beta, k_gamma) of a primitive basis.
fn reciprocal_cosines(basis: &Matrix3<f64>) -> Option<[f64; 3]> {
    let rec = basis.try_inverse()?.transpose();
    Some([cosine(&rec, 1, 2), cosine(&rec, 2, 0), cosine(&rec, 0, 1)])
}

fn triclinic_kind(cos: [f64; 3]) -> Option<Lattice> {
    let [ka, kb, kg] = cos;
    if ka < -EPS && kb < -EPS {
        if kg < -EPS && kg + EPS >= ka && kg + EPS >= kb {
            return Some(Lattice::Tri1a);
        }
        if kg.abs() <= EPS {
            return Some(Lattice::Tri2a);
        }
    }
    if ka > EPS && kb > EPS {
        if kg > EPS && kg <= ka + EPS && kg <= kb + EPS {
            return Some(Lattice::Tri1b);
        }
        if kg.abs() <= EPS {
            return Some(Lattice::Tri2b);
        }
    }
    None
}

/// Signed axis permutation whose reciprocal angles fit one of the TRI kinds.
fn triclinic_setting(conv: &Matrix3<f64>) -> Result<(Matrix3<f64>, Lattice)> {
    const ORDERS: [[usize; 3]; 6] = [[0, 1, 2], [1, 2, 0], [2, 0, 1], [1, 0, 2], [0, 2, 1], [2, 1, 0]];
    for order in ORDERS {
        for signs in 0..8u8 {
            let flip = |k: u8| if signs & (1 << k) != 0 { -1.0 } else { 1.0 };
            let change = permutation(order) * Matrix3::from_diagonal(&Vector3::new(flip(0), flip(1), flip(2)));
            let Some(cos) = reciprocal_cosines(&(conv * change)) else {
                continue;
            };
            if let Some(kind) = triclinic_kind(cos) {
                return Ok((change, kind));
            }
        }
    }
    Err(Error::Symmetry(
        "no triclinic setting matches the TRI reciprocal-angle conventions".to_string(),
    ))
}

/// Variant and primitive cell (columns, in the conventional basis).
fn variant(family: Family, basis: &Matrix3<f64>) -> Result<(Lattice, Matrix3<f64>)> {
    let h = 0.5;
    let face_centred = Matrix3::new(
        0.0, h, h, //
        h, 0.0, h, //
        h, h, 0.0,
    );
    let body_centred = Matrix3::new(
        -h, h, h, //
        h, -h, h, //
        h, h, -h,
    );
    let (a, b, c) = (length(basis, 0), length(basis, 1), length(basis, 2));

    let out = match family {
        Family::Cubic('F') => (Lattice::Fcc, face_centred),
        Family::Cubic('I') => (Lattice::Bcc, body_centred),
        Family::Cubic(_) => (Lattice::Cub, Matrix3::identity()),
        Family::Tetragonal('I') => {
            let kind = if c < a { Lattice::Bct1 } else { Lattice::Bct2 };
            (kind, body_centred)
        }
        Family::Tetragonal(_) => (Lattice::Tet, Matrix3::identity()),
        Family::Orthorhombic('F') => {
            let excess = 1.0 / (a * a) - 1.0 / (b * b) - 1.0 / (c * c);
            let kind = if excess.abs() <= EPS / (a * a) {
                Lattice::Orcf3
            } else if excess > 0.0 {
                Lattice::Orcf1
            } else {
                Lattice::Orcf2
            };
            (kind, face_centred)
        }
        Family::Orthorhombic('I') => (Lattice::Orci, body_centred),
        Family::Orthorhombic('A' | 'B' | 'C') => (
            Lattice::Orcc,
            Matrix3::new(
                h, h, 0.0, //
                -h, h, 0.0, //
                0.0, 0.0, 1.0,
            ),
        ),
        Family::Orthorhombic(_) => (Lattice::Orc, Matrix3::identity()),
        Family::Hexagonal => (Lattice::Hex, Matrix3::identity()),
        Family::Rhombohedral => {
            let t = 1.0 / 3.0;
            let primitive = Matrix3::new(
                2.0 * t, -t, -t, //
                t, t, -2.0 * t, //
                t, t, t,
            );
            let kind = if cosine(&(basis * primitive), 0, 1) > 0.0 {
                Lattice::Rhl1
            } else {
                Lattice::Rhl2
            };
            (kind, primitive)
        }
        Family::Monoclinic('P') => (Lattice::Mcl, Matrix3::identity()),
        Family::Monoclinic(_) => {
            let primitive = Matrix3::new(
                h, -h, 0.0, //
                h, h, 0.0, //
                0.0, 0.0, 1.0,
            );
            let cos = reciprocal_cosines(&(basis * primitive))
                .ok_or_else(|| Error::Symmetry("singular monoclinic cell".to_string()))?;
            let kgamma = cos[2];
            let kind = if kgamma < -EPS {
                Lattice::Mclc1
            } else if kgamma.abs() <= EPS {
                Lattice::Mclc2
            } else {
                let alpha = angle(basis, 1, 2);
                let test = b * alpha.cos() / c + (b * alpha.sin() / a).powi(2);
                if (test - 1.0).abs() <= EPS {
                    Lattice::Mclc4
                } else if test < 1.0 {
                    Lattice::Mclc3
                } else {
                    Lattice::Mclc5
                }
            };
            (kind, primitive)
        }
        Family::Triclinic => {
            let cos = reciprocal_cosines(basis)
                .ok_or_else(|| Error::Symmetry("singular triclinic cell".to_string()))?;
            let kind = triclinic_kind(cos).ok_or_else(|| {
                Error::Symmetry("triclinic cell outside the TRI conventions".to_string())
            })?;
            (kind, Matrix3::identity())
        }
    };
    Ok(out)
}

/// `GXWKGLUWLK,UX` into [[G, X, W, K, G, L, U, W, L, K], [U, X]]
fn parse_path(path: &str) -> Vec<Vec<String>> {
    path.split(',')
        .map(|run| {
            let mut labels: Vec<String> = Vec::new();
            for ch in run.chars() {
                match labels.last_mut() {
                    Some(label) if ch.is_ascii_digit() => label.push(ch),
                    _ => labels.push(ch.to_string()),
                }
            }
            labels
        })
        .filter(|run| !run.is_empty())
        .collect()
}

// --- PATH DATA ---

/// Special points (primitive reciprocal basis) and the default path.
/// `alpha` is the rhombohedral angle for RHL and the angle between b and c
/// for the monoclinic lattices.
fn special_points(lattice: Lattice, a: f64, b: f64, c: f64, alpha: f64) -> (Vec<KPoint>, &'static str) {
    use Lattice::*;
    let h = 0.5;
    let g = kp("G", 0., 0., 0.);
    let (cosa, sina) = (alpha.cos(), alpha.sin());

    match lattice {
        Cub => (
            vec![
                g,
                kp("M", h, h, 0.),
                kp("R", h, h, h),
                kp("X", 0., h, 0.),
            ],
            "GXMGRX,MR",
        ),
        Fcc => (
            vec![
                g,
                kp("K", 0.375, 0.375, 0.75),
                kp("L", h, h, h),
                kp("U", 0.625, 0.25, 0.625),
                kp("W", h, 0.25, 0.75),
                kp("X", h, 0., h),
            ],
            "GXWKGLUWLK,UX",
        ),
        Bcc => (
            vec![
                g,
                kp("H", h, -h, h),
                kp("P", 0.25, 0.25, 0.25),
                kp("N", 0., 0., h),
            ],
            "GHNGPH,PN",
        ),
        Tet => (
            vec![
                g,
                kp("A", h, h, h),
                kp("M", h, h, 0.),
                kp("R", 0., h, h),
                kp("X", 0., h, 0.),
                kp("Z", 0., 0., h),
            ],
            "GXMGZRAZ,XR,MA",
        ),
        Bct1 => {
            let eta = (1. + c * c / (a * a)) / 4.;
            (
                vec![
                    g,
                    kp("M", -h, h, h),
                    kp("N", 0., h, 0.),
                    kp("P", 0.25, 0.25, 0.25),
                    kp("X", 0., 0., h),
                    kp("Z", eta, eta, -eta),
                    kp("Z1", -eta, 1. - eta, eta),
                ],
                "GXMGZPNZ1M,XP",
            )
        }
        Bct2 => {
            let eta = (1. + a * a / (c * c)) / 4.;
            let zeta = a * a / (2. * c * c);
            (
                vec![
                    g,
                    kp("N", 0., h, 0.),
                    kp("P", 0.25, 0.25, 0.25),
                    kp("S", -eta, eta, eta),
                    kp("S1", eta, 1. - eta, -eta),
                    kp("X", 0., 0., h),
                    kp("Y", -zeta, zeta, h),
                    kp("Y1", h, h, -zeta),
                    kp("Z", h, h, -h),
                ],
                "GXYSGZS1NPY1Z,XP",
            )
        }
        Orc => (
            vec![
                g,
                kp("R", h, h, h),
                kp("S", h, h, 0.),
                kp("T", 0., h, h),
                kp("U", h, 0., h),
                kp("X", h, 0., 0.),
                kp("Y", 0., h, 0.),
                kp("Z", 0., 0., h),
            ],
            "GXSYGZURTZ,YT,UX,SR",
        ),
        Orcf1 | Orcf3 => {
            let zeta = (1. + a * a / (b * b) - a * a / (c * c)) / 4.;
            let eta = (1. + a * a / (b * b) + a * a / (c * c)) / 4.;
            let path = if lattice == Orcf1 {
                "GYTZGXA1Y,TX1,XAZ,LG"
            } else {
                "GYTZGXA1Y,XAZ,LG"
            };
            (
                vec![
                    g,
                    kp("A", h, h + zeta, zeta),
                    kp("A1", h, h - zeta, 1. - zeta),
                    kp("L", h, h, h),
                    kp("T", 1., h, h),
                    kp("X", 0., eta, eta),
                    kp("X1", 1., 1. - eta, 1. - eta),
                    kp("Y", h, 0., h),
                    kp("Z", h, h, 0.),
                ],
                path,
            )
        }
        Orcf2 => {
            let eta = (1. + a * a / (b * b) - a * a / (c * c)) / 4.;
            let phi = (1. + c * c / (b * b) - c * c / (a * a)) / 4.;
            let delta = (1. + b * b / (a * a) - b * b / (c * c)) / 4.;
            (
                vec![
                    g,
                    kp("C", h, h - eta, 1. - eta),
                    kp("C1", h, h + eta, eta),
                    kp("D", h - delta, h, 1. - delta),
                    kp("D1", h + delta, h, delta),
                    kp("H", 1. - phi, h - phi, h),
                    kp("H1", phi, h + phi, h),
                    kp("L", h, h, h),
                    kp("X", 0., h, h),
                    kp("Y", h, 0., h),
                    kp("Z", h, h, 0.),
                ],
                "GYCDXGZD1HC,C1Z,XH1,HY,LG",
            )
        }
        Orci => {
            let zeta = (1. + a * a / (c * c)) / 4.;
            let eta = (1. + b * b / (c * c)) / 4.;
            let delta = (b * b - a * a) / (4. * c * c);
            let mu = (a * a + b * b) / (4. * c * c);
            (
                vec![
                    g,
                    kp("L", -mu, mu, h - delta),
                    kp("L1", mu, -mu, h + delta),
                    kp("L2", h - delta, h + delta, -mu),
                    kp("R", 0., h, 0.),
                    kp("S", h, 0., 0.),
                    kp("T", 0., 0., h),
                    kp("W", 0.25, 0.25, 0.25),
                    kp("X", -zeta, zeta, zeta),
                    kp("X1", zeta, 1. - zeta, -zeta),
                    kp("Y", eta, -eta, eta),
                    kp("Y1", 1. - eta, eta, -eta),
                    kp("Z", h, h, -h),
                ],
                "GXLTWRX1ZGYSW,L1Y,Y1Z",
            )
        }
        Orcc => {
            let zeta = (1. + a * a / (b * b)) / 4.;
            (
                vec![
                    g,
                    kp("A", zeta, zeta, h),
                    kp("A1", -zeta, 1. - zeta, h),
                    kp("R", 0., h, h),
                    kp("S", 0., h, 0.),
                    kp("T", -h, h, h),
                    kp("X", zeta, zeta, 0.),
                    kp("X1", -zeta, 1. - zeta, 0.),
                    kp("Y", -h, h, 0.),
                    kp("Z", 0., 0., h),
                ],
                "GXSRAZGYX1A1TY,ZT",
            )
        }
        Hex => (
            vec![
                g,
                kp("A", 0., 0., h),
                kp("H", 1. / 3., 1. / 3., h),
                kp("K", 1. / 3., 1. / 3., 0.),
                kp("L", h, 0., h),
                kp("M", h, 0., 0.),
            ],
            "GMKGALHA,LM,KH",
        ),
        Rhl1 => {
            let eta = (1. + 4. * cosa) / (2. + 4. * cosa);
            let nu = 0.75 - eta / 2.;
            (
                vec![
                    g,
                    kp("B", eta, h, 1. - eta),
                    kp("B1", h, 1. - eta, eta - 1.),
                    kp("F", h, h, 0.),
                    kp("L", h, 0., 0.),
                    kp("L1", 0., 0., -h),
                    kp("P", eta, nu, nu),
                    kp("P1", 1. - nu, 1. - nu, 1. - eta),
                    kp("P2", nu, nu, eta - 1.),
                    kp("Q", 1. - nu, nu, 0.),
                    kp("X", nu, 0., -nu),
                    kp("Z", h, h, h),
                ],
                "GLB1,BZGX,QFP1Z,LP",
            )
        }
        Rhl2 => {
            let eta = 1. / (2. * (alpha / 2.).tan().powi(2));
            let nu = 0.75 - eta / 2.;
            (
                vec![
                    g,
                    kp("F", h, -h, 0.),
                    kp("L", h, 0., 0.),
                    kp("P", 1. - nu, -nu, 1. - nu),
                    kp("P1", nu, nu - 1., nu - 1.),
                    kp("Q", eta, eta, eta),
                    kp("Q1", 1. - eta, -eta, -eta),
                    kp("Z", h, -h, h),
                ],
                "GPZQGFP1Q1LZ",
            )
        }
        Mcl => {
            let eta = (1. - b * cosa / c) / (2. * sina * sina);
            let nu = h - eta * c * cosa / b;
            (
                vec![
                    g,
                    kp("A", h, h, 0.),
                    kp("C", 0., h, h),
                    kp("D", h, 0., h),
                    kp("D1", h, 0., -h),
                    kp("E", h, h, h),
                    kp("H", 0., eta, 1. - nu),
                    kp("H1", 0., 1. - eta, nu),
                    kp("H2", 0., eta, -nu),
                    kp("M", h, eta, 1. - nu),
                    kp("M1", h, 1. - eta, nu),
                    kp("M2", h, eta, -nu),
                    kp("X", 0., h, 0.),
                    kp("Y", 0., 0., h),
                    kp("Y1", 0., 0., -h),
                    kp("Z", h, 0., 0.),
                ],
                "GYHCEM1AXH1,MDZ,YD",
            )
        }
        Mclc1 | Mclc2 => {
            let zeta = (2. - b * cosa / c) / (4. * sina * sina);
            let eta = h + 2. * zeta * c * cosa / b;
            let psi = 0.75 - a * a / (4. * b * b * sina * sina);
            let phi = psi + (0.75 - psi) * b * cosa / c;
            let path = if lattice == Mclc1 {
                "GYFLI,I1ZF1,YX1,XGN,MG"
            } else {
                "GYFLI,I1ZF1,NGM"
            };
            (
                vec![
                    g,
                    kp("N", h, 0., 0.),
                    kp("N1", 0., -h, 0.),
                    kp("F", 1. - zeta, 1. - zeta, 1. - eta),
                    kp("F1", zeta, zeta, eta),
                    kp("F2", -zeta, -zeta, 1. - eta),
                    kp("I", phi, 1. - phi, h),
                    kp("I1", 1. - phi, phi - 1., h),
                    kp("L", h, h, h),
                    kp("M", h, 0., h),
                    kp("X", 1. - psi, psi - 1., 0.),
                    kp("X1", psi, 1. - psi, 0.),
                    kp("X2", psi - 1., -psi, 0.),
                    kp("Y", h, h, 0.),
                    kp("Y1", -h, -h, 0.),
                    kp("Z", 0., 0., h),
                ],
                path,
            )
        }
        Mclc3 | Mclc4 => {
            let mu = (1. + b * b / (a * a)) / 4.;
            let delta = b * c * cosa / (2. * a * a);
            let zeta = mu - 0.25 + (1. - b * cosa / c) / (4. * sina * sina);
            let eta = h + 2. * zeta * c * cosa / b;
            let phi = 1. + zeta - 2. * mu;
            let psi = eta - 2. * delta;
            let path = if lattice == Mclc3 {
                "GYFHZIF1,H1Y1XGN,MG"
            } else {
                "GYFHZI,H1Y1XGN,MG"
            };
            (
                vec![
                    g,
                    kp("F", 1. - phi, 1. - phi, 1. - psi),
                    kp("F1", phi, phi - 1., psi),
                    kp("F2", 1. - phi, -phi, 1. - psi),
                    kp("H", zeta, zeta, eta),
                    kp("H1", 1. - zeta, -zeta, 1. - eta),
                    kp("H2", -zeta, -zeta, 1. - eta),
                    kp("I", h, -h, h),
                    kp("M", h, 0., h),
                    kp("N", h, 0., 0.),
                    kp("N1", 0., -h, 0.),
                    kp("X", h, -h, 0.),
                    kp("Y", mu, mu, delta),
                    kp("Y1", 1. - mu, -mu, -delta),
                    kp("Y2", -mu, -mu, -delta),
                    kp("Y3", mu, mu - 1., delta),
                    kp("Z", 0., 0., h),
                ],
                path,
            )
        }
        Mclc5 => {
            let zeta = (b * b / (a * a) + (1. - b * cosa / c) / (sina * sina)) / 4.;
            let eta = h + 2. * zeta * c * cosa / b;
            let mu = eta / 2. + b * b / (4. * a * a) - b * c * cosa / (2. * a * a);
            let nu = 2. * mu - zeta;
            let omega = (4. * nu - 1. - b * b * sina * sina / (a * a)) * c / (2. * b * cosa);
            let delta = zeta * c * cosa / b + omega / 2. - 0.25;
            let rho = 1. - zeta * a * a / (b * b);
            (
                vec![
                    g,
                    kp("F", nu, nu, omega),
                    kp("F1", 1. - nu, 1. - nu, 1. - omega),
                    kp("F2", nu, nu - 1., omega),
                    kp("H", zeta, zeta, eta),
                    kp("H1", 1. - zeta, -zeta, 1. - eta),
                    kp("H2", -zeta, -zeta, 1. - eta),
                    kp("I", rho, 1. - rho, h),
                    kp("I1", 1. - rho, rho - 1., h),
                    kp("L", h, h, h),
                    kp("M", h, 0., h),
                    kp("N", h, 0., 0.),
                    kp("N1", 0., -h, 0.),
                    kp("X", h, -h, 0.),
                    kp("Y", mu, mu, delta),
                    kp("Y1", 1. - mu, -mu, -delta),
                    kp("Y2", -mu, -mu, -delta),
                    kp("Y3", mu, mu - 1., delta),
                    kp("Z", 0., 0., h),
                ],
                "GYFLI,I1ZHF1,H1Y1XGN,MG",
            )
        }
        Tri1a | Tri2a => (
            vec![
                g,
                kp("L", h, h, 0.),
                kp("M", 0., h, h),
                kp("N", h, 0., h),
                kp("R", h, h, h),
                kp("X", h, 0., 0.),
                kp("Y", 0., h, 0.),
                kp("Z", 0., 0., h),
            ],
            "XGY,LGZ,NGM,RG",
        ),
        Tri1b | Tri2b => (
            vec![
                g,
                kp("L", h, -h, 0.),
                kp("M", 0., 0., h),
                kp("N", -h, -h, h),
                kp("R", 0., -h, h),
                kp("X", 0., -h, 0.),
                kp("Y", h, 0., 0.),
                kp("Z", -h, 0., h),
            ],
            "XGY,LGZ,NGM,RG",
        ),
    }
}
