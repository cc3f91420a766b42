// src/physics/kpath/hpkot.rs
//
// Band paths after Hinuma, Pizzi, Kumagai, Oba & Tanaka,
// Comp. Mat. Sci. 128, 140 (2017): extended Bravais classes, their special
// points in the primitive reciprocal basis and the suggested segments.

#![allow(non_camel_case_types)]

use nalgebra::Matrix3;

use super::{kp, KPoint, PathTable, StdCell};
use crate::error::{Error, Result};
use crate::utils::linalg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtBravais {
    cP1,
    cP2,
    cF1,
    cF2,
    cI1,
    tP1,
    tI1,
    tI2,
    oP1,
    oA1,
    oA2,
    oC1,
    oC2,
    oF1,
    oF2,
    oF3,
    oI1,
    oI2,
    oI3,
    hP1,
    hP2,
    hR1,
    hR2,
    mP1,
    mC1,
    mC2,
    mC3,
    aP2,
    aP3,
}

impl std::fmt::Display for ExtBravais {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub(super) fn path_table(cell: &StdCell) -> Result<PathTable> {
    let params = Params::from_lattice(&linalg::columns_to_rows(&cell.conventional))?;
    let class = classify(cell.spacegroup, cell.centering, &params);
    let (points, segments) = class_data(class, &params);
    Ok(PathTable {
        lattice: class.to_string(),
        to_primitive: primitive_matrix(class),
        points,
        subpaths: join_segments(segments),
    })
}

// --- CLASSIFICATION ---

struct Params {
    a: f64,
    b: f64,
    c: f64,
    cosb: f64,
    sinb: f64,
    /// Angles of the reciprocal lattice (radians)
    reciprocal_angles: [f64; 3],
}

impl Params {
    fn from_lattice(rows: &linalg::Rows3) -> Result<Self> {
        let [a, b, c, _, beta, _] = linalg::lattice_parameters(rows);
        let rec = linalg::reciprocal(rows)
            .ok_or_else(|| Error::Symmetry("standardized cell is singular".to_string()))?;
        let [_, _, _, ka, kb, kc] = linalg::lattice_parameters(&rec);
        Ok(Self {
            a,
            b,
            c,
            cosb: beta.cos(),
            sinb: beta.sin(),
            reciprocal_angles: [ka, kb, kc],
        })
    }
}

fn classify(sg: i32, centering: char, p: &Params) -> ExtBravais {
    use ExtBravais::*;
    let (a, b, c) = (p.a, p.b, p.c);
    match sg {
        1..=2 => {
            let obtuse = p
                .reciprocal_angles
                .iter()
                .filter(|x| **x >= std::f64::consts::FRAC_PI_2)
                .count();
            if obtuse >= 2 {
                aP2
            } else {
                aP3
            }
        }
        3..=15 => {
            if centering == 'P' {
                mP1
            } else if b < a * p.sinb {
                mC1
            } else if -a * p.cosb / c + a * a * p.sinb * p.sinb / (b * b) < 1.0 {
                mC2
            } else {
                mC3
            }
        }
        16..=74 => match centering {
            'A' => {
                if b < c {
                    oA1
                } else {
                    oA2
                }
            }
            'C' => {
                if a < b {
                    oC1
                } else {
                    oC2
                }
            }
            'F' => {
                let (ia, ib, ic) = (1.0 / (a * a), 1.0 / (b * b), 1.0 / (c * c));
                if ia > ib + ic {
                    oF1
                } else if ic > ia + ib {
                    oF2
                } else {
                    oF3
                }
            }
            'I' => {
                if c >= a && c >= b {
                    oI1
                } else if a >= b {
                    oI2
                } else {
                    oI3
                }
            }
            _ => oP1,
        },
        75..=142 => {
            if centering == 'I' {
                if c < a {
                    tI1
                } else {
                    tI2
                }
            } else {
                tP1
            }
        }
        143..=194 => {
            if centering == 'R' {
                if 3f64.sqrt() * a < 2f64.sqrt() * c {
                    hR1
                } else {
                    hR2
                }
            } else if matches!(sg, 143..=149 | 151 | 153 | 157 | 159..=163) {
                hP1
            } else {
                hP2
            }
        }
        _ => match centering {
            'F' => {
                if sg <= 206 {
                    cF1
                } else {
                    cF2
                }
            }
            'I' => cI1,
            _ => {
                if sg <= 206 {
                    cP1
                } else {
                    cP2
                }
            }
        },
    }
}

/// Columns are the primitive vectors in the conventional basis.
fn primitive_matrix(class: ExtBravais) -> Matrix3<f64> {
    use ExtBravais::*;
    let (h, t) = (0.5, 1.0 / 3.0);
    match class {
        cF1 | cF2 | oF1 | oF2 | oF3 => Matrix3::new(
            0.0, h, h, //
            h, 0.0, h, //
            h, h, 0.0,
        ),
        cI1 | tI1 | tI2 | oI1 | oI2 | oI3 => Matrix3::new(
            -h, h, h, //
            h, -h, h, //
            h, h, -h,
        ),
        hR1 | hR2 => Matrix3::new(
            2.0 * t, -t, -t, //
            t, t, -2.0 * t, //
            t, t, t,
        ),
        oC1 | oC2 | mC1 | mC2 | mC3 => Matrix3::new(
            h, h, 0.0, //
            -h, h, 0.0, //
            0.0, 0.0, 1.0,
        ),
        oA1 | oA2 => Matrix3::new(
            0.0, 0.0, 1.0, //
            h, h, 0.0, //
            -h, h, 0.0,
        ),
        _ => Matrix3::identity(),
    }
}

/// Chains (A, B), (B, C), (D, E) into [A, B, C], [D, E]
fn join_segments(segments: &[(&str, &str)]) -> Vec<Vec<String>> {
    let mut runs: Vec<Vec<String>> = Vec::new();
    for (from, to) in segments {
        match runs.last_mut() {
            Some(run) if run.last().map(String::as_str) == Some(*from) => {
                run.push(to.to_string());
            }
            _ => runs.push(vec![from.to_string(), to.to_string()]),
        }
    }
    runs
}

// --- PATH DATA ---

type Segments = &'static [(&'static str, &'static str)];

/// Special points (primitive reciprocal basis) and segments of a class
fn class_data(class: ExtBravais, p: &Params) -> (Vec<KPoint>, Segments) {
    use ExtBravais::*;
    let (a, b, c, cosb, sinb) = (p.a, p.b, p.c, p.cosb, p.sinb);
    let h = 0.5;
    let g = kp("G", 0., 0., 0.);

    match class {
        aP2 => (
            vec![
                g,
                kp("Z", 0., 0., h),
                kp("Y", 0., h, 0.),
                kp("X", h, 0., 0.),
                kp("V", h, h, 0.),
                kp("U", h, 0., h),
                kp("T", 0., h, h),
                kp("R", h, h, h),
            ],
            &[("G", "X"), ("Y", "G"), ("G", "Z"), ("R", "G"), ("G", "T"), ("U", "G"), ("G", "V")],
        ),
        aP3 => (
            vec![
                g,
                kp("Z", 0., 0., h),
                kp("Y", 0., h, 0.),
                kp("Y_2", 0., -h, 0.),
                kp("X", h, 0., 0.),
                kp("V_2", h, -h, 0.),
                kp("U_2", -h, 0., h),
                kp("T_2", 0., -h, h),
                kp("R_2", -h, -h, h),
            ],
            &[
                ("G", "X"),
                ("Y", "G"),
                ("G", "Z"),
                ("R_2", "G"),
                ("G", "T_2"),
                ("U_2", "G"),
                ("G", "V_2"),
            ],
        ),
        mP1 => {
            let y = (1.0 + a / c * cosb) / 2.0 / sinb / sinb;
            let n = 0.5 + y * c * cosb / a;
            (
                vec![
                    g,
                    kp("Z", 0., h, 0.),
                    kp("B", 0., 0., h),
                    kp("B_2", 0., 0., -h),
                    kp("Y", h, 0., 0.),
                    kp("Y_2", -h, 0., 0.),
                    kp("C", h, h, 0.),
                    kp("C_2", -h, h, 0.),
                    kp("D", 0., h, h),
                    kp("D_2", 0., h, -h),
                    kp("A", -h, 0., h),
                    kp("E", -h, h, h),
                    kp("H", -y, 0., 1. - n),
                    kp("H_2", -1. + y, 0., n),
                    kp("H_4", -y, 0., -n),
                    kp("M", -y, h, 1. - n),
                    kp("M_2", -1. + y, h, n),
                    kp("M_4", -y, h, -n),
                ],
                &[
                    ("G", "Z"),
                    ("Z", "D"),
                    ("D", "B"),
                    ("B", "G"),
                    ("G", "A"),
                    ("A", "E"),
                    ("E", "Z"),
                    ("Z", "C_2"),
                    ("C_2", "Y_2"),
                    ("Y_2", "G"),
                ],
            )
        }
        mC1 => {
            let z = (2.0 + a / c * cosb) / 4.0 / sinb / sinb;
            let e = 0.5 - 2.0 * z * c * cosb / a;
            let s = 0.75 - b * b / 4.0 / a / a / sinb / sinb;
            let pp = s - (0.75 - s) * a * cosb / c;
            (
                vec![
                    g,
                    kp("Y_2", -h, h, 0.),
                    kp("Y_4", h, -h, 0.),
                    kp("A", 0., 0., h),
                    kp("M_2", -h, h, h),
                    kp("V", h, 0., 0.),
                    kp("V_2", 0., h, 0.),
                    kp("L_2", 0., h, h),
                    kp("C", 1. - s, 1. - s, 0.),
                    kp("C_2", -1. + s, s, 0.),
                    kp("C_4", s, -1. + s, 0.),
                    kp("D", -1. + pp, pp, h),
                    kp("D_2", 1. - pp, 1. - pp, h),
                    kp("E", -1. + z, 1. - z, 1. - e),
                    kp("E_2", -z, z, e),
                    kp("E_4", z, -z, 1. - e),
                ],
                &[
                    ("G", "C"),
                    ("C_2", "Y_2"),
                    ("Y_2", "G"),
                    ("G", "M_2"),
                    ("M_2", "D"),
                    ("D_2", "A"),
                    ("A", "G"),
                    ("L_2", "G"),
                    ("G", "V_2"),
                ],
            )
        }
        mC2 => {
            let z = (a * a / b / b + (1.0 + a / c * cosb) / sinb / sinb) / 4.0;
            let m = (1.0 + a * a / b / b) / 4.0;
            let d = -a * c * cosb / 2.0 / b / b;
            let x = 0.5 - 2.0 * z * c * cosb / a;
            let pp = 1.0 + z - 2.0 * m;
            let s = x - 2.0 * d;
            (
                vec![
                    g,
                    kp("Y", h, h, 0.),
                    kp("A", 0., 0., h),
                    kp("M", h, h, h),
                    kp("V_2", 0., h, 0.),
                    kp("L_2", 0., h, h),
                    kp("F", -1. + pp, 1. - pp, 1. - s),
                    kp("F_2", 1. - pp, pp, s),
                    kp("F_4", pp, 1. - pp, 1. - s),
                    kp("H", -z, z, x),
                    kp("H_2", z, 1. - z, 1. - x),
                    kp("H_4", z, -z, 1. - x),
                    kp("G_0", -m, m, d),
                    kp("G_2", m, 1. - m, -d),
                    kp("G_4", m, -m, -d),
                    kp("G_6", 1. - m, m, d),
                ],
                &[
                    ("G", "Y"),
                    ("Y", "M"),
                    ("M", "A"),
                    ("A", "G"),
                    ("L_2", "G"),
                    ("G", "V_2"),
                ],
            )
        }
        mC3 => {
            let z = (a * a / b / b + (1.0 + a / c * cosb) / sinb / sinb) / 4.0;
            let r = 1.0 - z * b * b / a / a;
            let e = 0.5 - 2.0 * z * c * cosb / a;
            let f = e / 2.0 + a * a / 4.0 / b / b + a * c * cosb / 2.0 / b / b;
            let u = 2.0 * f - z;
            let w = c / 2.0 / a / cosb * (1.0 - 4.0 * u + a * a * sinb * sinb / b / b);
            let d = -0.25 + w / 2.0 - z * c * cosb / a;
            (
                vec![
                    g,
                    kp("Y", h, h, 0.),
                    kp("A", 0., 0., h),
                    kp("M_2", -h, h, h),
                    kp("V", h, 0., 0.),
                    kp("V_2", 0., h, 0.),
                    kp("L_2", 0., h, h),
                    kp("I", -1. + r, r, h),
                    kp("I_2", 1. - r, 1. - r, h),
                    kp("K", -u, u, w),
                    kp("K_2", -1. + u, 1. - u, 1. - w),
                    kp("K_4", 1. - u, u, w),
                    kp("H", -z, z, e),
                    kp("H_2", z, 1. - z, 1. - e),
                    kp("H_4", z, -z, 1. - e),
                    kp("N", -f, f, d),
                    kp("N_2", f, 1. - f, -d),
                    kp("N_4", f, -f, -d),
                    kp("N_6", 1. - f, f, d),
                ],
                &[
                    ("G", "A"),
                    ("A", "I_2"),
                    ("I", "M_2"),
                    ("M_2", "G"),
                    ("G", "Y"),
                    ("L_2", "G"),
                    ("G", "V_2"),
                ],
            )
        }
        oP1 => (
            vec![
                g,
                kp("X", h, 0., 0.),
                kp("Z", 0., 0., h),
                kp("U", h, 0., h),
                kp("Y", 0., h, 0.),
                kp("S", h, h, 0.),
                kp("T", 0., h, h),
                kp("R", h, h, h),
            ],
            &[
                ("G", "X"),
                ("X", "S"),
                ("S", "Y"),
                ("Y", "G"),
                ("G", "Z"),
                ("Z", "U"),
                ("U", "R"),
                ("R", "T"),
                ("T", "Z"),
                ("X", "U"),
                ("Y", "T"),
                ("S", "R"),
            ],
        ),
        oA1 | oC1 => {
            // oA1 uses b/c where oC1 uses a/b
            let x = match class {
                oA1 => (1.0 + b * b / c / c) / 4.0,
                _ => (1.0 + a * a / b / b) / 4.0,
            };
            (
                vec![
                    g,
                    kp("Y", -h, h, 0.),
                    kp("T", -h, h, h),
                    kp("Z", 0., 0., h),
                    kp("S", 0., h, 0.),
                    kp("R", 0., h, h),
                    kp("SIGMA_0", x, x, 0.),
                    kp("C_0", -x, 1. - x, 0.),
                    kp("A_0", x, x, h),
                    kp("E_0", -x, 1. - x, h),
                ],
                &[
                    ("G", "Y"),
                    ("Y", "C_0"),
                    ("SIGMA_0", "G"),
                    ("G", "Z"),
                    ("Z", "A_0"),
                    ("E_0", "T"),
                    ("T", "Y"),
                    ("G", "S"),
                    ("S", "R"),
                    ("R", "Z"),
                    ("Z", "T"),
                ],
            )
        }
        oA2 | oC2 => {
            let x = match class {
                oA2 => (1.0 + c * c / b / b) / 4.0,
                _ => (1.0 + b * b / a / a) / 4.0,
            };
            (
                vec![
                    g,
                    kp("Y", h, h, 0.),
                    kp("T", h, h, h),
                    kp("T_2", h, h, -h),
                    kp("Z", 0., 0., h),
                    kp("Z_2", 0., 0., -h),
                    kp("S", 0., h, 0.),
                    kp("R", 0., h, h),
                    kp("R_2", 0., h, -h),
                    kp("DELTA_0", -x, x, 0.),
                    kp("F_0", x, 1. - x, 0.),
                    kp("B_0", -x, x, h),
                    kp("B_2", -x, x, -h),
                    kp("G_0", x, 1. - x, h),
                    kp("G_2", x, 1. - x, -h),
                ],
                &[
                    ("G", "Y"),
                    ("Y", "F_0"),
                    ("DELTA_0", "G"),
                    ("G", "Z"),
                    ("Z", "B_0"),
                    ("G_0", "T"),
                    ("T", "Y"),
                    ("G", "S"),
                    ("S", "R"),
                    ("R", "Z"),
                    ("Z", "T"),
                ],
            )
        }
        oF1 => {
            let j = (1.0 + a * a / b / b - a * a / c / c) / 4.0;
            let hh = (1.0 + a * a / b / b + a * a / c / c) / 4.0;
            (
                vec![
                    g,
                    kp("T", 1., h, h),
                    kp("Z", h, h, 0.),
                    kp("Y", h, 0., h),
                    kp("SIGMA_0", 0., hh, hh),
                    kp("U_0", 1., 1. - hh, 1. - hh),
                    kp("A_0", h, h + j, j),
                    kp("C_0", h, h - j, 1. - j),
                    kp("L", h, h, h),
                ],
                &[
                    ("G", "Y"),
                    ("Y", "T"),
                    ("T", "Z"),
                    ("Z", "G"),
                    ("G", "SIGMA_0"),
                    ("U_0", "T"),
                    ("Y", "C_0"),
                    ("A_0", "Z"),
                    ("G", "L"),
                ],
            )
        }
        oF2 => {
            let j = (1.0 + c * c / a / a - c * c / b / b) / 4.0;
            let k = (1.0 + c * c / a / a + c * c / b / b) / 4.0;
            (
                vec![
                    g,
                    kp("T", 0., h, h),
                    kp("Z", h, h, 1.),
                    kp("Y", h, 0., h),
                    kp("LAMBDA_0", k, k, 0.),
                    kp("Q_0", 1. - k, 1. - k, 1.),
                    kp("G_0", h - j, 1. - j, h),
                    kp("H_0", h + j, j, h),
                    kp("L", h, h, h),
                ],
                &[
                    ("G", "T"),
                    ("T", "Z"),
                    ("Z", "Y"),
                    ("Y", "G"),
                    ("G", "LAMBDA_0"),
                    ("Q_0", "Z"),
                    ("T", "G_0"),
                    ("H_0", "Y"),
                    ("G", "L"),
                ],
            )
        }
        oF3 => {
            let hh = (1.0 + a * a / b / b - a * a / c / c) / 4.0;
            let k = (1.0 + b * b / a / a - b * b / c / c) / 4.0;
            let pp = (1.0 + c * c / b / b - c * c / a / a) / 4.0;
            (
                vec![
                    g,
                    kp("T", 0., h, h),
                    kp("Z", h, h, 0.),
                    kp("Y", h, 0., h),
                    kp("A_0", h, h + hh, hh),
                    kp("C_0", h, h - hh, 1. - hh),
                    kp("B_0", h + k, h, k),
                    kp("D_0", h - k, h, 1. - k),
                    kp("G_0", pp, h + pp, h),
                    kp("H_0", 1. - pp, h - pp, h),
                    kp("L", h, h, h),
                ],
                &[
                    ("G", "Y"),
                    ("Y", "C_0"),
                    ("A_0", "Z"),
                    ("Z", "B_0"),
                    ("D_0", "T"),
                    ("T", "G_0"),
                    ("H_0", "Y"),
                    ("T", "G"),
                    ("G", "Z"),
                    ("G", "L"),
                ],
            )
        }
        oI1 => {
            let z = (1.0 + a * a / c / c) / 4.0;
            let hh = (1.0 + b * b / c / c) / 4.0;
            let d = (b * b - a * a) / 4.0 / c / c;
            let n = (a * a + b * b) / 4.0 / c / c;
            (
                vec![
                    g,
                    kp("X", h, h, -h),
                    kp("S", h, 0., 0.),
                    kp("R", 0., h, 0.),
                    kp("T", 0., 0., h),
                    kp("W", 0.25, 0.25, 0.25),
                    kp("SIGMA_0", -z, z, z),
                    kp("F_2", z, 1. - z, -z),
                    kp("Y_0", hh, -hh, hh),
                    kp("U_0", 1. - hh, hh, -hh),
                    kp("L_0", -n, n, h - d),
                    kp("M_0", n, -n, h + d),
                    kp("J_0", h - d, h + d, -n),
                ],
                &[
                    ("G", "X"),
                    ("X", "F_2"),
                    ("SIGMA_0", "G"),
                    ("G", "Y_0"),
                    ("U_0", "X"),
                    ("G", "R"),
                    ("R", "W"),
                    ("W", "S"),
                    ("S", "G"),
                    ("G", "T"),
                    ("T", "W"),
                ],
            )
        }
        oI2 => {
            let z = (1.0 + b * b / a / a) / 4.0;
            let hh = (1.0 + c * c / a / a) / 4.0;
            let d = (c * c - b * b) / 4.0 / a / a;
            let n = (b * b + c * c) / 4.0 / a / a;
            (
                vec![
                    g,
                    kp("X", -h, h, h),
                    kp("S", h, 0., 0.),
                    kp("R", 0., h, 0.),
                    kp("T", 0., 0., h),
                    kp("W", 0.25, 0.25, 0.25),
                    kp("Y_0", z, -z, z),
                    kp("U_2", -z, z, 1. - z),
                    kp("LAMBDA_0", hh, hh, -hh),
                    kp("G_2", -hh, 1. - hh, hh),
                    kp("K", h - d, -n, n),
                    kp("K_2", h + d, n, -n),
                    kp("K_4", -n, h - d, h + d),
                ],
                &[
                    ("G", "X"),
                    ("X", "U_2"),
                    ("Y_0", "G"),
                    ("G", "LAMBDA_0"),
                    ("G_2", "X"),
                    ("G", "R"),
                    ("R", "W"),
                    ("W", "S"),
                    ("S", "G"),
                    ("G", "T"),
                    ("T", "W"),
                ],
            )
        }
        oI3 => {
            let z = (1.0 + c * c / b / b) / 4.0;
            let y = (1.0 + a * a / b / b) / 4.0;
            let d = (a * a - c * c) / 4.0 / b / b;
            let m = (c * c + a * a) / 4.0 / b / b;
            (
                vec![
                    g,
                    kp("X", h, -h, h),
                    kp("S", h, 0., 0.),
                    kp("R", 0., h, 0.),
                    kp("T", 0., 0., h),
                    kp("W", 0.25, 0.25, 0.25),
                    kp("SIGMA_0", -y, y, y),
                    kp("F_0", y, -y, 1. - y),
                    kp("LAMBDA_0", z, z, -z),
                    kp("G_0", 1. - z, -z, z),
                    kp("V_0", m, h - d, -m),
                    kp("H_0", -m, h + d, m),
                    kp("H_2", h + d, -m, h - d),
                ],
                &[
                    ("G", "X"),
                    ("X", "F_0"),
                    ("SIGMA_0", "G"),
                    ("G", "LAMBDA_0"),
                    ("G_0", "X"),
                    ("G", "R"),
                    ("R", "W"),
                    ("W", "S"),
                    ("S", "G"),
                    ("G", "T"),
                    ("T", "W"),
                ],
            )
        }
        tP1 => (
            vec![
                g,
                kp("Z", 0., 0., h),
                kp("M", h, h, 0.),
                kp("A", h, h, h),
                kp("R", 0., h, h),
                kp("X", 0., h, 0.),
            ],
            &[
                ("G", "X"),
                ("X", "M"),
                ("M", "G"),
                ("G", "Z"),
                ("Z", "R"),
                ("R", "A"),
                ("A", "Z"),
                ("X", "R"),
                ("M", "A"),
            ],
        ),
        tI1 => {
            let hh = (1.0 + c * c / a / a) / 4.0;
            (
                vec![
                    g,
                    kp("M", -h, h, h),
                    kp("X", 0., 0., h),
                    kp("P", 0.25, 0.25, 0.25),
                    kp("Z", hh, hh, -hh),
                    kp("Z_0", -hh, 1. - hh, hh),
                    kp("N", 0., h, 0.),
                ],
                &[
                    ("G", "X"),
                    ("X", "M"),
                    ("M", "G"),
                    ("G", "Z"),
                    ("Z_0", "M"),
                    ("X", "P"),
                    ("P", "N"),
                    ("N", "G"),
                ],
            )
        }
        tI2 => {
            let hh = (1.0 + a * a / c / c) / 4.0;
            let z = a * a / 2.0 / c / c;
            (
                vec![
                    g,
                    kp("M", h, h, -h),
                    kp("X", 0., 0., h),
                    kp("P", 0.25, 0.25, 0.25),
                    kp("N", 0., h, 0.),
                    kp("S_0", -hh, hh, hh),
                    kp("S", hh, 1. - hh, -hh),
                    kp("R", -z, z, h),
                    kp("G_0", h, h, -z),
                ],
                &[
                    ("G", "X"),
                    ("X", "P"),
                    ("P", "N"),
                    ("N", "G"),
                    ("G", "M"),
                    ("M", "S"),
                    ("S_0", "G"),
                    ("X", "R"),
                    ("G_0", "M"),
                ],
            )
        }
        hR1 => {
            let d = a * a / 4.0 / c / c;
            let y = 5.0 / 6.0 - 2.0 * d;
            let n = 1.0 / 3.0 + d;
            (
                vec![
                    g,
                    kp("T", h, h, h),
                    kp("L", h, 0., 0.),
                    kp("L_2", 0., -h, 0.),
                    kp("L_4", 0., 0., -h),
                    kp("F", h, 0., h),
                    kp("F_2", h, h, 0.),
                    kp("S_0", n, -n, 0.),
                    kp("S_2", 1. - n, 0., n),
                    kp("S_4", n, 0., -n),
                    kp("S_6", 1. - n, n, 0.),
                    kp("H_0", h, -1. + y, 1. - y),
                    kp("H_2", y, 1. - y, h),
                    kp("H_4", y, h, 1. - y),
                    kp("H_6", h, 1. - y, -1. + y),
                    kp("M_0", n, -1. + y, n),
                    kp("M_2", 1. - n, 1. - y, 1. - n),
                    kp("M_4", y, n, n),
                    kp("M_6", 1. - n, 1. - n, 1. - y),
                    kp("M_8", n, n, -1. + y),
                ],
                &[
                    ("G", "T"),
                    ("T", "H_2"),
                    ("H_0", "L"),
                    ("L", "G"),
                    ("G", "S_0"),
                    ("S_2", "F"),
                    ("F", "G"),
                ],
            )
        }
        hR2 => {
            let z = 1.0 / 6.0 - c * c / 9.0 / a / a;
            let hh = 0.5 - 2.0 * z;
            let n = 0.5 + z;
            (
                vec![
                    g,
                    kp("T", h, -h, h),
                    kp("P_0", hh, -1. + hh, hh),
                    kp("P_2", hh, hh, hh),
                    kp("R_0", 1. - hh, -hh, -hh),
                    kp("M", 1. - n, -n, 1. - n),
                    kp("M_2", n, -1. + n, -1. + n),
                    kp("L", h, 0., 0.),
                    kp("F", h, -h, 0.),
                ],
                &[("G", "L"), ("L", "T"), ("T", "P_0"), ("P_2", "G"), ("G", "F")],
            )
        }
        hP1 | hP2 => {
            let points = vec![
                g,
                kp("A", 0., 0., h),
                kp("K", 1. / 3., 1. / 3., 0.),
                kp("H", 1. / 3., 1. / 3., h),
                kp("H_2", 1. / 3., 1. / 3., -h),
                kp("M", h, 0., 0.),
                kp("L", h, 0., h),
            ];
            let segments: Segments = if class == hP1 {
                &[
                    ("G", "M"),
                    ("M", "K"),
                    ("K", "G"),
                    ("G", "A"),
                    ("A", "L"),
                    ("L", "H"),
                    ("H", "A"),
                    ("L", "M"),
                    ("H", "K"),
                    ("K", "H_2"),
                ]
            } else {
                &[
                    ("G", "M"),
                    ("M", "K"),
                    ("K", "G"),
                    ("G", "A"),
                    ("A", "L"),
                    ("L", "H"),
                    ("H", "A"),
                    ("L", "M"),
                    ("H", "K"),
                ]
            };
            (points, segments)
        }
        cP1 | cP2 => {
            let points = vec![
                g,
                kp("R", h, h, h),
                kp("M", h, h, 0.),
                kp("X", 0., h, 0.),
                kp("X_1", h, 0., 0.),
            ];
            let segments: Segments = if class == cP1 {
                &[
                    ("G", "X"),
                    ("X", "M"),
                    ("M", "G"),
                    ("G", "R"),
                    ("R", "X"),
                    ("R", "M"),
                    ("M", "X_1"),
                ]
            } else {
                &[("G", "X"), ("X", "M"), ("M", "G"), ("G", "R"), ("R", "X"), ("R", "M")]
            };
            (points, segments)
        }
        cF1 | cF2 => {
            let points = vec![
                g,
                kp("X", h, 0., h),
                kp("L", h, h, h),
                kp("W", h, 0.25, 0.75),
                kp("W_2", 0.75, 0.25, h),
                kp("K", 0.375, 0.375, 0.75),
                kp("U", 0.625, 0.25, 0.625),
            ];
            let segments: Segments = if class == cF1 {
                &[
                    ("G", "X"),
                    ("X", "U"),
                    ("K", "G"),
                    ("G", "L"),
                    ("L", "W"),
                    ("W", "X"),
                    ("X", "W_2"),
                ]
            } else {
                &[("G", "X"), ("X", "U"), ("K", "G"), ("G", "L"), ("L", "W"), ("W", "X")]
            };
            (points, segments)
        }
        cI1 => (
            vec![
                g,
                kp("H", h, -h, h),
                kp("P", 0.25, 0.25, 0.25),
                kp("N", 0., 0., h),
            ],
            &[("G", "H"), ("H", "N"), ("N", "G"), ("G", "P"), ("P", "H"), ("P", "N")],
        ),
    }
}
