// src/io/poscar.rs

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::elements::element_symbol;
use crate::model::{Atom, Structure};
use crate::utils::linalg;

const WHAT: &str = "POSCAR";

pub fn parse(path: impl AsRef<Path>) -> Result<Structure> {
    let text = fs::read_to_string(path.as_ref())?;
    log::debug!("Parsing POSCAR {}", path.as_ref().display());
    parse_str(&text)
}

/// Reads VASP 4 and VASP 5 style POSCAR/CONTCAR text.
pub fn parse_str(text: &str) -> Result<Structure> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut last = 0;
    let mut next_line = |expect: &str| match lines.next() {
        Some((no, line)) => {
            last = no;
            Ok((no, line))
        }
        None => Err(Error::parse(
            WHAT,
            last + 1,
            format!("unexpected end of file, missing {}", expect),
        )),
    };

    // 1. Comment
    let (_, comment) = next_line("comment line")?;
    let title = comment.trim().to_string();

    // 2. Scale: multiplier, negative target volume, or per-axis factors
    let (scale_no, scale_line) = next_line("scaling factor")?;
    let scale_vals = parse_floats(scale_line, scale_no)?;

    // 3. Lattice
    let mut raw_lattice = [[0.0; 3]; 3];
    for row in raw_lattice.iter_mut() {
        let (no, line) = next_line("lattice vector")?;
        *row = parse_vec3(line, no)?;
    }

    let axis_scale = match scale_vals.as_slice() {
        [s] if *s > 0.0 => [*s; 3],
        [v] if *v < 0.0 => {
            let raw_volume = linalg::determinant(&raw_lattice).abs();
            if raw_volume < 1e-10 {
                return Err(Error::parse(WHAT, scale_no, "cannot rescale a degenerate lattice to a volume"));
            }
            [(v.abs() / raw_volume).cbrt(); 3]
        }
        [sx, sy, sz] if *sx > 0.0 && *sy > 0.0 && *sz > 0.0 => [*sx, *sy, *sz],
        _ => {
            return Err(Error::parse(
                WHAT,
                scale_no,
                format!("invalid scaling factor '{}'", scale_line.trim()),
            ))
        }
    };

    let mut lattice = raw_lattice;
    for row in lattice.iter_mut() {
        for (x, s) in row.iter_mut().zip(axis_scale) {
            *x *= s;
        }
    }

    // 4. Species & Counts
    let (no6, line6) = next_line("species or counts")?;
    let starts_alpha = line6
        .trim()
        .chars()
        .next()
        .map(|c| c.is_alphabetic())
        .unwrap_or(false);

    let (species, counts): (Vec<String>, Vec<usize>) = if starts_alpha {
        let species = line6.split_whitespace().map(element_symbol).collect();
        let (no7, line7) = next_line("atom counts")?;
        (species, parse_counts(line7, no7)?)
    } else {
        // VASP 4: species only live in the comment line, if anywhere
        let counts = parse_counts(line6, no6)?;
        let from_comment: Vec<String> = title.split_whitespace().map(element_symbol).collect();
        if from_comment.len() != counts.len() {
            return Err(Error::Format(
                "POSCAR has no species line and the comment does not name the species".to_string(),
            ));
        }
        (from_comment, counts)
    };

    if species.len() != counts.len() {
        return Err(Error::Format(format!(
            "POSCAR lists {} species but {} counts",
            species.len(),
            counts.len()
        )));
    }

    // 5. Mode (optionally preceded by Selective dynamics)
    let (mut mode_no, mut mode_line) = next_line("coordinate mode")?;
    if mode_line.trim_start().starts_with(['s', 'S']) {
        (mode_no, mode_line) = next_line("coordinate mode")?;
    }
    let is_direct = match mode_line.trim_start().chars().next() {
        Some('d') | Some('D') => true,
        Some('c') | Some('C') | Some('k') | Some('K') => false,
        _ => {
            return Err(Error::parse(
                WHAT,
                mode_no,
                format!("unknown coordinate mode '{}'", mode_line.trim()),
            ))
        }
    };

    // 6. Atoms
    let mut atoms = Vec::with_capacity(counts.iter().sum());
    for (element, &count) in species.iter().zip(&counts) {
        for _ in 0..count {
            let (no, line) = next_line("atomic position")?;
            let mut pos = parse_vec3(line, no)?;

            if is_direct {
                pos = linalg::frac_to_cart(pos, &lattice);
            } else {
                for (x, s) in pos.iter_mut().zip(axis_scale) {
                    *x *= s;
                }
            }

            atoms.push(Atom {
                element: element.clone(),
                position: pos,
            });
        }
    }

    log::debug!("POSCAR '{}': {} atoms, {} species", title, atoms.len(), species.len());
    Ok(Structure::new(title, lattice, atoms))
}

pub fn write(path: impl AsRef<Path>, structure: &Structure) -> Result<()> {
    fs::write(path, to_string(structure)?)?;
    Ok(())
}

/// Direct coordinates, unit scale, species grouped in first-appearance order.
pub fn to_string(structure: &Structure) -> Result<String> {
    let fracs = structure.fractional_positions()?;
    let counts = structure.species_counts();
    let mut out = String::new();

    // 1. Header
    let title = if structure.title.trim().is_empty() {
        structure.formula()
    } else {
        structure.title.replace(['\n', '\r'], " ")
    };
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "1.0");

    // 2. Lattice Vectors
    for vec in &structure.lattice {
        let _ = writeln!(out, " {:22.16} {:22.16} {:22.16}", vec[0], vec[1], vec[2]);
    }

    // 3. Labels & Counts
    for (label, _) in &counts {
        let _ = write!(out, " {:<4}", label);
    }
    out.push('\n');
    for (_, count) in &counts {
        let _ = write!(out, " {:<4}", count);
    }
    out.push('\n');

    // 4. Atomic Positions
    let _ = writeln!(out, "Direct");
    for (label, _) in &counts {
        for (atom, f) in structure.atoms.iter().zip(&fracs) {
            if atom.element == *label {
                let _ = writeln!(out, " {:20.16} {:20.16} {:20.16}", f[0], f[1], f[2]);
            }
        }
    }

    Ok(out)
}

// --- Raw view used by the comparator ---

/// POSCAR fields read at fixed line offsets, without any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoscar {
    pub lattice_parameters: Vec<f64>,
    pub lattice_vectors: [Vec<f64>; 3],
    pub atom_types: Vec<String>,
    pub atom_numbers: Vec<i64>,
    pub atomic_positions: Vec<Vec<f64>>,
}

pub fn read_raw(text: &str) -> Result<RawPoscar> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 7 {
        return Err(Error::parse(
            WHAT,
            lines.len(),
            "expected at least 7 header lines",
        ));
    }

    let lattice_parameters = parse_floats(lines[1], 2)?;
    let lattice_vectors = [
        parse_floats(lines[2], 3)?,
        parse_floats(lines[3], 4)?,
        parse_floats(lines[4], 5)?,
    ];
    let atom_types = lines[5].split_whitespace().map(str::to_string).collect();
    let atom_numbers = lines[6]
        .split_whitespace()
        .map(|t| {
            t.parse::<i64>()
                .map_err(|_| Error::parse(WHAT, 7, format!("'{}' is not an integer", t)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut start = 7;
    while let Some(line) = lines.get(start) {
        let key = line.trim().to_lowercase();
        if key == "direct" || key == "cartesian" || key == "selective dynamics" {
            start += 1;
        } else {
            break;
        }
    }

    let mut atomic_positions = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(start) {
        if line.trim().is_empty() {
            continue;
        }
        let floats: Vec<&str> = line.split_whitespace().take(3).collect();
        let row = parse_floats(&floats.join(" "), i + 1)?;
        atomic_positions.push(row);
    }

    Ok(RawPoscar {
        lattice_parameters,
        lattice_vectors,
        atom_types,
        atom_numbers,
        atomic_positions,
    })
}

// --- Line helpers ---

fn parse_floats(line: &str, line_no: usize) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| Error::parse(WHAT, line_no, format!("'{}' is not a number", t)))
        })
        .collect()
}

fn parse_vec3(line: &str, line_no: usize) -> Result<[f64; 3]> {
    let vals: Vec<f64> = line
        .split_whitespace()
        .take(3)
        .map(|t| t.parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::parse(WHAT, line_no, format!("expected three numbers, got '{}'", line.trim())))?;
    match vals.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(Error::parse(
            WHAT,
            line_no,
            format!("expected three numbers, got '{}'", line.trim()),
        )),
    }
}

fn parse_counts(line: &str, line_no: usize) -> Result<Vec<usize>> {
    line.split_whitespace()
        .map(|t| {
            t.parse::<usize>()
                .map_err(|_| Error::parse(WHAT, line_no, format!("'{}' is not an atom count", t)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SI_DIRECT: &str = "\
Si diamond
5.43
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
Si
2
Direct
0.00 0.00 0.00
0.25 0.25 0.25
";

    #[test]
    fn test_parse_vasp5_direct() {
        let s = parse_str(SI_DIRECT).unwrap();
        assert_eq!(s.title, "Si diamond");
        assert_eq!(s.atoms.len(), 2);
        assert!((s.lattice[0][0] - 5.43).abs() < 1e-12);
        assert!((s.atoms[1].position[2] - 1.3575).abs() < 1e-12);
    }

    #[test]
    fn test_parse_vasp4_species_from_comment() {
        let text = "Ga As\n1.0\n5.6 0 0\n0 5.6 0\n0 0 5.6\n1 1\nCartesian\n0 0 0\n1.4 1.4 1.4\n";
        let s = parse_str(text).unwrap();
        assert_eq!(s.species(), vec!["Ga".to_string(), "As".to_string()]);
        assert!((s.atoms[1].position[0] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_parse_vasp4_without_species_fails() {
        let text = "some cell\n1.0\n5.6 0 0\n0 5.6 0\n0 0 5.6\n1 1\nDirect\n0 0 0\n0.5 0.5 0.5\n";
        assert!(matches!(parse_str(text), Err(Error::Format(_))));
    }

    #[test]
    fn test_selective_dynamics_and_cartesian_scale() {
        let text = "\
NaCl
2.0
2.0 0.0 0.0
0.0 2.0 0.0
0.0 0.0 2.0
Na Cl
1 1
Selective dynamics
Cartesian
0.0 0.0 0.0 T T T
1.0 1.0 1.0 F F F
";
        let s = parse_str(text).unwrap();
        assert!((s.lattice[2][2] - 4.0).abs() < 1e-12);
        assert!((s.atoms[1].position[0] - 2.0).abs() < 1e-12);
        assert_eq!(s.atoms[1].element, "Cl");
    }

    #[test]
    fn test_negative_scale_is_volume() {
        let text = "cube\n-27.0\n1 0 0\n0 1 0\n0 0 1\nFe\n1\nDirect\n0 0 0\n";
        let s = parse_str(text).unwrap();
        assert!((s.volume() - 27.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_atom_line_names_position() {
        let text = "Si\n1.0\n5 0 0\n0 5 0\n0 0 5\nSi\n2\nDirect\n0 0 0\n";
        match parse_str(text) {
            Err(Error::Parse { line, message, .. }) => {
                assert_eq!(line, 10);
                assert!(message.contains("atomic position"));
            }
            other => panic!("unexpected: {:?}", other),
        }

        match parse_str("Si\n1.0\n5 0 0\n") {
            Err(Error::Parse { line, message, .. }) => {
                assert_eq!(line, 4);
                assert!(message.contains("lattice vector"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(parse_str(""), Err(Error::Parse { line: 1, .. })));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let text = "Si\n1.0\n5 0 0\n0 x 0\n0 0 5\nSi\n1\nDirect\n0 0 0\n";
        match parse_str(text) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_writer_groups_species() {
        let lattice = [[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]];
        let elements: Vec<String> = ["O", "Ti", "O"].iter().map(|s| s.to_string()).collect();
        let fracs = [[0.0, 0.0, 0.5], [0.5, 0.5, 0.5], [0.5, 0.0, 0.0]];
        let s = Structure::from_fractional("TiO2 test", lattice, &elements, &fracs);

        let text = to_string(&s).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "TiO2 test");
        assert_eq!(lines[5].split_whitespace().collect::<Vec<_>>(), vec!["O", "Ti"]);
        assert_eq!(lines[6].split_whitespace().collect::<Vec<_>>(), vec!["2", "1"]);
        assert_eq!(lines[7], "Direct");

        let back = parse_str(&text).unwrap();
        assert_eq!(back.atoms.len(), 3);
        assert_eq!(back.atoms[1].element, "O");
        assert!((back.atoms[1].position[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_read_raw_offsets() {
        let raw = read_raw(SI_DIRECT).unwrap();
        assert_eq!(raw.lattice_parameters, vec![5.43]);
        assert_eq!(raw.lattice_vectors[1], vec![0.0, 1.0, 0.0]);
        assert_eq!(raw.atom_types, vec!["Si".to_string()]);
        assert_eq!(raw.atom_numbers, vec![2]);
        assert_eq!(raw.atomic_positions.len(), 2);
        assert_eq!(raw.atomic_positions[1], vec![0.25, 0.25, 0.25]);
    }
}
