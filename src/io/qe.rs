use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::elements::element_symbol;
use crate::model::{Atom, Structure};
use crate::utils::linalg::{self, Rows3};

pub const BOHR_TO_ANG: f64 = 0.529177210903;

const WHAT: &str = "QE";

pub fn parse(path: impl AsRef<Path>) -> Result<Structure> {
    let content = fs::read_to_string(path.as_ref())?;
    log::debug!("Parsing QE file {}", path.as_ref().display());
    parse_str(&content)
}

pub fn parse_str(content: &str) -> Result<Structure> {
    // Heuristic: Output files contain execution markers
    if is_output(content) {
        parse_output(content)
    } else {
        parse_input(content)
    }
}

pub fn is_output(content: &str) -> bool {
    content.contains("Program PWSCF")
        || content.contains("JOB DONE")
        || content.contains("unit-cell volume")
        || content.contains("lattice parameter (alat)")
}

/// Length unit of a CELL_PARAMETERS or ATOMIC_POSITIONS block.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Unit {
    /// Multiples of alat (stored in Angstrom)
    Alat(f64),
    Bohr,
    Angstrom,
    Crystal,
}

impl Unit {
    fn scale(self) -> f64 {
        match self {
            Unit::Alat(a) => a,
            Unit::Bohr => BOHR_TO_ANG,
            Unit::Angstrom | Unit::Crystal => 1.0,
        }
    }
}

/// Sites as read, resolved against the final cell once it is known.
struct Sites {
    unit: Unit,
    entries: Vec<(String, [f64; 3])>,
}

impl Sites {
    fn resolve(self, lattice: &Rows3) -> Vec<Atom> {
        let unit = self.unit;
        self.entries
            .into_iter()
            .map(|(label, v)| {
                let position = match unit {
                    Unit::Crystal => linalg::frac_to_cart(v, lattice),
                    _ => v.map(|x| x * unit.scale()),
                };
                Atom {
                    element: element_symbol(&label),
                    position,
                }
            })
            .collect()
    }
}

// =======================
//   QE OUTPUT PARSER
// =======================

/// Reads the last structure of a pw.x log: the initial cell and sites,
/// replaced by every later relaxation step.
fn parse_output(content: &str) -> Result<Structure> {
    let mut alat = 0.0;
    let mut lattice: Option<Rows3> = None;
    let mut sites: Option<Sites> = None;
    let mut steps = 0usize;

    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        let lower = line.to_lowercase();

        // lattice parameter (alat)  =      10.2000  a.u.
        if lower.contains("lattice parameter (alat)") {
            if let Some(val) = extract_val(line, "=") {
                alat = val * BOHR_TO_ANG;
            }
        } else if lower.starts_with("crystal axes:") {
            //   a(1) = (  -0.500000   0.000000   0.500000 )
            let mut rows = [[0.0; 3]; 3];
            for (k, row) in rows.iter_mut().enumerate() {
                let no = i + 2 + k;
                let axis_line = lines
                    .get(no - 1)
                    .ok_or_else(|| Error::parse(WHAT, no, "crystal axes table is truncated"))?;
                *row = paren_vec3(axis_line)
                    .ok_or_else(|| Error::parse(WHAT, no, "expected a(i) = ( x y z )"))?
                    .map(|x| x * alat);
            }
            lattice = Some(rows);
            i += 4;
            continue;
        } else if lower.starts_with("site n.") && lower.contains("(alat units)") {
            let mut entries = Vec::new();
            i += 1;
            while let Some(site_line) = lines.get(i) {
                if !site_line.contains("tau(") {
                    break;
                }
                let label = site_line.split_whitespace().nth(1).unwrap_or("X");
                let pos = paren_vec3(site_line)
                    .ok_or_else(|| Error::parse(WHAT, i + 1, "malformed site line"))?;
                entries.push((label.to_string(), pos));
                i += 1;
            }
            sites = Some(Sites {
                unit: Unit::Alat(alat),
                entries,
            });
            continue;
        } else if lower.starts_with("cell_parameters") {
            let unit = parse_header_unit(line, alat, Unit::Alat(alat));
            lattice = Some(read_cell_block(&lines, i, unit)?);
            i += 4;
            continue;
        } else if lower.starts_with("atomic_positions") {
            let unit = parse_header_unit(line, alat, Unit::Alat(alat));
            let (block, next) = read_positions_block(&lines, i + 1);
            // Keep only the latest step
            sites = Some(Sites { unit, entries: block });
            steps += 1;
            i = next;
            continue;
        }
        i += 1;
    }

    let final_lattice =
        lattice.ok_or_else(|| Error::Format("no cell found in QE output".to_string()))?;
    let atoms = sites
        .map(|s| s.resolve(&final_lattice))
        .filter(|atoms| !atoms.is_empty())
        .ok_or_else(|| Error::Format("no atomic positions found in QE output".to_string()))?;

    log::debug!("QE output: {} atoms after {} relaxation steps", atoms.len(), steps);

    let mut structure = Structure::new(String::new(), final_lattice, atoms);
    structure.title = structure.formula();
    Ok(structure)
}

// =======================
//   QE INPUT PARSER
// =======================
fn parse_input(content: &str) -> Result<Structure> {
    let mut ibrav = 0;
    let mut alat = 0.0;
    let mut c_over_a: Option<f64> = None;
    let mut c_length: Option<f64> = None;
    let lines: Vec<&str> = content.lines().collect();

    // Pass 1: namelist values, several per line allowed
    for line in &lines {
        let trimmed = line.trim();
        if trimmed.starts_with('!') || trimmed.starts_with('#') {
            continue;
        }
        let body = trimmed.split('!').next().unwrap_or("");
        for assignment in body.split(',') {
            let Some((key, value)) = assignment.split_once('=') else {
                continue;
            };
            let key = key.to_lowercase().replace(' ', "");
            let Some(val) = clean_and_parse_first_number(value) else {
                continue;
            };
            match key.as_str() {
                "ibrav" => ibrav = val as i32,
                "celldm(1)" => alat = val * BOHR_TO_ANG,
                "a" => alat = val,
                "celldm(3)" => c_over_a = Some(val),
                "c" => c_length = Some(val),
                _ => {}
            }
        }
    }

    // Pass 2: Cards
    let mut lattice = None;
    let mut sites: Option<Sites> = None;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        let lower = line.to_lowercase();

        if lower.starts_with("cell_parameters") {
            let unit = parse_header_unit(line, alat, Unit::Alat(alat));
            lattice = Some(read_cell_block(&lines, i, unit)?);
            i += 4;
            continue;
        }

        if lower.starts_with("atomic_positions") {
            let unit = parse_header_unit(line, alat, Unit::Alat(alat));
            let (entries, next) = read_positions_block(&lines, i + 1);
            sites = Some(Sites { unit, entries });
            i = next;
            continue;
        }
        i += 1;
    }

    // Determine Final Lattice
    let final_lattice = match lattice {
        Some(l) => l,
        None => {
            let c = c_length.or(c_over_a.map(|r| r * alat));
            generate_lattice_from_ibrav(ibrav, alat, c).ok_or_else(|| {
                Error::Format(format!(
                    "unsupported ibrav {} or missing CELL_PARAMETERS (alat={})",
                    ibrav, alat
                ))
            })?
        }
    };

    let atoms = sites
        .map(|s| s.resolve(&final_lattice))
        .filter(|atoms| !atoms.is_empty())
        .ok_or_else(|| Error::Format("no ATOMIC_POSITIONS card in QE input".to_string()))?;

    let mut structure = Structure::new(String::new(), final_lattice, atoms);
    structure.title = structure.formula();
    Ok(structure)
}

// =======================
//   HELPERS
// =======================

fn generate_lattice_from_ibrav(ibrav: i32, a: f64, c: Option<f64>) -> Option<Rows3> {
    if a <= 1e-6 {
        return None;
    }

    // Standard QE Vectors (Symmetric)
    match ibrav {
        1 => {
            // Simple Cubic
            Some([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
        }
        2 => {
            // FCC
            let h = a / 2.0;
            Some([[-h, 0.0, h], [0.0, h, h], [-h, h, 0.0]])
        }
        3 => {
            // BCC
            let h = a / 2.0;
            Some([[h, h, h], [-h, h, h], [-h, -h, h]])
        }
        4 => {
            // Hexagonal
            let c = c?;
            Some([
                [a, 0.0, 0.0],
                [-0.5 * a, 0.75f64.sqrt() * a, 0.0],
                [0.0, 0.0, c],
            ])
        }
        _ => None,
    }
}

fn read_cell_block(lines: &[&str], header: usize, unit: Unit) -> Result<Rows3> {
    let mut rows = [[0.0; 3]; 3];
    for (k, row) in rows.iter_mut().enumerate() {
        let idx = header + 1 + k;
        let line = lines
            .get(idx)
            .ok_or_else(|| Error::parse(WHAT, idx + 1, "CELL_PARAMETERS needs three rows"))?;
        let v = parse_vec3(line)
            .ok_or_else(|| Error::parse(WHAT, idx + 1, "expected three numbers"))?;
        *row = v.map(|x| x * unit.scale());
    }
    Ok(rows)
}

/// Reads `label x y z [flags]` lines until the block ends.
/// Returns the entries and the index of the first line after the block.
fn read_positions_block(lines: &[&str], start: usize) -> (Vec<(String, [f64; 3])>, usize) {
    let mut entries = Vec::new();
    let mut i = start;
    while let Some(raw) = lines.get(i) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('/') || line.starts_with('&') || line.starts_with("End") {
            break;
        }
        let mut parts = line.split_whitespace();
        let Some(label) = parts.next() else { break };
        let rest: Vec<&str> = parts.collect();
        let Some(pos) = parse_vec3(&rest.join(" ")) else {
            // next card
            break;
        };
        entries.push((label.to_string(), pos));
        i += 1;
    }
    (entries, i)
}

fn parse_header_unit(header: &str, global_alat: f64, default: Unit) -> Unit {
    let lower = header.to_lowercase();

    if lower.contains("alat=") || lower.contains("alat =") {
        if let Some(val) = extract_val(&lower, "=") {
            return Unit::Alat(val * BOHR_TO_ANG);
        }
    }

    if lower.contains("angstrom") {
        Unit::Angstrom
    } else if lower.contains("bohr") {
        Unit::Bohr
    } else if lower.contains("crystal") {
        Unit::Crystal
    } else if lower.contains("alat") {
        Unit::Alat(global_alat)
    } else {
        default
    }
}

/// Handles comments, commas and Fortran 'd' notation
fn extract_val(line: &str, delimiter: &str) -> Option<f64> {
    let part = line.split(delimiter).nth(1)?;
    clean_and_parse_first_number(part)
}

/// `... = ( x y z )` as printed in pw.x logs
fn paren_vec3(line: &str) -> Option<[f64; 3]> {
    let (_, after_eq) = line.split_once('=')?;
    let inner = after_eq.trim().trim_start_matches('(');
    let inner = inner.split(')').next()?;
    parse_vec3(inner)
}

/// First three numbers of a line, or None when there are fewer
fn parse_vec3(line: &str) -> Option<[f64; 3]> {
    let body = line.split('!').next()?;
    let nums: Vec<f64> = body
        .replace(',', " ")
        .split_whitespace()
        .take(3)
        .map(clean_and_parse_first_number)
        .collect::<Option<_>>()?;
    match nums.as_slice() {
        [x, y, z] => Some([*x, *y, *z]),
        _ => None,
    }
}

/// Cleans a string chunk (e.g. "1.0d-8,") and parses it
fn clean_and_parse_first_number(raw: &str) -> Option<f64> {
    // 1. Remove comments
    let pre_comment = raw.split('!').next()?.split('#').next()?;

    // 2. Remove commas (QE often uses commas as delimiters)
    let no_comma = pre_comment.replace(',', " ");

    // 3. Find first token
    let token = no_comma
        .split_whitespace()
        .next()?
        .trim_matches(|c| c == '(' || c == ')');

    // 4. Replace Fortran 'd'/'D' with 'e' (e.g. 1.0d-8 -> 1.0e-8)
    let float_str = token.to_lowercase().replace('d', "e");

    float_str.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCF_OUT: &str = "
     Program PWSCF v.7.2 starts on 19Oct2026 at 10:00:00

     bravais-lattice index     =            2
     lattice parameter (alat)  =      10.2000  a.u.
     unit-cell volume          =     265.3020 (a.u.)^3

     crystal axes: (cart. coord. in units of alat)
               a(1) = (  -0.500000   0.000000   0.500000 )
               a(2) = (   0.000000   0.500000   0.500000 )
               a(3) = (  -0.500000   0.500000   0.000000 )

     site n.     atom                  positions (alat units)
         1           Si  tau(   1) = (   0.0000000   0.0000000   0.0000000  )
         2           Si  tau(   2) = (   0.2500000   0.2500000   0.2500000  )

     JOB DONE.
";

    #[test]
    fn test_scf_output_initial_structure() {
        let s = parse_str(SCF_OUT).unwrap();
        let alat = 10.2 * BOHR_TO_ANG;
        assert_eq!(s.atoms.len(), 2);
        assert!((s.lattice[0][0] + 0.5 * alat).abs() < 1e-9);
        assert!((s.lattice[2][1] - 0.5 * alat).abs() < 1e-9);
        assert!((s.atoms[1].position[0] - 0.25 * alat).abs() < 1e-9);
        assert_eq!(s.title, "Si2");
    }

    #[test]
    fn test_relax_output_last_step_wins() {
        let text = format!(
            "{}
CELL_PARAMETERS (angstrom)
   -2.800000000   0.000000000   2.800000000
    0.000000000   2.800000000   2.800000000
   -2.800000000   2.800000000   0.000000000

ATOMIC_POSITIONS (crystal)
Si            0.0000000000        0.0000000000        0.0000000000
Si            0.2400000000        0.2500000000        0.2500000000
End final coordinates
",
            SCF_OUT
        );
        let s = parse_str(&text).unwrap();
        assert!((s.lattice[0][0] + 2.8).abs() < 1e-12);
        let frac = s.fractional_positions().unwrap();
        assert!((frac[1][0] - 0.24).abs() < 1e-9);
    }

    #[test]
    fn test_output_without_cell_fails() {
        let err = parse_str("     Program PWSCF v.7.2\n     JOB DONE.\n").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_input_with_ibrav_and_crystal_positions() {
        let text = "\
&SYSTEM
   ibrav = 2, celldm(1) = 10.2d0
   nat = 2, ntyp = 1
/
ATOMIC_SPECIES
Si 28.085 Si.pbe-n-rrkjus_psl.1.0.0.UPF

ATOMIC_POSITIONS crystal
Si1 0.00 0.00 0.00
Si2 0.25 0.25 0.25
K_POINTS automatic
4 4 4 0 0 0
";
        let s = parse_str(text).unwrap();
        let alat = 10.2 * BOHR_TO_ANG;
        assert!((s.lattice[0][0] + alat / 2.0).abs() < 1e-9);
        assert_eq!(s.atoms[0].element, "Si");
        assert_eq!(s.atoms.len(), 2);
        let frac = s.fractional_positions().unwrap();
        assert!((frac[1][2] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_input_cell_parameters_in_bohr() {
        let text = "\
&SYSTEM
  ibrav = 0
/
CELL_PARAMETERS bohr
  10.0 0.0 0.0
  0.0 10.0 0.0
  0.0 0.0 10.0
ATOMIC_POSITIONS angstrom
O 0.0 0.0 0.0 0 0 0
H 0.757 0.586 0.0
";
        let s = parse_str(text).unwrap();
        assert!((s.lattice[1][1] - 10.0 * BOHR_TO_ANG).abs() < 1e-12);
        assert_eq!(s.atoms[1].element, "H");
        assert!((s.atoms[1].position[0] - 0.757).abs() < 1e-12);
    }

    #[test]
    fn test_hexagonal_needs_c() {
        let text = "&SYSTEM\n ibrav = 4, A = 3.0\n/\nATOMIC_POSITIONS crystal\nC 0 0 0\n";
        assert!(parse_str(text).is_err());

        let text = "&SYSTEM\n ibrav = 4, A = 3.0, celldm(3) = 2.0\n/\nATOMIC_POSITIONS crystal\nC 0 0 0.5\n";
        let s = parse_str(text).unwrap();
        assert!((s.lattice[2][2] - 6.0).abs() < 1e-12);
        assert!((s.atoms[0].position[2] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_alat_header_unit() {
        let unit = parse_header_unit("CELL_PARAMETERS (alat= 10.20000000)", 0.0, Unit::Angstrom);
        assert_eq!(unit, Unit::Alat(10.2 * BOHR_TO_ANG));
        assert_eq!(parse_header_unit("ATOMIC_POSITIONS {crystal}", 1.0, Unit::Angstrom), Unit::Crystal);
    }

    #[test]
    fn test_number_cleanup() {
        assert_eq!(clean_and_parse_first_number(" 1.0d-2, "), Some(0.01));
        assert_eq!(clean_and_parse_first_number("2.5 ! comment"), Some(2.5));
        assert_eq!(parse_vec3("1.0, 2.0, 3.0"), Some([1.0, 2.0, 3.0]));
        assert_eq!(parse_vec3("K_POINTS automatic"), None);
    }
}
