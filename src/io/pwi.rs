// src/io/pwi.rs
//
// pw.x input decks in the layout of ASE's espresso-in writer:
// namelists, ATOMIC_SPECIES, K_POINTS, CELL_PARAMETERS, ATOMIC_POSITIONS.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::io::namelist::fortran_value;
use crate::model::elements::atomic_mass;
use crate::model::Structure;
use crate::template::DeckTemplate;
use crate::utils::linalg::{self, Rows3};

/// Sections pw.x always receives, in this order.
const PW_SECTIONS: [&str; 5] = ["control", "system", "electrons", "ions", "cell"];

/// A labelled point of a `crystal_b` path, in reciprocal crystal coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPoint {
    pub label: String,
    pub coords: [f64; 3],
    pub weight: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KPoints {
    Gamma,
    Automatic { grid: [u32; 3], shift: [u32; 3] },
    CrystalB(Vec<PathPoint>),
}

impl KPoints {
    /// Template spacing first, then the explicit grid, else Gamma only.
    pub fn from_template(template: &DeckTemplate, lattice: &Rows3) -> Result<Self> {
        let shift = template.koffset.unwrap_or([0, 0, 0]);
        if let Some(spacing) = template.kspacing {
            let grid = kspacing_to_grid(lattice, spacing)?;
            log::debug!("kspacing {} -> grid {:?}", spacing, grid);
            Ok(KPoints::Automatic { grid, shift })
        } else if let Some(grid) = template.kpts {
            Ok(KPoints::Automatic { grid, shift })
        } else {
            Ok(KPoints::Gamma)
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            KPoints::Gamma => {
                out.push_str("K_POINTS gamma\n");
            }
            KPoints::Automatic { grid, shift } => {
                out.push_str("K_POINTS automatic\n");
                let _ = writeln!(
                    out,
                    "{} {} {}  {} {} {}",
                    grid[0], grid[1], grid[2], shift[0], shift[1], shift[2]
                );
            }
            KPoints::CrystalB(points) => {
                out.push_str("K_POINTS crystal_b\n");
                let _ = writeln!(out, "{}", points.len());
                for p in points {
                    let _ = writeln!(
                        out,
                        "{:.7} {:.7} {:.7} {} ! {}",
                        p.coords[0], p.coords[1], p.coords[2], p.weight, p.label
                    );
                }
            }
        }
        out.push('\n');
    }
}

/// Monkhorst-Pack grid with at most `spacing` (1/Angstrom, no 2*pi)
/// between points along each reciprocal axis.
pub fn kspacing_to_grid(lattice: &Rows3, spacing: f64) -> Result<[u32; 3]> {
    if spacing <= 0.0 || !spacing.is_finite() {
        return Err(Error::Template(format!(
            "kspacing must be positive, got {}",
            spacing
        )));
    }
    let rec = linalg::reciprocal(lattice)
        .ok_or_else(|| Error::Geometry("lattice is singular (determinant is zero)".to_string()))?;
    Ok(rec.map(|b| (linalg::norm(b) / spacing) as u32 + 1))
}

pub struct PwInput<'a> {
    structure: &'a Structure,
    template: &'a DeckTemplate,
    k_points: Option<KPoints>,
}

impl<'a> PwInput<'a> {
    pub fn new(structure: &'a Structure, template: &'a DeckTemplate) -> Self {
        Self {
            structure,
            template,
            k_points: None,
        }
    }

    /// Overrides the k-points the template would give.
    pub fn k_points(mut self, k_points: KPoints) -> Self {
        self.k_points = Some(k_points);
        self
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.render()?;
        fs::write(path.as_ref(), text)?;
        log::info!("Wrote pw.x input {}", path.as_ref().display());
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        let s = self.structure;
        if s.atoms.is_empty() {
            return Err(Error::Geometry("structure has no atoms".to_string()));
        }
        let species = s.species();

        // 1. Namelists
        let mut sections = self.template.sections.clone();
        for name in PW_SECTIONS {
            if !sections.contains_key(name) {
                sections.insert(name.to_string(), Value::Object(Map::new()));
            }
        }
        if let Some(Value::Object(system)) = sections.get_mut("system") {
            system.insert("ibrav".to_string(), Value::from(0));
            system.insert("nat".to_string(), Value::from(s.atoms.len()));
            system.insert("ntyp".to_string(), Value::from(species.len()));
        }

        let mut out = String::new();
        let order = PW_SECTIONS
            .iter()
            .map(|n| n.to_string())
            .chain(
                sections
                    .keys()
                    .filter(|k| !PW_SECTIONS.contains(&k.as_str()))
                    .cloned(),
            )
            .collect::<Vec<_>>();
        for name in &order {
            let Some(Value::Object(entries)) = sections.get(name) else {
                continue;
            };
            let _ = writeln!(out, "&{}", name.to_uppercase());
            for (key, value) in entries {
                write_entry(&mut out, key, value, &species);
            }
            out.push_str("/\n");
        }
        out.push('\n');

        // 2. Species
        out.push_str("ATOMIC_SPECIES\n");
        for sym in &species {
            let mass =
                atomic_mass(sym).ok_or_else(|| Error::UnknownElement(sym.clone()))?;
            let pseudo = self.template.pseudopotentials.get(sym).ok_or_else(|| {
                Error::Template(format!("no pseudopotential given for '{}'", sym))
            })?;
            let _ = writeln!(out, "{} {:?} {}", sym, mass, pseudo);
        }
        out.push('\n');

        // 3. K-points
        let k_points = match &self.k_points {
            Some(k) => k.clone(),
            None => KPoints::from_template(self.template, &s.lattice)?,
        };
        k_points.render(&mut out);

        // 4. Cell
        out.push_str("CELL_PARAMETERS angstrom\n");
        for v in &s.lattice {
            let _ = writeln!(out, "{:.14} {:.14} {:.14}", v[0], v[1], v[2]);
        }
        out.push('\n');

        // 5. Positions
        if self.template.crystal_coordinates {
            out.push_str("ATOMIC_POSITIONS crystal\n");
            let fracs = s.fractional_positions()?;
            for (atom, f) in s.atoms.iter().zip(&fracs) {
                let _ = writeln!(out, "{} {:.10} {:.10} {:.10}", atom.element, f[0], f[1], f[2]);
            }
        } else {
            out.push_str("ATOMIC_POSITIONS angstrom\n");
            for atom in &s.atoms {
                let p = atom.position;
                let _ = writeln!(out, "{} {:.10} {:.10} {:.10}", atom.element, p[0], p[1], p[2]);
            }
        }
        out.push('\n');

        Ok(out)
    }
}

/// One namelist entry. Lists become `key(i)`, species-keyed objects
/// become `key(i)` with i the species index.
fn write_entry(out: &mut String, key: &str, value: &Value, species: &[String]) {
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if let Some(text) = fortran_value(item) {
                    let _ = writeln!(out, "   {:16} = {}", format!("{}({})", key, i + 1), text);
                }
            }
        }
        Value::Object(by_species) => {
            for (i, sym) in species.iter().enumerate() {
                if let Some(text) = by_species.get(sym).and_then(fortran_value) {
                    let _ = writeln!(out, "   {:16} = {}", format!("{}({})", key, i + 1), text);
                }
            }
        }
        scalar => {
            if let Some(text) = fortran_value(scalar) {
                let _ = writeln!(out, "   {:16} = {}", key, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Structure;

    fn nacl() -> Structure {
        let a = 5.64;
        let lattice = [[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]];
        let elements = vec!["Na".to_string(), "Cl".to_string()];
        Structure::from_fractional("NaCl", lattice, &elements, &[[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]])
    }

    fn template(extra: &str) -> DeckTemplate {
        let text = format!(
            r#"{{
                "control": {{"calculation": "scf", "tprnfor": true}},
                "system": {{"ecutwfc": 40.0, "starting_magnetization": {{"Cl": 0.5}}}},
                "pseudopotentials": {{"Na": "Na.UPF", "Cl": "Cl.UPF"}}{}
            }}"#,
            extra
        );
        DeckTemplate::from_json_str(&text).unwrap()
    }

    #[test]
    fn test_grid_from_spacing() {
        let lattice = [[4.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 10.0]];
        // |b| = 0.25, 0.2, 0.1
        assert_eq!(kspacing_to_grid(&lattice, 0.045).unwrap(), [6, 5, 3]);
        assert_eq!(kspacing_to_grid(&lattice, 1.0).unwrap(), [1, 1, 1]);
        assert!(kspacing_to_grid(&lattice, 0.0).is_err());
    }

    #[test]
    fn test_render_layout() {
        let s = nacl();
        let t = template(r#", "kpts": [4, 4, 4], "crystal_coordinates": true"#);
        let text = PwInput::new(&s, &t).render().unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "&CONTROL");
        assert_eq!(lines[1], format!("   {:16} = 'scf'", "calculation"));
        assert_eq!(lines[2], format!("   {:16} = .true.", "tprnfor"));
        assert!(text.contains(&format!("   {:16} = 0.5\n", "starting_magnetization(2)")));
        assert!(text.contains(&format!("   {:16} = 2\n", "nat")));
        assert!(text.contains(&format!("   {:16} = 0\n", "ibrav")));
        assert!(text.contains("&ELECTRONS\n/\n&IONS\n/\n&CELL\n/\n\nATOMIC_SPECIES\n"));
        assert!(text.contains("Na 22.98976928 Na.UPF\nCl 35.45 Cl.UPF\n"));
        assert!(text.contains("K_POINTS automatic\n4 4 4  0 0 0\n\nCELL_PARAMETERS angstrom\n"));
        assert!(text.contains("5.64000000000000 0.00000000000000 0.00000000000000"));
        assert!(text.contains("ATOMIC_POSITIONS crystal\nNa 0.0000000000 0.0000000000 0.0000000000\nCl 0.5000000000 0.5000000000 0.5000000000\n"));
    }

    #[test]
    fn test_default_gamma_and_cartesian() {
        let s = nacl();
        let t = template("");
        let text = PwInput::new(&s, &t).render().unwrap();
        assert!(text.contains("K_POINTS gamma\n\n"));
        assert!(text.contains("ATOMIC_POSITIONS angstrom\nNa 0.0000000000"));
        assert!(text.contains("Cl 2.8200000000 2.8200000000 2.8200000000"));
    }

    #[test]
    fn test_crystal_b_override() {
        let s = nacl();
        let t = template(r#", "kspacing": 0.1"#);
        let path = vec![
            PathPoint { label: "G".into(), coords: [0.0, 0.0, 0.0], weight: 10 },
            PathPoint { label: "X".into(), coords: [0.0, 0.5, 0.0], weight: 1 },
        ];
        let text = PwInput::new(&s, &t)
            .k_points(KPoints::CrystalB(path))
            .render()
            .unwrap();
        assert!(text.contains(
            "K_POINTS crystal_b\n2\n0.0000000 0.0000000 0.0000000 10 ! G\n0.0000000 0.5000000 0.0000000 1 ! X\n"
        ));
        assert!(!text.contains("automatic"));
    }

    #[test]
    fn test_missing_pseudopotential() {
        let s = nacl();
        let t = DeckTemplate::from_json_str(r#"{"pseudopotentials": {"Na": "Na.UPF"}}"#).unwrap();
        assert!(matches!(PwInput::new(&s, &t).render(), Err(Error::Template(_))));
    }
}
