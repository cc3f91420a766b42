// src/decks.rs
//
// SCF / NSCF / post-processing deck sets generated from one template.

use std::path::Path;

use crate::error::Result;
use crate::io::namelist::Namelist;
use crate::io::pwi::{KPoints, PwInput};
use crate::model::Structure;
use crate::physics::kpath::BandPath;
use crate::template::DeckTemplate;

/// dos.x energy window (eV)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosWindow {
    pub emin: f64,
    pub emax: f64,
    pub delta_e: f64,
}

impl Default for DosWindow {
    fn default() -> Self {
        Self {
            emin: -20.0,
            emax: 20.0,
            delta_e: 0.1,
        }
    }
}

/// Rendered pw.x decks plus the namelist of the follow-up program.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSet {
    pub scf: String,
    pub nscf: String,
    pub post: Namelist,
}

impl DeckSet {
    pub fn write(&self, scf: &Path, nscf: &Path, post: &Path) -> Result<()> {
        std::fs::write(scf, &self.scf)?;
        std::fs::write(nscf, &self.nscf)?;
        self.post.write(post)?;
        log::info!(
            "Wrote {}, {} and {}",
            scf.display(),
            nscf.display(),
            post.display()
        );
        Ok(())
    }
}

/// Single SCF deck straight from the template.
pub fn scf_deck(structure: &Structure, template: &DeckTemplate) -> Result<String> {
    PwInput::new(structure, template).render()
}

pub fn dos_decks(
    structure: &Structure,
    template: &DeckTemplate,
    system_name: &str,
    dos_data: &str,
    window: DosWindow,
) -> Result<DeckSet> {
    let named = template.with_system_name(system_name);
    let scf = PwInput::new(structure, &named).render()?;

    let mut nscf_template = named.clone();
    nscf_template.set("control", "calculation", "nscf");
    nscf_template.set("system", "occupations", "tetrahedra");
    let nscf = PwInput::new(structure, &nscf_template).render()?;

    let post = Namelist::new("DOS")
        .set("prefix", named.prefix())
        .set("outdir", named.outdir())
        .set("Emin", window.emin)
        .set("Emax", window.emax)
        .set("DeltaE", window.delta_e)
        .set("fildos", dos_data);

    Ok(DeckSet { scf, nscf, post })
}

pub fn pdos_decks(
    structure: &Structure,
    template: &DeckTemplate,
    system_name: &str,
    pdos_data: &str,
) -> Result<DeckSet> {
    let named = template.with_system_name(system_name);
    let scf = PwInput::new(structure, &named).render()?;

    let mut nscf_template = named.clone();
    nscf_template.set("control", "calculation", "nscf");
    let nscf = PwInput::new(structure, &nscf_template).render()?;

    let post = Namelist::new("PROJWFC")
        .set("prefix", named.prefix())
        .set("outdir", named.outdir())
        .set("filpdos", pdos_data);

    Ok(DeckSet { scf, nscf, post })
}

/// The NSCF deck runs `calculation='bands'` along `path`.
pub fn band_decks(
    structure: &Structure,
    template: &DeckTemplate,
    system_name: &str,
    bands_data: &str,
    path: &BandPath,
    density: usize,
) -> Result<DeckSet> {
    let named = template.with_system_name(system_name);
    let scf = PwInput::new(structure, &named).render()?;

    let mut bands_template = named.clone();
    bands_template.set("control", "calculation", "bands");
    let points = path.crystal_b_points(density);
    log::info!(
        "Band path {} ({} vertices, {} points per segment)",
        path.path_string(),
        points.len(),
        density
    );
    let nscf = PwInput::new(structure, &bands_template)
        .k_points(KPoints::CrystalB(points))
        .render()?;

    let post = Namelist::new("BANDS")
        .set("prefix", named.prefix())
        .set("outdir", named.outdir())
        .set("filband", bands_data);

    Ok(DeckSet { scf, nscf, post })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::kpath::calculate_kpath;

    const TEMPLATE: &str = r#"{
        "control": {"calculation": "scf", "pseudo_dir": "./pseudo"},
        "system": {"ecutwfc": 30.0, "occupations": "smearing", "degauss": 0.01},
        "electrons": {"conv_thr": 1e-8},
        "pseudopotentials": {"Si": "Si.pbe-n-rrkjus_psl.1.0.0.UPF"},
        "kspacing": 0.2,
        "crystal_coordinates": true
    }"#;

    fn silicon() -> Structure {
        let h = 5.43 / 2.0;
        let lattice = [[0.0, h, h], [h, 0.0, h], [h, h, 0.0]];
        let elements = vec!["Si".to_string(), "Si".to_string()];
        Structure::from_fractional("Si", lattice, &elements, &[[0.0; 3], [0.25; 3]])
    }

    fn entry(key: &str, value: &str) -> String {
        format!("   {:16} = {}", key, value)
    }

    fn template() -> DeckTemplate {
        DeckTemplate::from_json_str(TEMPLATE).unwrap()
    }

    #[test]
    fn test_dos_decks() {
        let set = dos_decks(&silicon(), &template(), "si", "si.dos", DosWindow::default()).unwrap();

        assert!(set.scf.contains(&entry("calculation", "'scf'")));
        assert!(set.scf.contains(&entry("prefix", "'si'")));
        assert!(set.scf.contains(&entry("outdir", "'./si'")));
        assert!(set.scf.contains(&entry("occupations", "'smearing'")));

        assert!(set.nscf.contains(&entry("calculation", "'nscf'")));
        assert!(set.nscf.contains(&entry("occupations", "'tetrahedra'")));
        assert!(set.nscf.contains("K_POINTS automatic"));

        let dos = set.post.render();
        assert!(dos.starts_with("&dos\n"));
        assert!(dos.contains("    outdir = './si'\n"));
        assert!(dos.contains("    emin = -20.0\n"));
        assert!(dos.contains("    deltae = 0.1\n"));
        assert!(dos.contains("    fildos = 'si.dos'\n"));
    }

    #[test]
    fn test_mixed_case_template_keys() {
        let t = DeckTemplate::from_json_str(
            r#"{"CONTROL": {"Calculation": "scf", "Prefix": "old"},
                "SYSTEM": {"Occupations": "smearing", "ecutwfc": 30.0},
                "pseudopotentials": {"Si": "Si.UPF"}}"#,
        )
        .unwrap();
        let set = dos_decks(&silicon(), &t, "si", "si.dos", DosWindow::default()).unwrap();

        let lower = set.nscf.to_lowercase();
        assert_eq!(lower.matches("calculation").count(), 1);
        assert_eq!(lower.matches("prefix").count(), 1);
        assert_eq!(lower.matches("occupations").count(), 1);
        assert!(set.nscf.contains(&entry("calculation", "'nscf'")));
        assert!(set.nscf.contains(&entry("prefix", "'si'")));
        assert!(set.nscf.contains(&entry("occupations", "'tetrahedra'")));
    }

    #[test]
    fn test_pdos_decks() {
        let set = pdos_decks(&silicon(), &template(), "si", "si.pdos").unwrap();
        assert!(set.nscf.contains(&entry("calculation", "'nscf'")));
        assert!(set.nscf.contains(&entry("occupations", "'smearing'")));
        assert_eq!(
            set.post.render(),
            "&projwfc\n    prefix = 'si'\n    outdir = './si'\n    filpdos = 'si.pdos'\n/\n"
        );
    }

    #[test]
    fn test_band_decks() {
        let s = silicon();
        let path = calculate_kpath(&s, 1e-4).unwrap();
        let set = band_decks(&s, &template(), "si", "si.bands", &path, 20).unwrap();

        assert!(set.scf.contains("K_POINTS automatic"));
        assert!(set.nscf.contains(&entry("calculation", "'bands'")));
        assert!(set.nscf.contains("K_POINTS crystal_b"));
        assert!(!set.nscf.contains("K_POINTS automatic"));
        assert!(set.nscf.contains("! G"));
        assert!(set.nscf.contains(" 20 "));
        assert!(set.post.render().contains("    filband = 'si.bands'\n"));
    }

    #[test]
    fn test_template_not_mutated() {
        let t = template();
        let _ = dos_decks(&silicon(), &t, "si", "si.dos", DosWindow::default()).unwrap();
        assert_eq!(t.prefix(), "pwscf");
        assert_eq!(t.get("control", "calculation"), Some(&serde_json::json!("scf")));
    }
}
