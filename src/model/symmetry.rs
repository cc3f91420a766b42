use moyo::base::{AngleTolerance, Cell, Lattice};
use moyo::data::Setting;
use moyo::MoyoDataset;
use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::model::{Atom, Structure};
use crate::utils::linalg;

/// Default distance tolerance for the symmetry search (Angstrom)
pub const SYMPREC: f64 = 1e-4;

// --- Structs for Analysis Results ---
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryInfo {
    pub number: i32,
    pub symbol: String,
    pub system: String,
    /// Lattice centring letter of the standard setting: P, A, C, F, I or R
    pub centering: char,
}

/// A moyo dataset together with the species labels behind its type ids.
pub(crate) struct Standardized {
    pub dataset: MoyoDataset,
    pub species: Vec<String>,
}

/// Runs the symmetry search. Type ids are 1-based species indices.
pub(crate) fn standardize(structure: &Structure, symprec: f64) -> Result<Standardized> {
    if structure.atoms.is_empty() {
        return Err(Error::Symmetry("structure has no atoms".to_string()));
    }
    if linalg::is_singular(&structure.lattice) {
        return Err(Error::Symmetry(
            "invalid lattice (determinant is zero)".to_string(),
        ));
    }

    let fracs = structure.fractional_positions()?;
    let positions: Vec<Vector3<f64>> = fracs.iter().map(|f| Vector3::from(*f)).collect();
    let numbers: Vec<i32> = structure
        .type_indices()
        .into_iter()
        .map(|i| i as i32 + 1)
        .collect();

    // Lattice::new takes row basis vectors
    let lattice = Lattice::new(linalg::rows_to_matrix(&structure.lattice));
    let cell = Cell::new(lattice, positions, numbers);

    let dataset = MoyoDataset::new(&cell, symprec, AngleTolerance::Default, Setting::Spglib, true)
        .map_err(|e| Error::Symmetry(format!("moyo symmetry search failed: {:?}", e)))?;

    log::debug!(
        "moyo identified SG #{} (Hall: {}) with symprec {}",
        dataset.number,
        dataset.hall_number,
        symprec
    );

    Ok(Standardized {
        dataset,
        species: structure.species(),
    })
}

// =========================================================================
// 1. ANALYSIS: Read-only check of the Space Group
// =========================================================================
pub fn analyze(structure: &Structure, symprec: f64) -> Result<SymmetryInfo> {
    let std = standardize(structure, symprec)?;
    Ok(info_for_number(std.dataset.number))
}

pub fn info_for_number(number: i32) -> SymmetryInfo {
    let system = match number {
        1..=2 => "Triclinic",
        3..=15 => "Monoclinic",
        16..=74 => "Orthorhombic",
        75..=142 => "Tetragonal",
        143..=167 => "Trigonal",
        168..=194 => "Hexagonal",
        195..=230 => "Cubic",
        _ => "Unknown",
    };

    let symbol = if (1..=230).contains(&number) {
        SG_SYMBOLS[number as usize]
    } else {
        "Unknown"
    };

    SymmetryInfo {
        number,
        symbol: symbol.to_string(),
        system: system.to_string(),
        centering: symbol.chars().next().unwrap_or('P'),
    }
}

// =========================================================================
// 2. TRANSFORMATION: Returns a NEW Standardized Structure
// =========================================================================
pub fn to_conventional_cell(structure: &Structure, symprec: f64) -> Result<Structure> {
    let std = standardize(structure, symprec)?;
    Ok(from_moyo_cell(&std.dataset.std_cell, &std.species))
}

pub fn to_primitive_cell(structure: &Structure, symprec: f64) -> Result<Structure> {
    let std = standardize(structure, symprec)?;
    Ok(from_moyo_cell(&std.dataset.prim_std_cell, &std.species))
}

/// moyo cell (column basis, fractional sites) back to a Structure
pub(crate) fn from_moyo_cell(cell: &Cell, species: &[String]) -> Structure {
    let lattice = linalg::columns_to_rows(&cell.lattice.basis);

    let atoms: Vec<Atom> = cell
        .positions
        .iter()
        .zip(&cell.numbers)
        .map(|(pos, &type_id)| {
            let element = usize::try_from(type_id - 1)
                .ok()
                .and_then(|i| species.get(i))
                .cloned()
                .unwrap_or_else(|| "X".to_string());
            Atom {
                element,
                position: linalg::frac_to_cart([pos.x, pos.y, pos.z], &lattice),
            }
        })
        .collect();

    let mut out = Structure::new(String::new(), lattice, atoms);
    out.title = out.formula();
    out
}

// =========================================================================
// DATA: Space Group Symbols
// =========================================================================
const SG_SYMBOLS: [&str; 231] = [
    "", "P1", "P-1", "P121", "P12_11", "C121", "P1m1", "P1c1", "C1m1", "C1c1",
    "P12/m1", "P12_1/m1", "C12/m1", "P12/c1", "P12_1/c1", "C12/c1", "P222", "P222_1", "P2_12_12", "P2_12_12_1",
    "C222_1", "C222", "F222", "I222", "I2_12_12_1", "Pmm2", "Pmc2_1", "Pcc2", "Pma2", "Pca2_1",
    "Pnc2", "Pmn2_1", "Pba2", "Pna2_1", "Pnn2", "Cmm2", "Cmc2_1", "Ccc2", "Amm2", "Aem2",
    "Ama2", "Aea2", "Fmm2", "Fdd2", "Imm2", "Iba2", "Ima2", "Pmmm", "Pnnn", "Pccm",
    "Pban", "Pmma", "Pnna", "Pmna", "Pcca", "Pbam", "Pccn", "Pbcm", "Pnnm", "Pmmn",
    "Pbcn", "Pbca", "Pnma", "Cmcm", "Cmce", "Cmmm", "Cccm", "Cmme", "Ccce", "Fmmm",
    "Fddd", "Immm", "Ibam", "Ibca", "Imma", "P4", "P4_1", "P4_2", "P4_3", "I4",
    "I4_1", "P-4", "I-4", "P4/m", "P4_2/m", "P4/n", "P4_2/n", "I4/m", "I4_1/a", "P422",
    "P42_12", "P4_122", "P4_12_12", "P4_222", "P4_22_12", "P4_322", "P4_32_12", "I422", "I4_122", "P4mm",
    "P4bm", "P4_2cm", "P4_2nm", "P4cc", "P4nc", "P4_2mc", "P4_2bc", "I4mm", "I4cm", "I4_1md",
    "I4_1cd", "P-42m", "P-42c", "P-42_1m", "P-42_1c", "P-4m2", "P-4c2", "P-4b2", "P-4n2", "I-4m2",
    "I-4c2", "I-42m", "I-42d", "P4/mmm", "P4/mcc", "P4/nbm", "P4/nnc", "P4/mbm", "P4/mnc", "P4/nmm",
    "P4/ncc", "P4_2/mmc", "P4_2/mcm", "P4_2/nbc", "P4_2/nnm", "P4_2/mbc", "P4_2/mnm", "P4_2/nmc", "P4_2/ncm", "I4/mmm",
    "I4/mcm", "I4_1/amd", "I4_1/acd", "P3", "P3_1", "P3_2", "R3", "P-3", "R-3", "P312",
    "P321", "P3_112", "P3_121", "P3_212", "P3_221", "R32", "P3m1", "P31m", "P3c1", "P31c",
    "R3m", "R3c", "P-31m", "P-31c", "P-3m1", "P-3c1", "R-3m", "R-3c", "P6", "P6_1",
    "P6_5", "P6_2", "P6_4", "P6_3", "P-6", "P6/m", "P6_3/m", "P622", "P6_122", "P6_522",
    "P6_222", "P6_422", "P6_322", "P6mm", "P6cc", "P6_3cm", "P6_3mc", "P-6m2", "P-6c2", "P-62m",
    "P-62c", "P6/mmm", "P6/mcc", "P6_3/mcm", "P6_3/mmc", "P23", "F23", "I23", "P2_13", "I2_13",
    "Pm-3", "Pn-3", "Fm-3", "Fd-3", "Im-3", "Pa-3", "Ia-3", "P432", "P4_232", "F432",
    "F4_132", "I432", "P4_332", "P4_132", "I4_132", "P-43m", "F-43m", "I-43m", "P-43n", "F-43c",
    "I-43d", "Pm-3m", "Pn-3n", "Pm-3n", "Pn-3m", "Fm-3m", "Fm-3c", "Fd-3m", "Fd-3c", "Im-3m",
    "Ia-3d",
];
