use super::traits::StructureReader;
use crate::core::chemistry::aromaticity::flag_aromatic_residues;
use crate::core::chemistry::identifiers::covalent_radius;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::models::residue::ResidueAnnotation;
use crate::core::models::structure::ProteinStructure;
use crate::core::models::topology::{Bond, BondOrder};
use crate::core::utils::geometry::distance;
use itertools::Itertools;
use nalgebra::Point3;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

/// Slack added to the sum of covalent radii when inferring bonds.
pub const BOND_TOLERANCE: f64 = 0.45;
/// Pairs closer than this are overlapping atoms, not bonds.
const MIN_BOND_DISTANCE: f64 = 0.4;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must reach column 54)")]
    LineTooShort,
    #[error("Unable to determine element from columns 77-78 or the atom name")]
    MissingElement,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let raw = slice_and_trim(line, start, end);
    raw.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: raw.into(),
        },
    })
}

/// Derives the element symbol when columns 77-78 are blank.
///
/// Atom names whose first column is blank hold a one-letter element (`" CA "` is an
/// alpha carbon); names starting in column 13 hold a two-letter one (`"CA  "` is
/// calcium). Old-style hydrogen names put a digit in column 13 (`"1HB "`), which also
/// marks a one-letter element.
fn element_from_atom_name(raw_name: &str) -> Option<String> {
    let trimmed = raw_name.trim();
    let name = trimmed.trim_start_matches(|c: char| c.is_ascii_digit());
    let letters: String = name
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let digit_prefixed = name.len() != trimmed.len();
    let take = if raw_name.starts_with(' ') || digit_prefixed || letters.len() == 1 {
        1
    } else {
        2
    };
    Some(letters[..take].to_ascii_uppercase())
}

struct AtomRecord {
    serial: Option<usize>,
    residue_key: String,
}

pub struct PdbFile;

impl StructureReader for PdbFile {
    type Output = ProteinStructure;
    type Error = PdbError;

    /// Reads `ATOM`/`HETATM` records of the first model in file order.
    ///
    /// Atom indices follow record order. Residue metadata is kept only when the residue
    /// name, residue number and atom name all parse. Bonds are inferred within each
    /// residue from covalent radii and extended by `CONECT` records.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut atoms = Vec::new();
        let mut records = Vec::new();
        let mut annotations = BTreeMap::new();
        let mut conect: Vec<(usize, usize)> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }
                    let x = parse_coordinate(&line, line_num, 30, 38)?;
                    let y = parse_coordinate(&line, line_num, 38, 46)?;
                    let z = parse_coordinate(&line, line_num, 46, 54)?;

                    let raw_name = line.get(12..16).unwrap_or("");
                    let atom_label = raw_name.trim();
                    let residue_name = slice_and_trim(&line, 17, 20);
                    let residue_id = slice_and_trim(&line, 22, 26).parse::<isize>().ok();

                    let element = match slice_and_trim(&line, 76, 78) {
                        "" => element_from_atom_name(raw_name).ok_or(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingElement,
                        })?,
                        symbol => symbol.to_string(),
                    };

                    let index = atoms.len();
                    match residue_id {
                        Some(residue_id) if !residue_name.is_empty() && !atom_label.is_empty() => {
                            annotations.insert(
                                index,
                                ResidueAnnotation::new(residue_name, residue_id, atom_label),
                            );
                        }
                        _ => {}
                    }

                    atoms.push(Atom::new(&element, Point3::new(x, y, z)));
                    records.push(AtomRecord {
                        serial: slice_and_trim(&line, 6, 11).parse().ok(),
                        residue_key: line.get(17..27).unwrap_or("").to_string(),
                    });
                }
                "CONECT" => {
                    let mut fields = line
                        .get(6..)
                        .unwrap_or("")
                        .split_whitespace()
                        .filter_map(|s| s.parse::<usize>().ok());
                    if let Some(origin) = fields.next() {
                        conect.extend(fields.map(|partner| (origin, partner)));
                    }
                }
                "ENDMDL" | "END" => break,
                _ => {}
            }
        }

        let bonds = build_bonds(&atoms, &records, &conect);
        let mut molecule = Molecule::new(atoms, bonds);
        let flagged = flag_aromatic_residues(&mut molecule, &annotations);

        debug!(
            atoms = molecule.atom_count(),
            bonds = molecule.bond_count(),
            annotated = annotations.len(),
            aromatic = flagged,
            "Parsed PDB structure"
        );

        Ok(ProteinStructure::new(molecule, annotations))
    }
}

fn build_bonds(atoms: &[Atom], records: &[AtomRecord], conect: &[(usize, usize)]) -> Vec<Bond> {
    let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();

    let mut residues: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        residues
            .entry(record.residue_key.as_str())
            .or_default()
            .push(index);
    }
    for members in residues.values() {
        for (&i, &j) in members.iter().tuple_combinations() {
            let (a, b) = (&atoms[i], &atoms[j]);
            if a.is_hydrogen() && b.is_hydrogen() {
                continue;
            }
            let d = distance(&a.position, &b.position);
            let limit = covalent_radius(&a.element) + covalent_radius(&b.element) + BOND_TOLERANCE;
            if d > MIN_BOND_DISTANCE && d <= limit {
                pairs.insert((i, j));
            }
        }
    }

    let serial_to_index: HashMap<usize, usize> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| record.serial.map(|serial| (serial, index)))
        .collect();
    for &(s1, s2) in conect {
        match (serial_to_index.get(&s1), serial_to_index.get(&s2)) {
            (Some(&i), Some(&j)) if i != j => {
                pairs.insert((i.min(j), i.max(j)));
            }
            _ => debug!(s1, s2, "Skipping CONECT entry with unknown serial"),
        }
    }

    pairs
        .into_iter()
        .map(|(i, j)| Bond::new(i, j, BondOrder::Single))
        .collect()
}
