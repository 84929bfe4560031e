use super::traits::StructureReader;
use crate::core::chemistry::aromaticity::perceive_aromaticity;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::{Bond, BondOrder};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: SdfParseErrorKind },
}

#[derive(Debug, Error)]
pub enum SdfParseErrorKind {
    #[error("Molfile must contain a three-line header and a counts line")]
    MissingCountsLine,
    #[error("V3000 molfiles are not supported")]
    UnsupportedV3000,
    #[error("Invalid {field} count (value: '{value}')")]
    InvalidCount { field: &'static str, value: String },
    #[error("Molfile ended before all {expected} atom and bond lines were read")]
    Truncated { expected: usize },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Atom line has no element symbol")]
    MissingElement,
    #[error("Invalid bond line (value: '{value}')")]
    InvalidBondLine { value: String },
    #[error("Unsupported bond order {value}")]
    UnsupportedBondOrder { value: i32 },
    #[error("Bond references atom {index} outside 1..={atom_count}")]
    AtomOutOfRange { index: usize, atom_count: usize },
}

fn parse_error(line: usize, kind: SdfParseErrorKind) -> SdfError {
    SdfError::Parse { line, kind }
}

/// Reads the first record of an MDL V2000 molfile or SD file.
///
/// Bond orders 1-4 are accepted, 4 being aromatic. After the connection table is read,
/// aromatic atoms are perceived so that Kekulé input yields the same flags as input with
/// explicit aromatic bonds.
pub struct SdfFile;

impl StructureReader for SdfFile {
    type Output = Molecule;
    type Error = SdfError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let lines = collect_first_record(reader)?;

        let Some((counts_line_no, counts_line)) = lines.get(3) else {
            return Err(parse_error(
                lines.len().max(1),
                SdfParseErrorKind::MissingCountsLine,
            ));
        };
        if counts_line.contains("V3000") {
            return Err(parse_error(
                *counts_line_no,
                SdfParseErrorKind::UnsupportedV3000,
            ));
        }

        let (atom_count, bond_count) = parse_counts(counts_line, *counts_line_no)?;
        let atom_start = 4;
        let bond_start = atom_start + atom_count;
        if lines.len() < bond_start + bond_count {
            return Err(parse_error(
                lines.last().map_or(*counts_line_no, |(ln, _)| *ln),
                SdfParseErrorKind::Truncated {
                    expected: atom_count + bond_count,
                },
            ));
        }

        let atoms = lines[atom_start..bond_start]
            .iter()
            .map(|(ln, raw)| parse_atom(raw, *ln))
            .collect::<Result<Vec<_>, _>>()?;
        let bonds = lines[bond_start..bond_start + bond_count]
            .iter()
            .map(|(ln, raw)| parse_bond(raw, *ln, atom_count))
            .collect::<Result<Vec<_>, _>>()?;

        let mut molecule = Molecule::new(atoms, bonds);
        let aromatic = perceive_aromaticity(&mut molecule);

        debug!(
            atoms = molecule.atom_count(),
            bonds = molecule.bond_count(),
            aromatic,
            "Parsed SDF molecule"
        );

        Ok(molecule)
    }
}

fn collect_first_record(reader: &mut impl BufRead) -> Result<Vec<(usize, String)>, SdfError> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line?;
        let trimmed = content.trim();
        if trimmed == "$$$$" || trimmed == "M  END" {
            break;
        }
        lines.push((i + 1, content));
    }
    Ok(lines)
}

/// Reads the atom and bond counts from their fixed three-column fields, falling back to
/// whitespace splitting for files that ignore the column layout.
fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), SdfError> {
    let fixed: (Option<usize>, Option<usize>) = (
        line.get(0..3).map(str::trim).and_then(|s| s.parse().ok()),
        line.get(3..6).map(str::trim).and_then(|s| s.parse().ok()),
    );
    if let (Some(atoms), Some(bonds)) = fixed {
        return Ok((atoms, bonds));
    }

    let mut tokens = line.split_whitespace();
    let mut next_count = |field: &'static str| {
        let value = tokens.next().unwrap_or("");
        value.parse::<usize>().map_err(|_| {
            parse_error(
                line_no,
                SdfParseErrorKind::InvalidCount {
                    field,
                    value: value.to_string(),
                },
            )
        })
    };
    let atoms = next_count("atom")?;
    let bonds = next_count("bond")?;
    Ok((atoms, bonds))
}

fn parse_atom(raw: &str, line_no: usize) -> Result<Atom, SdfError> {
    let padded = format!("{raw:<40}");
    let coordinate = |start: usize, end: usize| {
        let value = padded.get(start..end).unwrap_or("").trim();
        value.parse::<f64>().map_err(|_| {
            parse_error(
                line_no,
                SdfParseErrorKind::InvalidFloat {
                    columns: format!("{}-{}", start + 1, end),
                    value: value.to_string(),
                },
            )
        })
    };
    let x = coordinate(0, 10)?;
    let y = coordinate(10, 20)?;
    let z = coordinate(20, 30)?;

    let element = padded
        .get(31..34)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| raw.split_whitespace().nth(3))
        .ok_or_else(|| parse_error(line_no, SdfParseErrorKind::MissingElement))?;

    Ok(Atom::new(element, Point3::new(x, y, z)))
}

fn fixed_bond_fields(raw: &str) -> Option<(usize, usize, i32)> {
    Some((
        raw.get(0..3)?.trim().parse().ok()?,
        raw.get(3..6)?.trim().parse().ok()?,
        raw.get(6..9)?.trim().parse().ok()?,
    ))
}

fn parse_bond(raw: &str, line_no: usize, atom_count: usize) -> Result<Bond, SdfError> {
    let invalid = || {
        parse_error(
            line_no,
            SdfParseErrorKind::InvalidBondLine {
                value: raw.trim().to_string(),
            },
        )
    };

    let (a1, a2, order_value) = match fixed_bond_fields(raw) {
        Some(fields) => fields,
        None => {
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            if tokens.len() < 3 {
                return Err(invalid());
            }
            (
                tokens[0].parse().map_err(|_| invalid())?,
                tokens[1].parse().map_err(|_| invalid())?,
                tokens[2].parse().map_err(|_| invalid())?,
            )
        }
    };

    let order = BondOrder::from_ctfile(order_value).ok_or_else(|| {
        parse_error(
            line_no,
            SdfParseErrorKind::UnsupportedBondOrder { value: order_value },
        )
    })?;

    for index in [a1, a2] {
        if index == 0 || index > atom_count {
            return Err(parse_error(
                line_no,
                SdfParseErrorKind::AtomOutOfRange { index, atom_count },
            ));
        }
    }

    Ok(Bond::new(a1 - 1, a2 - 1, order))
}
