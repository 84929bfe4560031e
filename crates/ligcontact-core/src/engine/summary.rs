use crate::core::models::molecule::Molecule;
use crate::core::models::structure::ProteinStructure;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Chain information is not read from the inputs, so every protein counts as one chain.
pub const DEFAULT_CHAIN_COUNT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LigandSummary {
    pub atoms: usize,
    pub bonds: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinSummary {
    pub residues: usize,
    pub chains: usize,
}

/// Counts ligand atoms and bonds, and distinct annotated protein residues.
pub fn summarize(protein: &ProteinStructure, ligand: &Molecule) -> (LigandSummary, ProteinSummary) {
    let residues: HashSet<(&str, isize)> = protein
        .annotations()
        .values()
        .map(|annotation| annotation.residue_key())
        .collect();

    (
        LigandSummary {
            atoms: ligand.atom_count(),
            bonds: ligand.bond_count(),
        },
        ProteinSummary {
            residues: residues.len(),
            chains: DEFAULT_CHAIN_COUNT,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::residue::ResidueAnnotation;
    use crate::core::models::topology::{Bond, BondOrder};
    use nalgebra::Point3;
    use std::collections::BTreeMap;

    #[test]
    fn counts_distinct_residues_by_name_and_number() {
        let atoms = (0..4).map(|_| Atom::new("C", Point3::origin())).collect();
        let mut annotations = BTreeMap::new();
        annotations.insert(0, ResidueAnnotation::new("ALA", 1, "CA"));
        annotations.insert(1, ResidueAnnotation::new("ALA", 1, "CB"));
        annotations.insert(2, ResidueAnnotation::new("GLY", 1, "CA"));
        annotations.insert(3, ResidueAnnotation::new("ALA", 2, "CA"));
        let protein = ProteinStructure::new(Molecule::new(atoms, Vec::new()), annotations);

        let ligand = Molecule::new(
            vec![
                Atom::new("C", Point3::origin()),
                Atom::new("O", Point3::new(1.2, 0.0, 0.0)),
            ],
            vec![Bond::new(0, 1, BondOrder::Double)],
        );

        let (ligand_summary, protein_summary) = summarize(&protein, &ligand);
        assert_eq!(ligand_summary, LigandSummary { atoms: 2, bonds: 1 });
        assert_eq!(
            protein_summary,
            ProteinSummary {
                residues: 3,
                chains: 1
            }
        );
    }

    #[test]
    fn unannotated_protein_has_no_residues_but_one_chain() {
        let protein = ProteinStructure::default();
        let (_, summary) = summarize(&protein, &Molecule::default());
        assert_eq!(summary.residues, 0);
        assert_eq!(summary.chains, 1);
    }
}
