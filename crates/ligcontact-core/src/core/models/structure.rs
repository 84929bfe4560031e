use super::atom::Atom;
use super::molecule::Molecule;
use super::residue::ResidueAnnotation;
use std::collections::BTreeMap;

/// A receptor molecule plus the residue metadata of its atoms.
///
/// Atoms whose residue fields could not be read are present in the molecule but absent
/// from the annotation map; detectors that need residue context skip them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinStructure {
    pub molecule: Molecule,
    annotations: BTreeMap<usize, ResidueAnnotation>,
}

impl ProteinStructure {
    /// Builds a structure, dropping annotations that point past the end of the atom list.
    pub fn new(molecule: Molecule, mut annotations: BTreeMap<usize, ResidueAnnotation>) -> Self {
        let atom_count = molecule.atom_count();
        annotations.retain(|&index, _| index < atom_count);
        Self {
            molecule,
            annotations,
        }
    }

    pub fn annotation(&self, index: usize) -> Option<&ResidueAnnotation> {
        self.annotations.get(&index)
    }

    pub fn annotations(&self) -> &BTreeMap<usize, ResidueAnnotation> {
        &self.annotations
    }

    /// Iterates over annotated atoms in ascending index order.
    pub fn annotated_atoms(&self) -> impl Iterator<Item = (usize, &Atom, &ResidueAnnotation)> {
        self.annotations.iter().filter_map(|(&index, annotation)| {
            self.molecule
                .atom(index)
                .map(|atom| (index, atom, annotation))
        })
    }
}
