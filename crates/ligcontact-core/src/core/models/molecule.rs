use super::atom::Atom;
use super::topology::Bond;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which side of the interaction a molecule plays.
///
/// Also namespaces ring cache entries so that a protein and a ligand with identical
/// content never share a cached ring list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoleculeRole {
    Protein,
    Ligand,
}

impl fmt::Display for MoleculeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MoleculeRole::Protein => "Protein",
                MoleculeRole::Ligand => "Ligand",
            }
        )
    }
}

/// An ordered list of atoms together with the bonds between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        Self { atoms, bonds }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub(crate) fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Builds a sorted, de-duplicated neighbour list for every atom.
    ///
    /// Bonds referencing indices outside the atom list and self-bonds are ignored.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.atoms.len()];
        for bond in &self.bonds {
            let (a, b) = (bond.atom1, bond.atom2);
            if a == b || a >= self.atoms.len() || b >= self.atoms.len() {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        adjacency
    }

    /// Content hash over elements, coordinates, aromatic flags and bonds.
    ///
    /// Two molecules with the same fingerprint and atom count are treated as the same
    /// molecule by the ring cache.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.atoms.len().hash(&mut hasher);
        for atom in &self.atoms {
            atom.element.hash(&mut hasher);
            atom.position.x.to_bits().hash(&mut hasher);
            atom.position.y.to_bits().hash(&mut hasher);
            atom.position.z.to_bits().hash(&mut hasher);
            atom.aromatic.hash(&mut hasher);
        }
        self.bonds.hash(&mut hasher);
        hasher.finish()
    }
}
