use super::identifiers::{
    is_backbone_carbonyl_oxygen, is_donor_only_nitrogen, is_hydroxyl_oxygen, is_imidazole_nitrogen,
};
use crate::core::models::atom::Atom;
use crate::core::models::residue::LIGAND_RESIDUE_NAME;
use serde::Serialize;

/// Hydrogen-bonding capability of one atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct HBondRole {
    pub is_donor: bool,
    pub is_acceptor: bool,
}

impl HBondRole {
    pub const NONE: Self = Self::new(false, false);
    pub const DONOR: Self = Self::new(true, false);
    pub const ACCEPTOR: Self = Self::new(false, true);
    pub const BOTH: Self = Self::new(true, true);

    pub const fn new(is_donor: bool, is_acceptor: bool) -> Self {
        Self {
            is_donor,
            is_acceptor,
        }
    }

    /// True if the atom can take part in a hydrogen bond at all.
    pub fn is_polar(&self) -> bool {
        self.is_donor || self.is_acceptor
    }

    /// A donor on one side must meet an acceptor on the other.
    ///
    /// The relation is symmetric: `a.complements(&b) == b.complements(&a)`.
    pub fn complements(&self, other: &HBondRole) -> bool {
        (self.is_donor && other.is_acceptor) || (self.is_acceptor && other.is_donor)
    }
}

/// Strategy for assigning donor/acceptor roles.
///
/// Detectors only see this trait, so a more rigorous chemical model can replace the
/// label heuristic without touching them.
pub trait AtomTyper: Send + Sync {
    /// Classifies an atom from its element symbol and residue context.
    ///
    /// Must be total: unknown elements or labels yield [`HBondRole::NONE`].
    fn classify(&self, element: &str, residue_name: &str, atom_label: &str) -> HBondRole;

    fn classify_atom(&self, atom: &Atom, residue_name: &str, atom_label: &str) -> HBondRole {
        self.classify(&atom.element, residue_name, atom_label)
    }

    /// Classifies a ligand atom under the synthetic ligand residue context.
    fn classify_ligand_atom(&self, atom: &Atom, index: usize) -> HBondRole {
        self.classify(&atom.element, LIGAND_RESIDUE_NAME, &format!("L{index}"))
    }
}

/// Element-and-label lookup typing.
///
/// This is a heuristic rather than a chemical determination: protonation states,
/// tautomers and hydrogen positions are not considered.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTyper;

impl HeuristicTyper {
    fn classify_ligand(element: &str) -> HBondRole {
        match element {
            "N" => HBondRole::DONOR,
            "O" => HBondRole::ACCEPTOR,
            "S" => HBondRole::BOTH,
            _ => HBondRole::NONE,
        }
    }

    fn classify_nitrogen(atom_label: &str) -> HBondRole {
        match atom_label {
            label if is_imidazole_nitrogen(label) => HBondRole::BOTH,
            label if is_donor_only_nitrogen(label) => HBondRole::DONOR,
            _ => HBondRole::DONOR,
        }
    }

    fn classify_oxygen(atom_label: &str) -> HBondRole {
        match atom_label {
            label if is_hydroxyl_oxygen(label) => HBondRole::BOTH,
            label if is_backbone_carbonyl_oxygen(label) => HBondRole::ACCEPTOR,
            _ => HBondRole::ACCEPTOR,
        }
    }
}

impl AtomTyper for HeuristicTyper {
    fn classify(&self, element: &str, residue_name: &str, atom_label: &str) -> HBondRole {
        let element = element.trim().to_ascii_uppercase();

        if residue_name.trim() == LIGAND_RESIDUE_NAME {
            return Self::classify_ligand(&element);
        }

        match element.as_str() {
            "N" => Self::classify_nitrogen(atom_label),
            "O" => Self::classify_oxygen(atom_label),
            "S" => HBondRole::BOTH,
            _ => HBondRole::NONE,
        }
    }
}
