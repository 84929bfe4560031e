/// Bond multiplicity as read from a CTfile or inferred from distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Maps the bond type field of a CTfile (MOL/SDF) bond line.
    pub fn from_ctfile(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Aromatic),
            _ => None,
        }
    }

    /// True for bonds carrying a π component (double, triple or aromatic).
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Double | Self::Triple | Self::Aromatic)
    }
}

/// An undirected bond between two atom indices of the same molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// Returns the atom on the other end of the bond, if `atom` is one of its ends.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if self.atom1 == atom {
            Some(self.atom2)
        } else if self.atom2 == atom {
            Some(self.atom1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_order_from_ctfile_maps_standard_codes() {
        assert_eq!(BondOrder::from_ctfile(1), Some(BondOrder::Single));
        assert_eq!(BondOrder::from_ctfile(2), Some(BondOrder::Double));
        assert_eq!(BondOrder::from_ctfile(3), Some(BondOrder::Triple));
        assert_eq!(BondOrder::from_ctfile(4), Some(BondOrder::Aromatic));
        assert_eq!(BondOrder::from_ctfile(8), None);
    }

    #[test]
    fn only_single_bonds_are_not_multiple() {
        assert!(!BondOrder::Single.is_multiple());
        assert!(BondOrder::Double.is_multiple());
        assert!(BondOrder::Triple.is_multiple());
        assert!(BondOrder::Aromatic.is_multiple());
    }

    #[test]
    fn bond_contains_and_partner() {
        let bond = Bond::new(3, 7, BondOrder::Double);
        assert!(bond.contains(3));
        assert!(bond.contains(7));
        assert!(!bond.contains(5));
        assert_eq!(bond.partner(3), Some(7));
        assert_eq!(bond.partner(7), Some(3));
        assert_eq!(bond.partner(1), None);
    }
}
