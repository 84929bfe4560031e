//! Chemistry knowledge used to classify atoms.
//!
//! - [`identifiers`] - Static lookup tables (labels, residues, elements, radii)
//! - [`typing`] - Hydrogen-bond donor/acceptor typing behind the `AtomTyper` strategy trait
//! - [`aromaticity`] - Aromatic flag assignment for ligands and protein side chains

pub mod aromaticity;
pub mod identifiers;
pub mod typing;
