//! # Core Models Module
//!
//! Data structures describing the two partners of an analysis.
//!
//! - [`atom`] - Individual atoms with element, position and aromatic flag
//! - [`topology`] - Bonds and bond orders between atom indices
//! - [`molecule`] - Ordered atom list plus bonds, with content fingerprinting
//! - [`residue`] - Residue metadata attached to protein atoms
//! - [`structure`] - A protein molecule together with its residue annotations
//! - [`contact`] - Classified interactions reported by the detectors
//!
//! Atom indices are positional and stay stable for the lifetime of one analysis call.
//!
//! ```ignore
//! use ligcontact::core::models::{atom::Atom, molecule::Molecule};
//! use nalgebra::Point3;
//!
//! let molecule = Molecule::new(vec![Atom::new("C", Point3::new(0.0, 0.0, 0.0))], Vec::new());
//! assert_eq!(molecule.atom_count(), 1);
//! ```

pub mod atom;
pub mod contact;
pub mod molecule;
pub mod residue;
pub mod structure;
pub mod topology;
