//! Structure readers and report writers.
//!
//! Readers turn structure-file text into the crate's molecular models: [`pdb`] for
//! protein coordinate files and [`sdf`] for V2000 ligand molfiles. Both implement the
//! [`traits::StructureReader`] interface, which also provides string and path entry
//! points. [`report`] serializes analysis results as JSON or CSV.

pub mod pdb;
pub mod report;
pub mod sdf;
pub mod traits;
