//! # Core Module
//!
//! Fundamental building blocks for protein-ligand contact analysis.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, molecules and residue annotations
//! - **Chemistry** ([`chemistry`]) - Donor/acceptor typing, residue and element tables, aromaticity
//! - **File I/O** ([`io`]) - PDB and SDF readers, JSON/CSV report writers
//! - **Utilities** ([`utils`]) - Vector geometry and ring perception

pub mod chemistry;
pub mod io;
pub mod models;
pub mod utils;
