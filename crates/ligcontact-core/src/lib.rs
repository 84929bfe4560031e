//! # ligcontact Core Library
//!
//! Classifies non-covalent contacts between a receptor (protein) and a small-molecule
//! ligand from their atomic coordinates: hydrogen bonds, hydrophobic contacts, π–π
//! stacking, salt bridges and metal coordination.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `ProteinStructure`),
//!   chemistry tables (donor/acceptor typing, charged residues, metals), geometry and ring
//!   perception, and structure readers/report writers.
//!
//! - **[`engine`]: The Logic Core.** Analysis configuration with clamped thresholds, the
//!   ring geometry cache, the five contact detectors behind one `ContactDetector` trait and
//!   the summary aggregator.
//!
//! - **[`workflows`]: The Public API.** Ties loading, validation, detection and aggregation
//!   into one analysis call that returns an `AnalysisReport`.

pub mod core;
pub mod engine;
pub mod workflows;
