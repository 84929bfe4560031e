//! # Workflows Module
//!
//! High-level entry points that run a complete analysis.
//!
//! - **Analysis Workflow** ([`analyze`]) - Validates and loads a protein PDB text and a
//!   ligand SDF text, runs the five contact detectors against a request-scoped (or
//!   caller-owned) ring cache, and aggregates the result into an
//!   [`analyze::AnalysisReport`].
//!
//! Every failure is an [`crate::engine::error::AnalysisError`]; callers use
//! `is_invalid_input()` to separate bad input from engine faults.

pub mod analyze;
