//! # Engine Module
//!
//! The geometric contact classification engine.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Clamped contact thresholds, input limits and their builders
//! - **Error Handling** ([`error`]) - Input versus internal failure classes
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Ring Geometry Cache** ([`cache`]) - Aromatic ring perception with TTL and capacity bounds
//! - **Detection Context** ([`context`]) - Shared read-only state and neighbour search for detectors
//! - **Detectors** ([`detectors`]) - Hydrogen bond, hydrophobic, π-stacking, salt bridge and metal
//! - **Summaries** ([`summary`]) - Ligand and protein counts reported alongside contacts
//!
//! Detectors only see a [`context::DetectionContext`], and typing goes through the
//! [`crate::core::chemistry::typing::AtomTyper`] trait, so either side can be replaced
//! independently.

pub mod cache;
pub mod config;
pub mod context;
pub mod detectors;
pub mod error;
pub mod progress;
pub mod summary;
pub(crate) mod utils;
