//! Contact detectors.
//!
//! Each detector classifies one kind of interaction and implements
//! [`ContactDetector`]. Detectors read the shared [`DetectionContext`] and never mutate
//! the structures. Within a detector, contacts are emitted in protein-atom order, then
//! ligand-atom order.

use super::context::DetectionContext;
use super::error::AnalysisError;
pub use crate::core::models::contact::{Contact, ContactKind};
use crate::core::models::residue::ResidueAnnotation;

pub mod hbond;
pub mod hydrophobic;
pub mod metal;
pub mod pi_stacking;
pub mod salt_bridge;

pub trait ContactDetector: Send + Sync {
    fn kind(&self) -> ContactKind;

    fn detect(&self, ctx: &DetectionContext) -> Result<Vec<Contact>, AnalysisError>;
}

/// The five detectors in reporting order.
pub fn default_detectors() -> Vec<Box<dyn ContactDetector>> {
    vec![
        Box::new(hbond::HydrogenBondDetector),
        Box::new(hydrophobic::HydrophobicDetector),
        Box::new(pi_stacking::PiStackingDetector),
        Box::new(salt_bridge::SaltBridgeDetector),
        Box::new(metal::MetalCoordinationDetector),
    ]
}

pub(crate) fn contact(
    kind: ContactKind,
    ligand_atom: usize,
    annotation: &ResidueAnnotation,
    distance: f64,
    angle: Option<f64>,
) -> Contact {
    Contact {
        kind,
        ligand_atom,
        protein_resi: annotation.residue_id,
        protein_resn: annotation.residue_name.clone(),
        protein_atom: annotation.atom_label.clone(),
        distance,
        angle,
    }
}
