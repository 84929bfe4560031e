use super::{Contact, ContactDetector, ContactKind, contact};
use crate::core::models::molecule::MoleculeRole;
use crate::core::utils::geometry::{distance, normal_angle_degrees};
use crate::engine::context::DetectionContext;
use crate::engine::error::AnalysisError;
use std::ops::RangeInclusive;
use tracing::{debug, instrument};

/// Accepted ring centroid separation in Angstroms.
pub const CENTROID_DISTANCE_RANGE: RangeInclusive<f64> = 3.5..=7.0;
/// Largest inter-plane angle counted as face-to-face stacking.
pub const MAX_PARALLEL_ANGLE: f64 = 30.0;
/// Inter-plane angles counted as edge-to-face (T-shaped) stacking.
pub const PERPENDICULAR_ANGLE_RANGE: RangeInclusive<f64> = 60.0..=120.0;

pub fn is_stacking_angle(angle: f64) -> bool {
    angle <= MAX_PARALLEL_ANGLE || PERPENDICULAR_ANGLE_RANGE.contains(&angle)
}

/// Aromatic ring pairs whose centroids and planes are arranged for π-π stacking.
///
/// A protein ring is reported through the annotation of its first member atom; a ligand
/// ring through its first member index. The reported distance is the centroid distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiStackingDetector;

impl ContactDetector for PiStackingDetector {
    fn kind(&self) -> ContactKind {
        ContactKind::PiStacking
    }

    #[instrument(skip_all, name = "pi_stacking_detector")]
    fn detect(&self, ctx: &DetectionContext) -> Result<Vec<Contact>, AnalysisError> {
        if !ctx.params.pi_stack() {
            return Ok(Vec::new());
        }

        let protein_rings = ctx.rings(MoleculeRole::Protein)?;
        let ligand_rings = ctx.rings(MoleculeRole::Ligand)?;

        let mut contacts = Vec::new();
        for protein_ring in protein_rings.iter() {
            let Some(annotation) = ctx.protein.annotation(protein_ring.first_member()) else {
                continue;
            };
            for ligand_ring in ligand_rings.iter() {
                let d = distance(&protein_ring.centroid, &ligand_ring.centroid);
                if !CENTROID_DISTANCE_RANGE.contains(&d) {
                    continue;
                }
                let angle = normal_angle_degrees(&protein_ring.normal, &ligand_ring.normal);
                if !is_stacking_angle(angle) {
                    continue;
                }
                contacts.push(contact(
                    ContactKind::PiStacking,
                    ligand_ring.first_member(),
                    annotation,
                    d,
                    None,
                ));
            }
        }

        debug!(
            protein_rings = protein_rings.len(),
            ligand_rings = ligand_rings.len(),
            contacts = contacts.len(),
            "π-stacking detected"
        );
        Ok(contacts)
    }
}
