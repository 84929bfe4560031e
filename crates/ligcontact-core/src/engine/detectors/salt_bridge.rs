use super::{Contact, ContactDetector, ContactKind, contact};
use crate::core::chemistry::identifiers::{is_negative_residue, is_positive_residue};
use crate::core::models::atom::Atom;
use crate::engine::context::DetectionContext;
use crate::engine::error::AnalysisError;
use tracing::{debug, instrument};

/// Putative charge of a ligand atom: nitrogen positive, oxygen and sulfur negative.
fn ligand_is_positive(atom: &Atom) -> Option<bool> {
    match atom.element.as_str() {
        "N" => Some(true),
        "O" | "S" => Some(false),
        _ => None,
    }
}

/// Atoms of charged residues near oppositely charged ligand atoms.
///
/// Charges are assigned from residue names and ligand elements alone; formal charges and
/// protonation states are not considered.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltBridgeDetector;

impl ContactDetector for SaltBridgeDetector {
    fn kind(&self) -> ContactKind {
        ContactKind::SaltBridge
    }

    #[instrument(skip_all, name = "salt_bridge_detector")]
    fn detect(&self, ctx: &DetectionContext) -> Result<Vec<Contact>, AnalysisError> {
        let sites = ctx.protein_sites(|_, annotation| {
            is_positive_residue(&annotation.residue_name)
                || is_negative_residue(&annotation.residue_name)
        });

        let contacts = ctx.pairs_within(&sites, ctx.params.salt_bridge_max_dist(), |site, j, d| {
            let protein_positive = is_positive_residue(&site.annotation.residue_name);
            let ligand_positive = ctx.ligand_atom(j).and_then(ligand_is_positive)?;
            (protein_positive != ligand_positive)
                .then(|| contact(ContactKind::SaltBridge, j, site.annotation, d, None))
        });

        debug!(sites = sites.len(), contacts = contacts.len(), "Salt bridges detected");
        Ok(contacts)
    }
}
