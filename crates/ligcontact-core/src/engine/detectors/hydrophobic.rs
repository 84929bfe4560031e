use super::{Contact, ContactDetector, ContactKind, contact};
use crate::engine::context::DetectionContext;
use crate::engine::error::AnalysisError;
use tracing::{debug, instrument};

/// Carbon-carbon contacts within the hydrophobic distance threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct HydrophobicDetector;

impl ContactDetector for HydrophobicDetector {
    fn kind(&self) -> ContactKind {
        ContactKind::Hydrophobic
    }

    #[instrument(skip_all, name = "hydrophobic_detector")]
    fn detect(&self, ctx: &DetectionContext) -> Result<Vec<Contact>, AnalysisError> {
        let sites = ctx.protein_sites(|atom, _| atom.is_carbon());

        let contacts = ctx.pairs_within(&sites, ctx.params.hydrophobic_max_dist(), |site, j, d| {
            ctx.ligand_atom(j)
                .filter(|atom| atom.is_carbon())
                .map(|_| contact(ContactKind::Hydrophobic, j, site.annotation, d, None))
        });

        debug!(sites = sites.len(), contacts = contacts.len(), "Hydrophobic contacts detected");
        Ok(contacts)
    }
}
