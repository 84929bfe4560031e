use super::{Contact, ContactDetector, ContactKind, contact};
use crate::core::chemistry::identifiers::{is_coordinating_element, is_metal};
use crate::engine::context::DetectionContext;
use crate::engine::error::AnalysisError;
use tracing::{debug, instrument};

/// Metal ions of the receptor coordinated by ligand O, N or S atoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetalCoordinationDetector;

impl ContactDetector for MetalCoordinationDetector {
    fn kind(&self) -> ContactKind {
        ContactKind::Metal
    }

    #[instrument(skip_all, name = "metal_detector")]
    fn detect(&self, ctx: &DetectionContext) -> Result<Vec<Contact>, AnalysisError> {
        let sites = ctx.protein_sites(|atom, _| is_metal(&atom.element));
        if sites.is_empty() {
            return Ok(Vec::new());
        }

        let contacts = ctx.pairs_within(&sites, ctx.params.metal_max_dist(), |site, j, d| {
            ctx.ligand_atom(j)
                .filter(|atom| is_coordinating_element(&atom.element))
                .map(|_| contact(ContactKind::Metal, j, site.annotation, d, None))
        });

        debug!(metals = sites.len(), contacts = contacts.len(), "Metal coordination detected");
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cache::RingCache;
    use crate::engine::config::ContactParams;
    use crate::engine::detectors::test_support::{context, ligand, protein};
    use std::sync::Mutex;

    #[test]
    fn zinc_coordinated_by_heteroatoms_only() {
        let protein = protein(&[
            ("ZN", "ZN", 301, "ZN", [0.0, 0.0, 0.0]),
            ("C", "CYS", 12, "CB", [5.0, 0.0, 0.0]),
        ]);
        let ligand = ligand(&[
            ("S", [2.3, 0.0, 0.0]),
            ("C", [0.0, 1.5, 0.0]),
            ("O", [0.0, 0.0, -2.0]),
            ("N", [0.0, 0.0, 3.0]),
        ]);
        let params = ContactParams::default();
        let cache = Mutex::new(RingCache::new());
        let ctx = context(&protein, &ligand, &params, &cache);

        let contacts = MetalCoordinationDetector.detect(&ctx).unwrap();
        let ligand_atoms: Vec<usize> = contacts.iter().map(|c| c.ligand_atom).collect();
        assert_eq!(ligand_atoms, vec![0, 2]);
        assert!(contacts.iter().all(|c| c.kind == ContactKind::Metal));
        assert!(contacts.iter().all(|c| c.protein_resn == "ZN"));
    }

    #[test]
    fn structures_without_metals_yield_nothing() {
        let protein = protein(&[("C", "ALA", 1, "CA", [0.0, 0.0, 0.0])]);
        let ligand = ligand(&[("O", [0.0, 0.0, 1.0])]);
        let params = ContactParams::default();
        let cache = Mutex::new(RingCache::new());
        let ctx = context(&protein, &ligand, &params, &cache);
        assert!(MetalCoordinationDetector.detect(&ctx).unwrap().is_empty());
    }

    #[test]
    fn coordination_cutoff_is_inclusive() {
        let protein = protein(&[("ZN", "ZN", 301, "ZN", [0.0, 0.0, 0.0])]);
        let ligand = ligand(&[("O", [0.0, 0.0, 2.8]), ("O", [0.0, 0.0, 2.8001])]);
        let params = ContactParams::default();
        let cache = Mutex::new(RingCache::new());
        let ctx = context(&protein, &ligand, &params, &cache);

        let contacts = MetalCoordinationDetector.detect(&ctx).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].ligand_atom, 0);
        assert_eq!(contacts[0].distance, 2.8);
    }
}
