use super::{Contact, ContactDetector, ContactKind, contact};
use crate::core::chemistry::typing::HBondRole;
use crate::engine::context::{DetectionContext, ProteinSite};
use crate::engine::error::AnalysisError;
use crate::engine::utils::query::QueryPoint;
use nalgebra::Point3;
use tracing::{debug, instrument};

/// Angle reported for every hydrogen bond.
///
/// Structures carry no hydrogen positions, so the donor-H-acceptor angle cannot be
/// measured; a linear arrangement is assumed and compared against the minimum angle.
pub const PLACEHOLDER_ANGLE: f64 = 180.0;

/// A protein atom typed once, before any neighbour search.
struct PolarSite<'a> {
    site: ProteinSite<'a>,
    role: HBondRole,
}

impl QueryPoint for PolarSite<'_> {
    fn position(&self) -> &Point3<f64> {
        &self.site.atom.position
    }
}

/// Pairs a protein donor with a ligand acceptor, or the reverse, within the distance
/// threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct HydrogenBondDetector;

impl ContactDetector for HydrogenBondDetector {
    fn kind(&self) -> ContactKind {
        ContactKind::HydrogenBond
    }

    #[instrument(skip_all, name = "hbond_detector")]
    fn detect(&self, ctx: &DetectionContext) -> Result<Vec<Contact>, AnalysisError> {
        let params = ctx.params;
        if PLACEHOLDER_ANGLE < params.hbond_min_angle() {
            return Ok(Vec::new());
        }

        let sites: Vec<PolarSite> = ctx
            .protein_sites(|_, _| true)
            .into_iter()
            .filter_map(|site| {
                let role = ctx.typer.classify_atom(
                    site.atom,
                    &site.annotation.residue_name,
                    &site.annotation.atom_label,
                );
                role.is_polar().then_some(PolarSite { site, role })
            })
            .collect();

        let contacts = ctx.pairs_within(&sites, params.hbond_max_dist(), |polar, j, d| {
            polar.role.complements(&ctx.ligand_role(j)).then(|| {
                contact(
                    ContactKind::HydrogenBond,
                    j,
                    polar.site.annotation,
                    d,
                    Some(PLACEHOLDER_ANGLE),
                )
            })
        });

        debug!(sites = sites.len(), contacts = contacts.len(), "Hydrogen bonds detected");
        Ok(contacts)
    }
}
