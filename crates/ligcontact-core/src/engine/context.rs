use super::cache::{Ring, RingCache};
use super::config::ContactParams;
use super::error::AnalysisError;
use super::utils::query::{LigandIndex, QueryPoint, collect_pairs};
use crate::core::chemistry::typing::{AtomTyper, HBondRole};
use crate::core::models::atom::Atom;
use crate::core::models::molecule::{Molecule, MoleculeRole};
use crate::core::models::residue::ResidueAnnotation;
use crate::core::models::structure::ProteinStructure;
use nalgebra::Point3;
use std::sync::{Arc, Mutex};

/// An annotated protein atom selected by a detector as a neighbour query.
pub struct ProteinSite<'a> {
    pub index: usize,
    pub atom: &'a Atom,
    pub annotation: &'a ResidueAnnotation,
}

impl QueryPoint for ProteinSite<'_> {
    fn position(&self) -> &Point3<f64> {
        &self.atom.position
    }
}

/// Everything a detector needs for one analysis.
///
/// Built once per run and shared read-only by all detectors. The ring cache sits behind
/// a lock so that detectors can run concurrently.
pub struct DetectionContext<'a> {
    pub protein: &'a ProteinStructure,
    pub ligand: &'a Molecule,
    pub params: &'a ContactParams,
    pub typer: &'a dyn AtomTyper,
    ring_cache: &'a Mutex<RingCache>,
    ligand_index: LigandIndex,
    ligand_roles: Vec<HBondRole>,
}

impl<'a> DetectionContext<'a> {
    pub fn new(
        protein: &'a ProteinStructure,
        ligand: &'a Molecule,
        params: &'a ContactParams,
        typer: &'a dyn AtomTyper,
        ring_cache: &'a Mutex<RingCache>,
    ) -> Self {
        let ligand_roles = ligand
            .atoms()
            .iter()
            .enumerate()
            .map(|(i, atom)| typer.classify_ligand_atom(atom, i))
            .collect();
        Self {
            protein,
            ligand,
            params,
            typer,
            ring_cache,
            ligand_index: LigandIndex::new(ligand),
            ligand_roles,
        }
    }

    /// Hydrogen-bond role of a ligand atom, typed in ligand context.
    pub fn ligand_role(&self, index: usize) -> HBondRole {
        self.ligand_roles.get(index).copied().unwrap_or_default()
    }

    pub fn ligand_atom(&self, index: usize) -> Option<&'a Atom> {
        self.ligand.atom(index)
    }

    /// Annotated protein atoms accepted by `filter`, in ascending index order.
    pub fn protein_sites<F>(&self, filter: F) -> Vec<ProteinSite<'a>>
    where
        F: Fn(&Atom, &ResidueAnnotation) -> bool,
    {
        self.protein
            .annotated_atoms()
            .filter(|(_, atom, annotation)| filter(atom, annotation))
            .map(|(index, atom, annotation)| ProteinSite {
                index,
                atom,
                annotation,
            })
            .collect()
    }

    /// Visits every (site, ligand atom) pair within `radius` in nested-loop order.
    ///
    /// `sites` must be in ascending protein index order, as [`Self::protein_sites`]
    /// returns them.
    pub fn pairs_within<Q, T, F>(&self, sites: &[Q], radius: f64, emit: F) -> Vec<T>
    where
        Q: QueryPoint + Sync,
        T: Send,
        F: Fn(&Q, usize, f64) -> Option<T> + Sync,
    {
        collect_pairs(sites, &self.ligand_index, radius, emit)
    }

    /// Ring geometry for one side of the interaction, through the shared cache.
    pub fn rings(&self, role: MoleculeRole) -> Result<Arc<[Ring]>, AnalysisError> {
        let molecule = match role {
            MoleculeRole::Protein => &self.protein.molecule,
            MoleculeRole::Ligand => self.ligand,
        };
        let mut cache = self
            .ring_cache
            .lock()
            .map_err(|_| AnalysisError::Internal("ring cache lock poisoned".to_string()))?;
        Ok(cache.get_rings(molecule, role))
    }
}
