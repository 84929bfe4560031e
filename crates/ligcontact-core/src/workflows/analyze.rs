use crate::core::chemistry::typing::{AtomTyper, HeuristicTyper};
use crate::core::io::pdb::PdbFile;
use crate::core::io::sdf::SdfFile;
use crate::core::io::traits::StructureReader;
use crate::core::models::contact::Contact;
use crate::core::models::molecule::{Molecule, MoleculeRole};
use crate::core::models::structure::ProteinStructure;
use crate::engine::cache::RingCache;
use crate::engine::config::{AnalysisConfig, AnalysisLimits};
use crate::engine::context::DetectionContext;
use crate::engine::detectors::{ContactDetector, default_detectors};
use crate::engine::error::{AnalysisError, InputError};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::summary::{LigandSummary, ProteinSummary, summarize};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of one protein-ligand analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Detector order first, then discovery order within each detector.
    pub contacts: Vec<Contact>,
    pub ligand_summary: LigandSummary,
    pub protein_summary: ProteinSummary,
    pub warnings: Vec<String>,
}

/// Analyzes a protein PDB text against a ligand SDF text with a fresh ring cache.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(
    protein_text: &str,
    ligand_text: &str,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisReport, AnalysisError> {
    let cache = Mutex::new(RingCache::new());
    run_with_cache(protein_text, ligand_text, config, &cache, reporter)
}

/// Like [`run`], but with a caller-owned ring cache, which is cleared before detection.
pub fn run_with_cache(
    protein_text: &str,
    ligand_text: &str,
    config: &AnalysisConfig,
    cache: &Mutex<RingCache>,
    reporter: &ProgressReporter,
) -> Result<AnalysisReport, AnalysisError> {
    info!(
        protein_bytes = protein_text.len(),
        ligand_bytes = ligand_text.len(),
        "Starting protein-ligand contact analysis."
    );

    check_input_size(MoleculeRole::Protein, protein_text, &config.limits)?;
    check_input_size(MoleculeRole::Ligand, ligand_text, &config.limits)?;

    let (protein, ligand) = reporter.phase("Loading Structures", || {
        let protein = PdbFile::read_from_str(protein_text).map_err(InputError::from)?;
        let ligand = SdfFile::read_from_str(ligand_text).map_err(InputError::from)?;
        Ok::<_, AnalysisError>((protein, ligand))
    })?;

    analyze(&protein, &ligand, config, &HeuristicTyper, cache, reporter)
}

/// Runs validation, detection and aggregation on already loaded structures.
#[instrument(skip_all, name = "contact_analysis")]
pub fn analyze(
    protein: &ProteinStructure,
    ligand: &Molecule,
    config: &AnalysisConfig,
    typer: &dyn AtomTyper,
    cache: &Mutex<RingCache>,
    reporter: &ProgressReporter,
) -> Result<AnalysisReport, AnalysisError> {
    check_structure(MoleculeRole::Protein, protein.molecule.atom_count(), &config.limits)?;
    check_structure(MoleculeRole::Ligand, ligand.atom_count(), &config.limits)?;

    cache
        .lock()
        .map_err(|_| AnalysisError::Internal("ring cache lock poisoned".to_string()))?
        .clear();

    let context = DetectionContext::new(protein, ligand, &config.params, typer, cache);
    let detectors = default_detectors();
    let contacts = reporter.phase("Detecting Contacts", || {
        run_detectors(&detectors, &context, reporter)
    })?;

    if let Ok(cache) = cache.lock() {
        let (hits, misses) = cache.stats();
        debug!(hits, misses, entries = cache.len(), "Ring cache usage.");
    }

    let (ligand_summary, protein_summary) = summarize(protein, ligand);

    info!(
        contacts = contacts.len(),
        ligand_atoms = ligand_summary.atoms,
        protein_residues = protein_summary.residues,
        "Analysis complete."
    );

    Ok(AnalysisReport {
        contacts,
        ligand_summary,
        protein_summary,
        warnings: Vec::new(),
    })
}

fn check_input_size(
    role: MoleculeRole,
    text: &str,
    limits: &AnalysisLimits,
) -> Result<(), InputError> {
    if text.len() > limits.max_input_bytes {
        return Err(InputError::TooLarge {
            role,
            bytes: text.len(),
            limit: limits.max_input_bytes,
        });
    }
    Ok(())
}

fn check_structure(
    role: MoleculeRole,
    atoms: usize,
    limits: &AnalysisLimits,
) -> Result<(), InputError> {
    let limit = match role {
        MoleculeRole::Protein => limits.max_protein_atoms,
        MoleculeRole::Ligand => limits.max_ligand_atoms,
    };
    if atoms == 0 {
        return Err(InputError::Empty { role });
    }
    if atoms > limit {
        return Err(InputError::TooManyAtoms { role, atoms, limit });
    }
    Ok(())
}

/// Runs every detector and concatenates the outputs in detector order.
fn run_detectors(
    detectors: &[Box<dyn ContactDetector>],
    context: &DetectionContext,
    reporter: &ProgressReporter,
) -> Result<Vec<Contact>, AnalysisError> {
    reporter.report(Progress::TaskStart {
        total_steps: detectors.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = detectors.iter();

    #[cfg(feature = "parallel")]
    let iterator = detectors.par_iter();

    let outputs: Vec<Result<Vec<Contact>, AnalysisError>> = iterator
        .map(|detector| {
            let result = detector.detect(context);
            if let Ok(contacts) = &result {
                debug!(kind = %detector.kind(), count = contacts.len(), "Detector finished.");
            }
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let mut contacts = Vec::new();
    for output in outputs {
        contacts.extend(output?);
    }
    Ok(contacts)
}
