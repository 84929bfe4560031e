use serde::Serialize;

/// Residue name assigned to every ligand atom when it is typed.
pub const LIGAND_RESIDUE_NAME: &str = "LIG";

/// Residue metadata for one protein atom, as read from its coordinate record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResidueAnnotation {
    pub residue_name: String, // Three-letter residue code (e.g., "ARG")
    pub residue_id: isize,    // Residue sequence number from the source file
    pub atom_label: String,   // Atom name within the residue (e.g., "NE")
}

impl ResidueAnnotation {
    pub fn new(residue_name: &str, residue_id: isize, atom_label: &str) -> Self {
        Self {
            residue_name: residue_name.trim().to_string(),
            residue_id,
            atom_label: atom_label.trim().to_string(),
        }
    }

    /// The (name, sequence number) pair identifying the residue this atom belongs to.
    pub fn residue_key(&self) -> (&str, isize) {
        (self.residue_name.as_str(), self.residue_id)
    }
}
