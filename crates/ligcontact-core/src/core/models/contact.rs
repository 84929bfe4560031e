use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a protein-ligand contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContactKind {
    #[serde(rename = "HBOND")]
    HydrogenBond,
    #[serde(rename = "HYDROPHOBIC")]
    Hydrophobic,
    #[serde(rename = "PI-PI")]
    PiStacking,
    #[serde(rename = "SALT_BRIDGE")]
    SaltBridge,
    #[serde(rename = "METAL")]
    Metal,
}

impl ContactKind {
    /// Wire label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HydrogenBond => "HBOND",
            Self::Hydrophobic => "HYDROPHOBIC",
            Self::PiStacking => "PI-PI",
            Self::SaltBridge => "SALT_BRIDGE",
            Self::Metal => "METAL",
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One detected interaction between a ligand atom and a protein atom or ring.
///
/// `distance` never exceeds the threshold of the detector that produced the contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub ligand_atom: usize,
    pub protein_resi: isize,
    pub protein_resn: String,
    pub protein_atom: String,
    pub distance: f64,
    /// Only hydrogen bonds carry an angle.
    pub angle: Option<f64>,
}
