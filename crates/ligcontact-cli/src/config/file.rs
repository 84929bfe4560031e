use crate::error::{CliError, Result};
use ligcontact::engine::config::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileContactsConfig {
    pub hbond_max_dist: Option<f64>,
    pub hbond_min_angle: Option<f64>,
    pub hydrophobic_max_dist: Option<f64>,
    pub pi_stack: Option<bool>,
    pub salt_bridge_max_dist: Option<f64>,
    pub metal_max_dist: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLimitsConfig {
    pub max_input_bytes: Option<usize>,
    pub max_protein_atoms: Option<usize>,
    pub max_ligand_atoms: Option<usize>,
}

/// On-disk TOML layout. Every key is optional.
///
/// ```toml
/// [contacts]
/// hbond-max-dist = 3.5
/// pi-stack = true
///
/// [limits]
/// max-ligand-atoms = 1000
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub contacts: Option<FileContactsConfig>,
    pub limits: Option<FileLimitsConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Other(e.into()))
    }
}

impl From<&AnalysisConfig> for FileConfig {
    fn from(config: &AnalysisConfig) -> Self {
        let params = &config.params;
        Self {
            contacts: Some(FileContactsConfig {
                hbond_max_dist: Some(params.hbond_max_dist()),
                hbond_min_angle: Some(params.hbond_min_angle()),
                hydrophobic_max_dist: Some(params.hydrophobic_max_dist()),
                pi_stack: Some(params.pi_stack()),
                salt_bridge_max_dist: Some(params.salt_bridge_max_dist()),
                metal_max_dist: Some(params.metal_max_dist()),
            }),
            limits: Some(FileLimitsConfig {
                max_input_bytes: Some(config.limits.max_input_bytes),
                max_protein_atoms: Some(config.limits.max_protein_atoms),
                max_ligand_atoms: Some(config.limits.max_ligand_atoms),
            }),
        }
    }
}
