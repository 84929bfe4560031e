pub mod defaults;
pub mod file;

use crate::cli::ParamOverrides;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use file::{FileConfig, FileContactsConfig, FileLimitsConfig};
use ligcontact::engine::config::{AnalysisConfig, ContactParams};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Resolves the effective analysis configuration.
///
/// Precedence, highest first: explicit CLI flags, `--set` values, the config file,
/// then [`DefaultsConfig`].
pub fn build_config(
    config_path: Option<&Path>,
    overrides: &ParamOverrides,
    set_values: &[String],
) -> Result<AnalysisConfig> {
    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    merge(file_config, overrides, set_values)
}

fn merge(
    mut file_config: FileConfig,
    overrides: &ParamOverrides,
    set_values: &[String],
) -> Result<AnalysisConfig> {
    apply_set_values(&mut file_config, set_values)?;
    let defaults = DefaultsConfig::default();
    let contacts = file_config.contacts.unwrap_or_default();
    let limits = file_config.limits.unwrap_or_default();

    let hbond_max_dist = overrides
        .hbond_max_dist
        .or(contacts.hbond_max_dist)
        .unwrap_or(defaults.hbond_max_dist);
    let hbond_min_angle = overrides
        .hbond_min_angle
        .or(contacts.hbond_min_angle)
        .unwrap_or(defaults.hbond_min_angle);
    let hydrophobic_max_dist = overrides
        .hydrophobic_max_dist
        .or(contacts.hydrophobic_max_dist)
        .unwrap_or(defaults.hydrophobic_max_dist);
    let salt_bridge_max_dist = overrides
        .salt_bridge_max_dist
        .or(contacts.salt_bridge_max_dist)
        .unwrap_or(defaults.salt_bridge_max_dist);
    let metal_max_dist = overrides
        .metal_max_dist
        .or(contacts.metal_max_dist)
        .unwrap_or(defaults.metal_max_dist);
    let pi_stack = if overrides.no_pi_stack {
        false
    } else {
        contacts.pi_stack.unwrap_or(defaults.pi_stack)
    };

    let params = ContactParams::builder()
        .hbond_max_dist(hbond_max_dist)
        .hbond_min_angle(hbond_min_angle)
        .hydrophobic_max_dist(hydrophobic_max_dist)
        .pi_stack(pi_stack)
        .salt_bridge_max_dist(salt_bridge_max_dist)
        .metal_max_dist(metal_max_dist)
        .build();

    warn_if_clamped("hbond-max-dist", hbond_max_dist, params.hbond_max_dist());
    warn_if_clamped("hbond-min-angle", hbond_min_angle, params.hbond_min_angle());
    warn_if_clamped(
        "hydrophobic-max-dist",
        hydrophobic_max_dist,
        params.hydrophobic_max_dist(),
    );
    warn_if_clamped(
        "salt-bridge-max-dist",
        salt_bridge_max_dist,
        params.salt_bridge_max_dist(),
    );
    warn_if_clamped("metal-max-dist", metal_max_dist, params.metal_max_dist());

    let config = AnalysisConfig::builder()
        .params(params)
        .max_input_bytes(limits.max_input_bytes.unwrap_or(defaults.max_input_bytes))
        .max_protein_atoms(limits.max_protein_atoms.unwrap_or(defaults.max_protein_atoms))
        .max_ligand_atoms(limits.max_ligand_atoms.unwrap_or(defaults.max_ligand_atoms))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!(?config, "Resolved analysis configuration.");
    Ok(config)
}

fn warn_if_clamped(key: &str, requested: f64, effective: f64) {
    if requested != effective {
        warn!(
            "Value {} for '{}' is outside its allowed range; using {}.",
            requested, key, effective
        );
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn contacts(config: &mut FileConfig) -> &mut FileContactsConfig {
    config.contacts.get_or_insert_with(Default::default)
}

fn limits(config: &mut FileConfig) -> &mut FileLimitsConfig {
    config.limits.get_or_insert_with(Default::default)
}

fn apply_set_values(config: &mut FileConfig, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "contacts.hbond-max-dist" => {
                contacts(config).hbond_max_dist = Some(parse_value(key, value, "float")?)
            }
            "contacts.hbond-min-angle" => {
                contacts(config).hbond_min_angle = Some(parse_value(key, value, "float")?)
            }
            "contacts.hydrophobic-max-dist" => {
                contacts(config).hydrophobic_max_dist = Some(parse_value(key, value, "float")?)
            }
            "contacts.pi-stack" => {
                contacts(config).pi_stack = Some(parse_value(key, value, "boolean")?)
            }
            "contacts.salt-bridge-max-dist" => {
                contacts(config).salt_bridge_max_dist = Some(parse_value(key, value, "float")?)
            }
            "contacts.metal-max-dist" => {
                contacts(config).metal_max_dist = Some(parse_value(key, value, "float")?)
            }
            "limits.max-input-bytes" => {
                limits(config).max_input_bytes = Some(parse_value(key, value, "integer")?)
            }
            "limits.max-protein-atoms" => {
                limits(config).max_protein_atoms = Some(parse_value(key, value, "integer")?)
            }
            "limits.max-ligand-atoms" => {
                limits(config).max_ligand_atoms = Some(parse_value(key, value, "integer")?)
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}
