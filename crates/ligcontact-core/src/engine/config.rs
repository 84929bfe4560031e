use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub const HBOND_MAX_DIST_RANGE: RangeInclusive<f64> = 0.5..=10.0;
pub const HBOND_MIN_ANGLE_RANGE: RangeInclusive<f64> = 90.0..=180.0;
pub const HYDROPHOBIC_MAX_DIST_RANGE: RangeInclusive<f64> = 1.0..=10.0;
pub const SALT_BRIDGE_MAX_DIST_RANGE: RangeInclusive<f64> = 1.0..=10.0;
pub const METAL_MAX_DIST_RANGE: RangeInclusive<f64> = 1.0..=5.0;

pub const DEFAULT_HBOND_MAX_DIST: f64 = 3.5;
pub const DEFAULT_HBOND_MIN_ANGLE: f64 = 120.0;
pub const DEFAULT_HYDROPHOBIC_MAX_DIST: f64 = 4.0;
pub const DEFAULT_SALT_BRIDGE_MAX_DIST: f64 = 4.0;
pub const DEFAULT_METAL_MAX_DIST: f64 = 2.8;
pub const DEFAULT_PI_STACK: bool = true;

/// Clamps into `range`; a NaN falls back to `default`.
fn clamp_to(value: f64, range: &RangeInclusive<f64>, default: f64) -> f64 {
    if value.is_nan() {
        default
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

/// Geometric thresholds for the contact detectors.
///
/// Every constructor clamps each value into its allowed range, and the fields are
/// private, so a `ContactParams` value is always within bounds. Deserialization goes
/// through the same clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawContactParams")]
pub struct ContactParams {
    hbond_max_dist: f64,
    hbond_min_angle: f64,
    hydrophobic_max_dist: f64,
    pi_stack: bool,
    salt_bridge_max_dist: f64,
    metal_max_dist: f64,
}

impl ContactParams {
    pub fn new(
        hbond_max_dist: f64,
        hbond_min_angle: f64,
        hydrophobic_max_dist: f64,
        pi_stack: bool,
        salt_bridge_max_dist: f64,
        metal_max_dist: f64,
    ) -> Self {
        Self {
            hbond_max_dist: clamp_to(hbond_max_dist, &HBOND_MAX_DIST_RANGE, DEFAULT_HBOND_MAX_DIST),
            hbond_min_angle: clamp_to(
                hbond_min_angle,
                &HBOND_MIN_ANGLE_RANGE,
                DEFAULT_HBOND_MIN_ANGLE,
            ),
            hydrophobic_max_dist: clamp_to(
                hydrophobic_max_dist,
                &HYDROPHOBIC_MAX_DIST_RANGE,
                DEFAULT_HYDROPHOBIC_MAX_DIST,
            ),
            pi_stack,
            salt_bridge_max_dist: clamp_to(
                salt_bridge_max_dist,
                &SALT_BRIDGE_MAX_DIST_RANGE,
                DEFAULT_SALT_BRIDGE_MAX_DIST,
            ),
            metal_max_dist: clamp_to(metal_max_dist, &METAL_MAX_DIST_RANGE, DEFAULT_METAL_MAX_DIST),
        }
    }

    pub fn builder() -> ContactParamsBuilder {
        ContactParamsBuilder::new()
    }

    pub fn hbond_max_dist(&self) -> f64 {
        self.hbond_max_dist
    }
    pub fn hbond_min_angle(&self) -> f64 {
        self.hbond_min_angle
    }
    pub fn hydrophobic_max_dist(&self) -> f64 {
        self.hydrophobic_max_dist
    }
    pub fn pi_stack(&self) -> bool {
        self.pi_stack
    }
    pub fn salt_bridge_max_dist(&self) -> f64 {
        self.salt_bridge_max_dist
    }
    pub fn metal_max_dist(&self) -> f64 {
        self.metal_max_dist
    }
}

impl Default for ContactParams {
    fn default() -> Self {
        Self::new(
            DEFAULT_HBOND_MAX_DIST,
            DEFAULT_HBOND_MIN_ANGLE,
            DEFAULT_HYDROPHOBIC_MAX_DIST,
            DEFAULT_PI_STACK,
            DEFAULT_SALT_BRIDGE_MAX_DIST,
            DEFAULT_METAL_MAX_DIST,
        )
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawContactParams {
    hbond_max_dist: f64,
    hbond_min_angle: f64,
    hydrophobic_max_dist: f64,
    pi_stack: bool,
    salt_bridge_max_dist: f64,
    metal_max_dist: f64,
}

impl Default for RawContactParams {
    fn default() -> Self {
        Self {
            hbond_max_dist: DEFAULT_HBOND_MAX_DIST,
            hbond_min_angle: DEFAULT_HBOND_MIN_ANGLE,
            hydrophobic_max_dist: DEFAULT_HYDROPHOBIC_MAX_DIST,
            pi_stack: DEFAULT_PI_STACK,
            salt_bridge_max_dist: DEFAULT_SALT_BRIDGE_MAX_DIST,
            metal_max_dist: DEFAULT_METAL_MAX_DIST,
        }
    }
}

impl From<RawContactParams> for ContactParams {
    fn from(raw: RawContactParams) -> Self {
        Self::new(
            raw.hbond_max_dist,
            raw.hbond_min_angle,
            raw.hydrophobic_max_dist,
            raw.pi_stack,
            raw.salt_bridge_max_dist,
            raw.metal_max_dist,
        )
    }
}

#[derive(Debug, Default, Clone)]
pub struct ContactParamsBuilder {
    hbond_max_dist: Option<f64>,
    hbond_min_angle: Option<f64>,
    hydrophobic_max_dist: Option<f64>,
    pi_stack: Option<bool>,
    salt_bridge_max_dist: Option<f64>,
    metal_max_dist: Option<f64>,
}

impl ContactParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hbond_max_dist(mut self, value: f64) -> Self {
        self.hbond_max_dist = Some(value);
        self
    }
    pub fn hbond_min_angle(mut self, value: f64) -> Self {
        self.hbond_min_angle = Some(value);
        self
    }
    pub fn hydrophobic_max_dist(mut self, value: f64) -> Self {
        self.hydrophobic_max_dist = Some(value);
        self
    }
    pub fn pi_stack(mut self, enabled: bool) -> Self {
        self.pi_stack = Some(enabled);
        self
    }
    pub fn salt_bridge_max_dist(mut self, value: f64) -> Self {
        self.salt_bridge_max_dist = Some(value);
        self
    }
    pub fn metal_max_dist(mut self, value: f64) -> Self {
        self.metal_max_dist = Some(value);
        self
    }

    /// Fills unset values with defaults and clamps everything.
    pub fn build(self) -> ContactParams {
        ContactParams::new(
            self.hbond_max_dist.unwrap_or(DEFAULT_HBOND_MAX_DIST),
            self.hbond_min_angle.unwrap_or(DEFAULT_HBOND_MIN_ANGLE),
            self.hydrophobic_max_dist
                .unwrap_or(DEFAULT_HYDROPHOBIC_MAX_DIST),
            self.pi_stack.unwrap_or(DEFAULT_PI_STACK),
            self.salt_bridge_max_dist
                .unwrap_or(DEFAULT_SALT_BRIDGE_MAX_DIST),
            self.metal_max_dist.unwrap_or(DEFAULT_METAL_MAX_DIST),
        )
    }
}

pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_PROTEIN_ATOMS: usize = 100_000;
pub const DEFAULT_MAX_LIGAND_ATOMS: usize = 1_000;

/// Size and complexity ceilings applied before any detector runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisLimits {
    /// Per structure text, in bytes.
    pub max_input_bytes: usize,
    pub max_protein_atoms: usize,
    pub max_ligand_atoms: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_protein_atoms: DEFAULT_MAX_PROTEIN_ATOMS,
            max_ligand_atoms: DEFAULT_MAX_LIGAND_ATOMS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AnalysisConfig {
    pub params: ContactParams,
    pub limits: AnalysisLimits,
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }
}

#[derive(Debug, Default, Clone)]
pub struct AnalysisConfigBuilder {
    params: Option<ContactParams>,
    max_input_bytes: Option<usize>,
    max_protein_atoms: Option<usize>,
    max_ligand_atoms: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(mut self, params: ContactParams) -> Self {
        self.params = Some(params);
        self
    }
    pub fn max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = Some(bytes);
        self
    }
    pub fn max_protein_atoms(mut self, atoms: usize) -> Self {
        self.max_protein_atoms = Some(atoms);
        self
    }
    pub fn max_ligand_atoms(mut self, atoms: usize) -> Self {
        self.max_ligand_atoms = Some(atoms);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisLimits::default();
        let positive = |name: &'static str, value: Option<usize>, default: usize| match value {
            Some(0) => Err(ConfigError::InvalidParameter {
                name,
                reason: "must be greater than zero".to_string(),
            }),
            Some(v) => Ok(v),
            None => Ok(default),
        };

        let limits = AnalysisLimits {
            max_input_bytes: positive(
                "max_input_bytes",
                self.max_input_bytes,
                defaults.max_input_bytes,
            )?,
            max_protein_atoms: positive(
                "max_protein_atoms",
                self.max_protein_atoms,
                defaults.max_protein_atoms,
            )?,
            max_ligand_atoms: positive(
                "max_ligand_atoms",
                self.max_ligand_atoms,
                defaults.max_ligand_atoms,
            )?,
        };

        Ok(AnalysisConfig {
            params: self.params.unwrap_or_default(),
            limits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let params = ContactParams::default();
        assert_eq!(params.hbond_max_dist(), 3.5);
        assert_eq!(params.hbond_min_angle(), 120.0);
        assert_eq!(params.hydrophobic_max_dist(), 4.0);
        assert!(params.pi_stack());
        assert_eq!(params.salt_bridge_max_dist(), 4.0);
        assert_eq!(params.metal_max_dist(), 2.8);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let params = ContactParams::new(15.0, 50.0, 0.5, true, 20.0, 0.1);
        assert_eq!(params.hbond_max_dist(), 10.0);
        assert_eq!(params.hbond_min_angle(), 90.0);
        assert_eq!(params.hydrophobic_max_dist(), 1.0);
        assert_eq!(params.salt_bridge_max_dist(), 10.0);
        assert_eq!(params.metal_max_dist(), 1.0);
    }

    #[test]
    fn in_range_values_are_kept() {
        let params = ContactParams::new(3.0, 150.0, 4.5, false, 5.0, 2.0);
        assert_eq!(params.hbond_max_dist(), 3.0);
        assert_eq!(params.hbond_min_angle(), 150.0);
        assert_eq!(params.hydrophobic_max_dist(), 4.5);
        assert!(!params.pi_stack());
        assert_eq!(params.salt_bridge_max_dist(), 5.0);
        assert_eq!(params.metal_max_dist(), 2.0);
    }

    #[test]
    fn nan_falls_back_to_default() {
        let params = ContactParams::builder().hbond_max_dist(f64::NAN).build();
        assert_eq!(params.hbond_max_dist(), DEFAULT_HBOND_MAX_DIST);
    }

    #[test]
    fn builder_clamps_and_fills_defaults() {
        let params = ContactParams::builder()
            .hbond_min_angle(200.0)
            .metal_max_dist(9.0)
            .build();
        assert_eq!(params.hbond_min_angle(), 180.0);
        assert_eq!(params.metal_max_dist(), 5.0);
        assert_eq!(params.hbond_max_dist(), DEFAULT_HBOND_MAX_DIST);
    }

    #[test]
    fn deserialization_clamps() {
        let params: ContactParams =
            serde_json::from_str(r#"{"hbond_max_dist": 15, "metal_max_dist": 0.1}"#).unwrap();
        assert_eq!(params.hbond_max_dist(), 10.0);
        assert_eq!(params.metal_max_dist(), 1.0);
        assert_eq!(params.hydrophobic_max_dist(), DEFAULT_HYDROPHOBIC_MAX_DIST);
    }

    #[test]
    fn analysis_config_builder_rejects_zero_limits() {
        let error = AnalysisConfig::builder()
            .max_ligand_atoms(0)
            .build()
            .unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidParameter {
                name: "max_ligand_atoms",
                reason: "must be greater than zero".to_string()
            }
        );
    }

    #[test]
    fn analysis_config_builder_defaults() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.limits.max_input_bytes, 10 * 1024 * 1024);
        assert_eq!(config.limits.max_protein_atoms, 100_000);
        assert_eq!(config.limits.max_ligand_atoms, 1_000);
    }
}
