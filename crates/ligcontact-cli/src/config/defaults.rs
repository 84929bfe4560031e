use ligcontact::engine::config as core_config;

/// Values used when neither the command line nor the config file sets a key.
pub struct DefaultsConfig {
    pub hbond_max_dist: f64,
    pub hbond_min_angle: f64,
    pub hydrophobic_max_dist: f64,
    pub pi_stack: bool,
    pub salt_bridge_max_dist: f64,
    pub metal_max_dist: f64,
    pub max_input_bytes: usize,
    pub max_protein_atoms: usize,
    pub max_ligand_atoms: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            hbond_max_dist: core_config::DEFAULT_HBOND_MAX_DIST,
            hbond_min_angle: core_config::DEFAULT_HBOND_MIN_ANGLE,
            hydrophobic_max_dist: core_config::DEFAULT_HYDROPHOBIC_MAX_DIST,
            pi_stack: core_config::DEFAULT_PI_STACK,
            salt_bridge_max_dist: core_config::DEFAULT_SALT_BRIDGE_MAX_DIST,
            metal_max_dist: core_config::DEFAULT_METAL_MAX_DIST,
            max_input_bytes: core_config::DEFAULT_MAX_INPUT_BYTES,
            max_protein_atoms: core_config::DEFAULT_MAX_PROTEIN_ATOMS,
            max_ligand_atoms: core_config::DEFAULT_MAX_LIGAND_ATOMS,
        }
    }
}
