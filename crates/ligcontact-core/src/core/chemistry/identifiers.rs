use phf::{Map, Set, phf_map, phf_set};

/// Nitrogen labels of backbone amides, amines, guanidinium and indole groups.
static DONOR_ONLY_NITROGEN_LABELS: Set<&'static str> = phf_set! {
    "N", "NZ", "NE", "NH1", "NH2", "ND2", "NE1",
};

/// Imidazole ring nitrogens, which can both give and take a proton.
static IMIDAZOLE_NITROGEN_LABELS: Set<&'static str> = phf_set! {
    "ND1", "NE2",
};

static BACKBONE_CARBONYL_OXYGEN_LABELS: Set<&'static str> = phf_set! {
    "O", "OXT",
};

/// Side-chain hydroxyl oxygens (serine, threonine, tyrosine).
static HYDROXYL_OXYGEN_LABELS: Set<&'static str> = phf_set! {
    "OG", "OG1", "OH",
};

static POSITIVE_RESIDUES: Set<&'static str> = phf_set! {
    "LYS", "ARG", "HIS",
};

static NEGATIVE_RESIDUES: Set<&'static str> = phf_set! {
    "ASP", "GLU",
};

static METAL_ELEMENTS: Set<&'static str> = phf_set! {
    "MG", "ZN", "FE", "MN", "CA", "CU", "CO", "NI",
};

/// Heteroatoms able to donate electron density to a metal centre.
static COORDINATING_ELEMENTS: Set<&'static str> = phf_set! {
    "O", "N", "S",
};

/// Ring atoms of the aromatic amino acid side chains.
static AROMATIC_SIDECHAIN_ATOMS: Map<&'static str, &'static [&'static str]> = phf_map! {
    "PHE" => &["CG", "CD1", "CD2", "CE1", "CE2", "CZ"],
    "TYR" => &["CG", "CD1", "CD2", "CE1", "CE2", "CZ"],
    "TRP" => &["CG", "CD1", "NE1", "CE2", "CD2", "CE3", "CZ3", "CH2", "CZ2"],
    "HIS" => &["CG", "ND1", "CD2", "CE1", "NE2"],
    "HID" => &["CG", "ND1", "CD2", "CE1", "NE2"],
    "HIE" => &["CG", "ND1", "CD2", "CE1", "NE2"],
    "HIP" => &["CG", "ND1", "CD2", "CE1", "NE2"],
};

/// Single-bond covalent radii in Angstroms.
static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.31, "D" => 0.31,
    "C" => 0.76, "N" => 0.71, "O" => 0.66, "S" => 1.05, "P" => 1.07, "SE" => 1.20,
    "F" => 0.57, "CL" => 1.02, "BR" => 1.20, "I" => 1.39, "B" => 0.84,
    "MG" => 1.41, "ZN" => 1.22, "FE" => 1.32, "MN" => 1.39, "CA" => 1.76,
    "CU" => 1.32, "CO" => 1.26, "NI" => 1.24, "NA" => 1.66, "K" => 2.03,
};

pub const DEFAULT_COVALENT_RADIUS: f64 = 0.77;

pub fn is_donor_only_nitrogen(label: &str) -> bool {
    DONOR_ONLY_NITROGEN_LABELS.contains(label.trim())
}

pub fn is_imidazole_nitrogen(label: &str) -> bool {
    IMIDAZOLE_NITROGEN_LABELS.contains(label.trim())
}

pub fn is_backbone_carbonyl_oxygen(label: &str) -> bool {
    BACKBONE_CARBONYL_OXYGEN_LABELS.contains(label.trim())
}

pub fn is_hydroxyl_oxygen(label: &str) -> bool {
    HYDROXYL_OXYGEN_LABELS.contains(label.trim())
}

pub fn is_positive_residue(residue_name: &str) -> bool {
    POSITIVE_RESIDUES.contains(residue_name.trim())
}

pub fn is_negative_residue(residue_name: &str) -> bool {
    NEGATIVE_RESIDUES.contains(residue_name.trim())
}

pub fn is_metal(element: &str) -> bool {
    METAL_ELEMENTS.contains(element.trim())
}

pub fn is_coordinating_element(element: &str) -> bool {
    COORDINATING_ELEMENTS.contains(element.trim())
}

pub fn is_aromatic_sidechain_atom(residue_name: &str, atom_label: &str) -> bool {
    AROMATIC_SIDECHAIN_ATOMS
        .get(residue_name.trim())
        .is_some_and(|labels| labels.contains(&atom_label.trim()))
}

pub fn covalent_radius(element: &str) -> f64 {
    COVALENT_RADII
        .get(element.trim())
        .copied()
        .unwrap_or(DEFAULT_COVALENT_RADIUS)
}
