use super::identifiers::is_aromatic_sidechain_atom;
use crate::core::models::molecule::Molecule;
use crate::core::models::residue::ResidueAnnotation;
use crate::core::models::topology::BondOrder;
use crate::core::utils::rings::find_rings;
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

const MIN_HUCKEL_RING_SIZE: usize = 5;
const MAX_HUCKEL_RING_SIZE: usize = 7;

/// Flags aromatic atoms of a ligand read from a connection table.
///
/// Atoms that take part in an explicitly aromatic bond are flagged first. Kekulé rings
/// of five to seven atoms are then tested against Hückel's 4n+2 rule, repeating until
/// no new atom is flagged so that fused systems see their neighbours' flags.
///
/// Returns the number of atoms newly marked aromatic.
pub fn perceive_aromaticity(molecule: &mut Molecule) -> usize {
    let atom_count = molecule.atom_count();
    let mut aromatic: Vec<bool> = molecule.atoms().iter().map(|a| a.aromatic).collect();
    let initial = aromatic.iter().filter(|&&f| f).count();

    for bond in molecule.bonds() {
        if bond.order == BondOrder::Aromatic && bond.atom1 < atom_count && bond.atom2 < atom_count
        {
            aromatic[bond.atom1] = true;
            aromatic[bond.atom2] = true;
        }
    }

    let adjacency = molecule.adjacency();
    let rings: Vec<Vec<usize>> = find_rings(&adjacency, |_| true, MIN_HUCKEL_RING_SIZE)
        .into_iter()
        .filter(|ring| ring.len() <= MAX_HUCKEL_RING_SIZE)
        .collect();

    let mut bond_orders: BTreeMap<(usize, usize), BondOrder> = BTreeMap::new();
    for bond in molecule.bonds() {
        let key = ordered_pair(bond.atom1, bond.atom2);
        let entry = bond_orders.entry(key).or_insert(bond.order);
        if bond.order.is_multiple() {
            *entry = bond.order;
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for ring in &rings {
            if ring.iter().all(|&i| aromatic[i]) {
                continue;
            }
            let Some(electrons) = ring_pi_electrons(ring, &adjacency, &bond_orders, &aromatic, molecule)
            else {
                continue;
            };
            if electrons >= 2 && (electrons - 2) % 4 == 0 {
                trace!(ring = ?ring, electrons, "Ring satisfies Hückel rule");
                for &i in ring {
                    aromatic[i] = true;
                }
                changed = true;
            }
        }
    }

    for (atom, flag) in molecule.atoms_mut().iter_mut().zip(aromatic) {
        atom.aromatic = flag;
    }
    molecule.atoms().iter().filter(|a| a.aromatic).count() - initial
}

fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Sums per-atom π contributions, or `None` if some ring atom cannot be conjugated.
fn ring_pi_electrons(
    ring: &[usize],
    adjacency: &[Vec<usize>],
    bond_orders: &BTreeMap<(usize, usize), BondOrder>,
    aromatic: &[bool],
    molecule: &Molecule,
) -> Option<usize> {
    let members: HashSet<usize> = ring.iter().copied().collect();
    let mut total = 0;

    for &i in ring {
        let is_multiple = |j: usize| {
            bond_orders
                .get(&ordered_pair(i, j))
                .is_some_and(|order| order.is_multiple())
        };
        let in_ring_multiple = adjacency[i]
            .iter()
            .any(|&j| members.contains(&j) && is_multiple(j));
        let exocyclic_double = adjacency[i].iter().any(|&j| {
            !members.contains(&j)
                && bond_orders.get(&ordered_pair(i, j)) == Some(&BondOrder::Double)
        });

        let contribution = if aromatic[i] || in_ring_multiple {
            1
        } else if exocyclic_double {
            0
        } else {
            let atom = molecule.atom(i)?;
            let has_multiple = adjacency[i].iter().any(|&j| is_multiple(j));
            if matches!(atom.element.as_str(), "N" | "O" | "S") && !has_multiple {
                2
            } else {
                return None;
            }
        };
        total += contribution;
    }

    Some(total)
}

/// Flags side-chain ring atoms of aromatic amino acids from residue templates.
///
/// Returns the number of atoms flagged.
pub fn flag_aromatic_residues(
    molecule: &mut Molecule,
    annotations: &BTreeMap<usize, ResidueAnnotation>,
) -> usize {
    let atoms = molecule.atoms_mut();
    let mut flagged = 0;
    for (&index, annotation) in annotations {
        let Some(atom) = atoms.get_mut(index) else {
            continue;
        };
        if is_aromatic_sidechain_atom(&annotation.residue_name, &annotation.atom_label) {
            atom.aromatic = true;
            flagged += 1;
        }
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::Bond;
    use nalgebra::Point3;

    fn ring_molecule(elements: &[&str], orders: &[BondOrder]) -> Molecule {
        let n = elements.len();
        let atoms = elements
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let theta = i as f64 * std::f64::consts::TAU / n as f64;
                Atom::new(e, Point3::new(1.4 * theta.cos(), 1.4 * theta.sin(), 0.0))
            })
            .collect();
        let bonds = (0..n)
            .map(|i| Bond::new(i, (i + 1) % n, orders[i]))
            .collect();
        Molecule::new(atoms, bonds)
    }

    #[test]
    fn kekule_benzene_is_aromatic() {
        use BondOrder::*;
        let mut benzene = ring_molecule(
            &["C"; 6],
            &[Single, Double, Single, Double, Single, Double],
        );
        assert_eq!(perceive_aromaticity(&mut benzene), 6);
        assert!(benzene.atoms().iter().all(|a| a.aromatic));
    }

    #[test]
    fn all_double_bond_ring_is_aromatic() {
        let mut ring = ring_molecule(&["C"; 6], &[BondOrder::Double; 6]);
        perceive_aromaticity(&mut ring);
        assert!(ring.atoms().iter().all(|a| a.aromatic));
    }

    #[test]
    fn aromatic_bond_orders_flag_endpoints() {
        let mut ring = ring_molecule(&["C"; 6], &[BondOrder::Aromatic; 6]);
        perceive_aromaticity(&mut ring);
        assert!(ring.atoms().iter().all(|a| a.aromatic));
    }

    #[test]
    fn cyclohexane_is_not_aromatic() {
        let mut ring = ring_molecule(&["C"; 6], &[BondOrder::Single; 6]);
        assert_eq!(perceive_aromaticity(&mut ring), 0);
        assert!(ring.atoms().iter().all(|a| !a.aromatic));
    }

    #[test]
    fn pyrrole_lone_pair_completes_sextet() {
        use BondOrder::*;
        // N1-C2=C3-C4=C5-N1
        let mut pyrrole = ring_molecule(
            &["N", "C", "C", "C", "C"],
            &[Single, Double, Single, Double, Single],
        );
        perceive_aromaticity(&mut pyrrole);
        assert!(pyrrole.atoms().iter().all(|a| a.aromatic));
    }

    #[test]
    fn cyclopentadiene_fails_huckel() {
        use BondOrder::*;
        let mut ring = ring_molecule(&["C"; 5], &[Single, Double, Single, Double, Single]);
        perceive_aromaticity(&mut ring);
        assert!(ring.atoms().iter().all(|a| !a.aromatic));
    }

    #[test]
    fn residue_templates_flag_ring_atoms_only() {
        let labels = ["CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ"];
        let atoms = labels
            .iter()
            .map(|_| Atom::new("C", Point3::origin()))
            .collect();
        let mut molecule = Molecule::new(atoms, Vec::new());
        let annotations: BTreeMap<usize, ResidueAnnotation> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (i, ResidueAnnotation::new("PHE", 7, label)))
            .collect();

        assert_eq!(flag_aromatic_residues(&mut molecule, &annotations), 6);
        assert!(!molecule.atoms()[0].aromatic);
        assert!(molecule.atoms()[1..].iter().all(|a| a.aromatic));
    }
}
