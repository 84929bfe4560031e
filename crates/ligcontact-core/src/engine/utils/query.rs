use crate::core::models::molecule::Molecule;
use crate::core::utils::geometry::distance;
use itertools::Itertools;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Relative slack on the squared search radius so that pairs sitting exactly on a
/// threshold are never lost to rounding inside the tree.
const RADIUS_PADDING: f64 = 1e-9;

/// Leaf capacity of [`KdTree`]. The tree cannot split a full leaf whose points all
/// share the split coordinate, so inputs with that many equal values on one axis are
/// scanned linearly instead.
const TREE_BUCKET_SIZE: usize = 32;

enum Backend {
    Empty,
    Tree(KdTree<f64, 3>),
    Scan,
}

/// Spatial index over ligand atom positions.
///
/// Queries return ligand indices in ascending order with their exact Euclidean distance,
/// which makes tree-backed enumeration identical to a nested loop. Flat, collinear or
/// stacked ligands that the tree cannot hold fall back to a linear scan with the same
/// results.
pub struct LigandIndex {
    backend: Backend,
    positions: Vec<Point3<f64>>,
}

impl LigandIndex {
    pub fn new(ligand: &Molecule) -> Self {
        let positions: Vec<Point3<f64>> = ligand.atoms().iter().map(|a| a.position).collect();
        let backend = if positions.is_empty() {
            Backend::Empty
        } else if tree_can_hold(&positions) {
            let coords: Vec<[f64; 3]> = positions.iter().map(|p| [p.x, p.y, p.z]).collect();
            Backend::Tree((&coords).into())
        } else {
            debug!(
                atoms = positions.len(),
                "Ligand coordinates degenerate along an axis; using linear neighbour scan"
            );
            Backend::Scan
        };
        Self { backend, positions }
    }

    /// Ligand atoms with `distance(point, atom) <= radius`, sorted by index.
    pub fn within(&self, point: &Point3<f64>, radius: f64) -> Vec<(usize, f64)> {
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }
        match &self.backend {
            Backend::Empty => Vec::new(),
            Backend::Scan => self
                .positions
                .iter()
                .enumerate()
                .filter_map(|(index, position)| {
                    let d = distance(point, position);
                    (d <= radius).then_some((index, d))
                })
                .collect(),
            Backend::Tree(tree) => {
                let padded = radius * radius * (1.0 + RADIUS_PADDING) + RADIUS_PADDING;
                let mut hits: Vec<(usize, f64)> = tree
                    .within_unsorted::<SquaredEuclidean>(&[point.x, point.y, point.z], padded)
                    .into_iter()
                    .filter_map(|neighbour| {
                        let index = neighbour.item as usize;
                        let d = distance(point, &self.positions[index]);
                        (d <= radius).then_some((index, d))
                    })
                    .collect();
                hits.sort_unstable_by_key(|&(index, _)| index);
                hits
            }
        }
    }

    /// True when the neighbour search is backed by the k-d tree.
    pub fn is_tree_backed(&self) -> bool {
        matches!(self.backend, Backend::Tree(_))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Whether every axis keeps fewer than half a leaf of points on any single value, and
/// every coordinate is finite.
fn tree_can_hold(positions: &[Point3<f64>]) -> bool {
    if positions.iter().any(|p| !p.coords.iter().all(|v| v.is_finite())) {
        return false;
    }
    (0..3).all(|axis| {
        // `+ 0.0` folds -0.0 into 0.0 so equal values share one key.
        let counts = positions.iter().counts_by(|p| (p[axis] + 0.0).to_bits());
        counts.values().all(|&n| n < TREE_BUCKET_SIZE / 2)
    })
}

/// Enumerates (protein atom, ligand atom) pairs within `radius`.
///
/// `queries` must be sorted by protein index. For each query point the ligand neighbours
/// are visited in ascending index order and passed to `emit`, so the output order is
/// protein index first, ligand index second, whether or not the `parallel` feature is
/// enabled.
pub fn collect_pairs<Q, T, F>(queries: &[Q], index: &LigandIndex, radius: f64, emit: F) -> Vec<T>
where
    Q: QueryPoint + Sync,
    T: Send,
    F: Fn(&Q, usize, f64) -> Option<T> + Sync,
{
    let per_query = |query: &Q| -> Vec<T> {
        index
            .within(query.position(), radius)
            .into_iter()
            .filter_map(|(ligand_index, d)| emit(query, ligand_index, d))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let grouped: Vec<Vec<T>> = queries.iter().map(per_query).collect();

    #[cfg(feature = "parallel")]
    let grouped: Vec<Vec<T>> = queries.par_iter().map(per_query).collect();

    grouped.into_iter().flatten().collect()
}

/// Anything with a position that can be used as a neighbour query.
pub trait QueryPoint {
    fn position(&self) -> &Point3<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;

    struct Query {
        index: usize,
        position: Point3<f64>,
    }

    impl QueryPoint for Query {
        fn position(&self) -> &Point3<f64> {
            &self.position
        }
    }

    fn line_ligand(n: usize) -> Molecule {
        let atoms = (0..n)
            .map(|i| Atom::new("C", Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        Molecule::new(atoms, Vec::new())
    }

    #[test]
    fn within_returns_sorted_exact_matches_including_boundary() {
        let index = LigandIndex::new(&line_ligand(10));
        let hits = index.within(&Point3::new(0.0, 0.0, 0.0), 3.0);
        let indices: Vec<usize> = hits.iter().map(|&(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(hits[3].1, 3.0);
    }

    #[test]
    fn empty_ligand_has_no_neighbours() {
        let index = LigandIndex::new(&Molecule::default());
        assert!(index.is_empty());
        assert!(index.within(&Point3::origin(), 5.0).is_empty());
    }

    #[test]
    fn matches_nested_loop_enumeration() {
        let ligand = line_ligand(8);
        let index = LigandIndex::new(&ligand);
        let queries: Vec<Query> = (0..5)
            .map(|i| Query {
                index: i,
                position: Point3::new(i as f64 * 1.7, 1.0, 0.5),
            })
            .collect();
        let radius = 2.5;

        let pairs = collect_pairs(&queries, &index, radius, |query, j, _| Some((query.index, j)));

        let mut expected = Vec::new();
        for query in &queries {
            for (j, atom) in ligand.atoms().iter().enumerate() {
                if distance(&query.position, &atom.position) <= radius {
                    expected.push((query.index, j));
                }
            }
        }
        assert_eq!(pairs, expected);
    }

    fn brute_force(ligand: &Molecule, point: &Point3<f64>, radius: f64) -> Vec<(usize, f64)> {
        ligand
            .atoms()
            .iter()
            .enumerate()
            .map(|(i, atom)| (i, distance(point, &atom.position)))
            .filter(|&(_, d)| d <= radius)
            .collect()
    }

    #[test]
    fn degenerate_ligands_fall_back_to_scanning() {
        let flat = Molecule::new(
            (0..150)
                .map(|i| Atom::new("C", Point3::new((i % 15) as f64, (i / 15) as f64, 0.0)))
                .collect(),
            Vec::new(),
        );
        let collinear = line_ligand(200);
        let coincident = Molecule::new(
            (0..40).map(|_| Atom::new("C", Point3::new(1.0, 2.0, 3.0))).collect(),
            Vec::new(),
        );

        for ligand in [&flat, &collinear, &coincident] {
            let index = LigandIndex::new(ligand);
            assert!(!index.is_tree_backed());
            for point in [Point3::new(3.0, 2.0, 1.0), Point3::new(1.0, 2.0, 3.0)] {
                assert_eq!(index.within(&point, 3.0), brute_force(ligand, &point, 3.0));
            }
        }
    }

    #[test]
    fn scattered_ligand_uses_the_tree() {
        let ligand = Molecule::new(
            (0..100)
                .map(|i| {
                    let t = i as f64;
                    Atom::new("C", Point3::new(t * 0.37, (t * 1.3).sin() * 5.0, t * 0.11 + 0.05))
                })
                .collect(),
            Vec::new(),
        );
        let index = LigandIndex::new(&ligand);
        assert!(index.is_tree_backed());
        let point = Point3::new(10.0, 0.0, 5.0);
        assert_eq!(index.within(&point, 4.0), brute_force(&ligand, &point, 4.0));
    }
}
