use std::collections::{HashMap, HashSet, VecDeque};

/// Finds the smallest cycle through every eligible bond of a graph.
///
/// For each edge `(a, b)` with `a < b` whose endpoints are both accepted by `include`,
/// a breadth-first search looks for the shortest path from `a` to `b` that avoids the
/// edge itself and only visits included atoms. That path is the ring, listed in
/// traversal order starting at `a`. Rings are deduplicated by member set and returned
/// in discovery order; rings shorter than `min_size` are dropped.
pub fn find_rings<F>(adjacency: &[Vec<usize>], include: F, min_size: usize) -> Vec<Vec<usize>>
where
    F: Fn(usize) -> bool,
{
    let subgraph = Subgraph::new(adjacency, include);
    let mut search = PathSearch::new(subgraph.len());
    let mut rings = Vec::new();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    for (a, neighbors) in subgraph.adjacency.iter().enumerate() {
        for &b in neighbors {
            if b <= a {
                continue;
            }
            let Some(path) = search.shortest_path_avoiding_edge(&subgraph.adjacency, a, b) else {
                continue;
            };
            if path.len() < min_size {
                continue;
            }
            let path: Vec<usize> = path.into_iter().map(|local| subgraph.atoms[local]).collect();
            let mut members = path.clone();
            members.sort_unstable();
            if seen.insert(members) {
                rings.push(path);
            }
        }
    }

    rings
}

/// The included atoms only, renumbered densely in ascending original order.
struct Subgraph {
    atoms: Vec<usize>,
    adjacency: Vec<Vec<usize>>,
}

impl Subgraph {
    fn new<F>(adjacency: &[Vec<usize>], include: F) -> Self
    where
        F: Fn(usize) -> bool,
    {
        let atoms: Vec<usize> = (0..adjacency.len()).filter(|&i| include(i)).collect();
        let local: HashMap<usize, usize> = atoms
            .iter()
            .enumerate()
            .map(|(local, &atom)| (atom, local))
            .collect();
        let adjacency = atoms
            .iter()
            .map(|&atom| {
                adjacency[atom]
                    .iter()
                    .filter_map(|neighbor| local.get(neighbor).copied())
                    .collect()
            })
            .collect();
        Self { atoms, adjacency }
    }

    fn len(&self) -> usize {
        self.atoms.len()
    }
}

/// Breadth-first search buffers reused across edges.
///
/// A node counts as visited when its stamp equals the current generation, so the
/// buffers never need clearing between searches.
struct PathSearch {
    previous: Vec<usize>,
    stamp: Vec<u32>,
    generation: u32,
    queue: VecDeque<usize>,
}

impl PathSearch {
    fn new(size: usize) -> Self {
        Self {
            previous: vec![0; size],
            stamp: vec![0; size],
            generation: 0,
            queue: VecDeque::new(),
        }
    }

    fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamp.fill(0);
            self.generation = 1;
        }
    }

    fn shortest_path_avoiding_edge(
        &mut self,
        adjacency: &[Vec<usize>],
        start: usize,
        goal: usize,
    ) -> Option<Vec<usize>> {
        self.next_generation();
        self.queue.clear();
        self.stamp[start] = self.generation;
        self.queue.push_back(start);

        while let Some(current) = self.queue.pop_front() {
            for &next in &adjacency[current] {
                if current == start && next == goal {
                    continue;
                }
                if self.stamp[next] == self.generation {
                    continue;
                }
                self.stamp[next] = self.generation;
                self.previous[next] = current;
                if next == goal {
                    let mut path = vec![goal];
                    let mut cursor = goal;
                    while cursor != start {
                        cursor = self.previous[cursor];
                        path.push(cursor);
                    }
                    path.reverse();
                    return Some(path);
                }
                self.queue.push_back(next);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency_from_edges(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        adjacency
    }

    fn hexagon() -> Vec<Vec<usize>> {
        adjacency_from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)])
    }

    #[test]
    fn single_six_membered_ring_is_found_once() {
        let rings = find_rings(&hexagon(), |_| true, 5);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 6);
        assert_eq!(rings[0][0], 0);
    }

    #[test]
    fn ring_is_listed_in_traversal_order() {
        let rings = find_rings(&hexagon(), |_| true, 3);
        let ring = &rings[0];
        let adjacency = hexagon();
        for pair in ring.windows(2) {
            assert!(adjacency[pair[0]].contains(&pair[1]));
        }
        assert!(adjacency[ring[0]].contains(ring.last().unwrap()));
    }

    #[test]
    fn fused_rings_yield_both_smallest_cycles() {
        // Naphthalene skeleton: two hexagons sharing the 4-9 edge.
        let adjacency = adjacency_from_edges(
            10,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 9),
                (9, 0),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 8),
                (8, 9),
            ],
        );
        let rings = find_rings(&adjacency, |_| true, 5);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| r.len() == 6));
    }

    #[test]
    fn excluded_atoms_break_rings() {
        let rings = find_rings(&hexagon(), |i| i != 3, 5);
        assert!(rings.is_empty());
    }

    #[test]
    fn small_rings_are_dropped_and_chains_have_none() {
        let triangle = adjacency_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        assert!(find_rings(&triangle, |_| true, 5).is_empty());
        assert_eq!(find_rings(&triangle, |_| true, 3).len(), 1);

        let chain = adjacency_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        assert!(find_rings(&chain, |_| true, 3).is_empty());
    }

    #[test]
    fn rings_keep_original_indices_inside_a_large_graph() {
        // Hexagon on atoms 100..106 of a mostly excluded 1000-atom graph.
        let mut edges: Vec<(usize, usize)> = (0..999).map(|i| (i, i + 1)).collect();
        edges.push((100, 105));
        let adjacency = adjacency_from_edges(1000, &edges);
        let rings = find_rings(&adjacency, |i| (100..106).contains(&i), 5);
        assert_eq!(rings, vec![vec![100, 105, 104, 103, 102, 101]]);
    }

    #[test]
    fn many_separate_rings_are_all_found() {
        let mut edges = Vec::new();
        for ring in 0..50 {
            let base = ring * 6;
            for k in 0..6 {
                edges.push((base + k, base + (k + 1) % 6));
            }
        }
        let adjacency = adjacency_from_edges(300, &edges);
        let rings = find_rings(&adjacency, |_| true, 5);
        assert_eq!(rings.len(), 50);
        assert!(rings.iter().enumerate().all(|(i, r)| r[0] == i * 6));
    }
}
