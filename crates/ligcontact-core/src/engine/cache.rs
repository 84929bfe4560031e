use crate::core::models::molecule::{Molecule, MoleculeRole};
use crate::core::utils::geometry::{centroid, plane_normal};
use crate::core::utils::rings::find_rings;
use nalgebra::{Point3, Vector3};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

pub const DEFAULT_RING_CACHE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_RING_CACHE_MAX_ENTRIES: usize = 100;
/// Smallest ring considered for stacking.
pub const MIN_AROMATIC_RING_SIZE: usize = 5;

/// Geometry of one aromatic ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Member atom indices in traversal order.
    pub members: Vec<usize>,
    pub centroid: Point3<f64>,
    /// Unit normal; +Z when the first three members are collinear.
    pub normal: Vector3<f64>,
}

impl Ring {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// The member used to represent the ring in reports. Perceived rings are never empty.
    pub fn first_member(&self) -> usize {
        self.members[0]
    }
}

/// Perceives aromatic rings of a molecule and computes their geometry.
///
/// Only bonds between two aromatic atoms are followed, and rings smaller than
/// [`MIN_AROMATIC_RING_SIZE`] are ignored.
pub fn compute_rings(molecule: &Molecule) -> Vec<Ring> {
    let atoms = molecule.atoms();
    let adjacency = molecule.adjacency();
    find_rings(&adjacency, |i| atoms[i].aromatic, MIN_AROMATIC_RING_SIZE)
        .into_iter()
        .filter_map(|members| {
            let points: Vec<Point3<f64>> = members.iter().map(|&i| atoms[i].position).collect();
            let center = centroid(&points)?;
            Some(Ring {
                normal: plane_normal(&points),
                centroid: center,
                members,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RingCacheKey {
    pub role: MoleculeRole,
    pub fingerprint: u64,
    pub atom_count: usize,
}

impl RingCacheKey {
    pub fn for_molecule(molecule: &Molecule, role: MoleculeRole) -> Self {
        Self {
            role,
            fingerprint: molecule.fingerprint(),
            atom_count: molecule.atom_count(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    rings: Arc<[Ring]>,
    inserted_at: Instant,
    sequence: u64,
}

/// Memoizes ring geometry per molecule.
///
/// Entries expire after a time-to-live and the oldest insertions are evicted once the
/// cache holds more than its capacity. Expiry and eviction run after each insertion.
#[derive(Debug)]
pub struct RingCache {
    entries: HashMap<RingCacheKey, CacheEntry>,
    insertion_order: BTreeMap<u64, RingCacheKey>,
    next_sequence: u64,
    ttl: Duration,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl Default for RingCache {
    fn default() -> Self {
        Self::with_limits(DEFAULT_RING_CACHE_TTL, DEFAULT_RING_CACHE_MAX_ENTRIES)
    }
}

impl RingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: BTreeMap::new(),
            next_sequence: 0,
            ttl,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the rings of `molecule`, computing them on a miss.
    pub fn get_rings(&mut self, molecule: &Molecule, role: MoleculeRole) -> Arc<[Ring]> {
        self.get_rings_at(molecule, role, Instant::now())
    }

    /// Like [`get_rings`](Self::get_rings) with an explicit clock reading.
    pub fn get_rings_at(
        &mut self,
        molecule: &Molecule,
        role: MoleculeRole,
        now: Instant,
    ) -> Arc<[Ring]> {
        let key = RingCacheKey::for_molecule(molecule, role);
        if let Some(entry) = self.entries.get(&key) {
            self.hits += 1;
            trace!(?role, "Ring cache hit");
            return Arc::clone(&entry.rings);
        }

        self.misses += 1;
        let rings: Arc<[Ring]> = compute_rings(molecule).into();
        trace!(?role, rings = rings.len(), "Ring cache miss");

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.insert(
            key,
            CacheEntry {
                rings: Arc::clone(&rings),
                inserted_at: now,
                sequence,
            },
        );
        self.insertion_order.insert(sequence, key);
        self.cleanup_at(now);

        rings
    }

    /// Drops expired entries, then evicts the oldest until within capacity.
    pub fn cleanup_at(&mut self, now: Instant) {
        let ttl = self.ttl;
        let expired: Vec<RingCacheKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| now.saturating_duration_since(entry.inserted_at) > ttl)
            .map(|(key, _)| *key)
            .collect();
        for key in expired {
            self.remove(&key);
        }

        while self.entries.len() > self.max_entries {
            let Some((_, oldest)) = self.insertion_order.pop_first() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    fn remove(&mut self, key: &RingCacheKey) {
        if let Some(entry) = self.entries.remove(key) {
            self.insertion_order.remove(&entry.sequence);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }

    pub fn contains(&self, key: &RingCacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
