//! Single-layer beam search over the HNSW graph.

use std::collections::{BinaryHeap, HashSet};

use crate::arena::VectorArena;
use crate::distance::DistanceMetric;
use crate::hnsw::graph::HnswNode;

/// Frontier candidate for the min-heap (explore closest first).
#[derive(PartialEq)]
struct MinCandidate {
    id: u32,
    distance: f32,
}

impl Eq for MinCandidate {}

impl Ord for MinCandidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: smaller distance = higher priority
        // Use total_cmp for IEEE 754 total ordering (NaN-safe)
        other.distance.total_cmp(&self.distance)
    }
}

impl PartialOrd for MinCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Retained result for the max-heap (track worst result for pruning).
#[derive(PartialEq)]
struct MaxResult {
    id: u32,
    distance: f32,
}

impl Eq for MaxResult {}

impl Ord for MaxResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Max-heap: larger distance = higher priority
        self.distance.total_cmp(&other.distance)
    }
}

impl PartialOrd for MaxResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Greedy beam search within one layer (Malkov & Yashunin, Algorithm 2).
///
/// Maintains a min-heap frontier and a max-heap of the `ef` best results.
/// Terminates when the closest unexplored candidate is farther than the
/// worst retained result. Returns `(id, distance)` ascending by distance.
pub(crate) fn search_layer(
    query: &[f32],
    entry_point: u32,
    ef: usize,
    layer: usize,
    nodes: &[HnswNode],
    arena: &VectorArena,
    metric: DistanceMetric,
) -> Vec<(u32, f32)> {
    let mut candidates: BinaryHeap<MinCandidate> = BinaryHeap::with_capacity(ef * 2);
    let mut results: BinaryHeap<MaxResult> = BinaryHeap::with_capacity(ef + 1);
    let mut visited: HashSet<u32> = HashSet::with_capacity(ef * 2);

    let entry_distance = metric.distance(query, arena.row(entry_point as usize));
    candidates.push(MinCandidate {
        id: entry_point,
        distance: entry_distance,
    });
    results.push(MaxResult {
        id: entry_point,
        distance: entry_distance,
    });
    visited.insert(entry_point);

    while let Some(candidate) = candidates.pop() {
        // The frontier only gets worse from here; once its best entry is
        // farther than the worst retained result the search is done.
        let worst_dist = results.peek().map(|r| r.distance).unwrap_or(f32::INFINITY);
        if candidate.distance > worst_dist {
            break;
        }

        let Some(neighbor_list) = nodes[candidate.id as usize].neighbors.get(layer) else {
            continue;
        };
        for &neighbor_id in neighbor_list.iter() {
            if visited.insert(neighbor_id) {
                let neighbor_distance = metric.distance(query, arena.row(neighbor_id as usize));

                let worst_dist = results.peek().map(|r| r.distance).unwrap_or(f32::INFINITY);
                if results.len() < ef || neighbor_distance < worst_dist {
                    candidates.push(MinCandidate {
                        id: neighbor_id,
                        distance: neighbor_distance,
                    });
                    results.push(MaxResult {
                        id: neighbor_id,
                        distance: neighbor_distance,
                    });

                    if results.len() > ef {
                        results.pop();
                    }
                }
            }
        }
    }

    let mut output: Vec<(u32, f32)> = results.into_iter().map(|r| (r.id, r.distance)).collect();
    output.sort_unstable_by(|a, b| a.1.total_cmp(&b.1));
    output
}
