//! HNSW graph construction: incremental insertion.

use crate::arena::VectorArena;
use crate::distance::DistanceMetric;
use crate::error::Result;
use crate::hnsw::graph::{HnswIndex, HnswNode};
use crate::hnsw::search::search_layer;

/// Insert one vector into the graph (Malkov & Yashunin, Algorithm 1).
///
/// The entry point found in each layer above the node's level is carried
/// down as the entry point for the next layer, so every per-layer search
/// starts from a good position rather than an arbitrary node.
pub(crate) fn insert(index: &mut HnswIndex, vector: &[f32]) -> Result<u32> {
    let new_id = index.arena.append(vector)?;
    let new_level = index.random_level();
    index.nodes.push(HnswNode::new(new_level));

    let Some(mut curr) = index.entry_point else {
        // First node: becomes the entry point, no edges to add.
        index.entry_point = Some(new_id);
        index.max_layer = new_level;
        return Ok(new_id);
    };

    let metric = index.params.metric;

    // 1) Descend from the top layer down to new_level + 1 with ef = 1.
    // Pure navigation: refine the entry point, add no edges.
    for layer in ((new_level + 1)..=index.max_layer).rev() {
        let found = search_layer(vector, curr, 1, layer, &index.nodes, &index.arena, metric);
        if let Some(&(id, _)) = found.first() {
            curr = id;
        }
    }

    // 2) For each layer the new node participates in, run the construction
    // beam and link bidirectionally to the nearest candidates.
    for layer in (0..=new_level.min(index.max_layer)).rev() {
        let candidates = search_layer(
            vector,
            curr,
            index.params.ef_construction,
            layer,
            &index.nodes,
            &index.arena,
            metric,
        );

        let cap = if layer == 0 {
            index.params.m_max0
        } else {
            index.params.m
        };
        let chosen = &candidates[..cap.min(candidates.len())];

        for &(neighbor_id, _) in chosen {
            index.nodes[new_id as usize].neighbors[layer].push(neighbor_id);
            index.nodes[neighbor_id as usize].neighbors[layer].push(new_id);

            // Only the overflowing side is trimmed; the dropped neighbor may
            // keep its back-reference.
            if index.nodes[neighbor_id as usize].neighbors[layer].len() > cap {
                prune(
                    &mut index.nodes,
                    &index.arena,
                    metric,
                    neighbor_id,
                    layer,
                    cap,
                );
            }
        }

        // Entry point for the next lower layer.
        if let Some(&(id, _)) = chosen.first() {
            curr = id;
        }
    }

    // 3) A node above the current top layer becomes the new entry point.
    if new_level > index.max_layer {
        index.max_layer = new_level;
        index.entry_point = Some(new_id);
    }

    Ok(new_id)
}

/// Trim a node's neighbor list at `layer` to the `cap` nearest.
fn prune(
    nodes: &mut [HnswNode],
    arena: &VectorArena,
    metric: DistanceMetric,
    node_id: u32,
    layer: usize,
    cap: usize,
) {
    let base = arena.row(node_id as usize);
    let list = &mut nodes[node_id as usize].neighbors[layer];
    if list.len() <= cap {
        return;
    }

    let mut ranked: Vec<(u32, f32)> = list
        .iter()
        .map(|&id| (id, metric.distance(base, arena.row(id as usize))))
        .collect();
    ranked.sort_unstable_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(cap);
    *list = ranked.into_iter().map(|(id, _)| id).collect();
}
