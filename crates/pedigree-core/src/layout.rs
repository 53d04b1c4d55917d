// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Horizontal layout.
//!
//! Nodes are bucketed by rank, ordered persons → partnerships → hubs (ties by
//! id), and spread symmetrically around zero. No attempt is made to align
//! columns across ranks; the order table lets the renderer do that.
use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::config::LayoutConfig;
use crate::graph::FamilyGraph;
use crate::ident::{NodeId, Rank};
use crate::rank::RankTable;

/// Position side table plus per-rank ordering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    positions: Vec<f64>,
    order: Vec<Vec<NodeId>>,
}

impl Layout {
    /// Horizontal offset of a node.
    pub fn position(&self, id: NodeId) -> Option<f64> {
        self.positions.get(id.index()).copied()
    }

    /// All positions, indexed by node id.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Order table: row `r` lists the nodes of rank `r` left to right.
    pub fn order_table(&self) -> &[Vec<NodeId>] {
        &self.order
    }

    /// Nodes of one rank, left to right (empty for unused ranks).
    pub fn row(&self, rank: Rank) -> &[NodeId] {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.order.get(r))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Offset of slot `i` in a row of `n`, spreading `spacing` evenly around zero.
#[allow(clippy::cast_precision_loss)]
pub fn spread_offset(i: usize, n: usize, spacing: f64) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let last = (n - 1) as f64;
    (i as f64 - last / 2.0) * spacing / last
}

/// Lays out a ranked graph.
#[instrument(skip_all, fields(nodes = graph.len()))]
pub fn layout(graph: &FamilyGraph, ranks: &RankTable, config: &LayoutConfig) -> Layout {
    let mut buckets: BTreeMap<Rank, Vec<NodeId>> = BTreeMap::new();
    for (id, _) in graph.iter_nodes() {
        if let Some(rank) = ranks.rank(id) {
            buckets.entry(rank).or_default().push(id);
        }
    }

    let mut positions = vec![0.0; graph.len()];
    let mut order: Vec<Vec<NodeId>> = vec![Vec::new(); config.min_rank_rows];
    for (rank, mut row) in buckets {
        // Stable: ids were pushed in ascending order.
        row.sort_by_key(|&id| graph.kind(id).map_or(u8::MAX, |k| k.layout_priority()));
        let n = row.len();
        for (i, &id) in row.iter().enumerate() {
            positions[id.index()] = spread_offset(i, n, config.spacing);
        }
        let Ok(slot) = usize::try_from(rank) else {
            continue;
        };
        if slot >= order.len() {
            order.resize_with(slot + 1, Vec::new);
        }
        order[slot] = row;
    }

    debug!(rows = order.len(), "layout computed");
    Layout { positions, order }
}
