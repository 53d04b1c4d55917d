// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generation and rank assignment.
//!
//! Persons without structural parents are roots at depth 0. A breadth-first
//! walk along Person → Partnership → ChildHub → Person gives every reachable
//! person its generation depth; the first frontier to reach a person decides
//! its depth. Depth is then turned into a rank:
//!
//! ```text
//! person      = (max_depth - depth) * 2 + 1      (unreached: 1)
//! partnership = min(rank of partners)            (none: 1)
//! child hub   = rank of its partnership - 1
//! ```
//!
//! The factor two leaves an odd/even interleave: persons sit on odd ranks and
//! child hubs on the even rank between a couple and its children.
use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::graph::{FamilyGraph, Node, NodeKind};
use crate::ident::{Depth, NodeId, Rank, DEFAULT_RANK};

/// Rank side table for one graph, indexed by node id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankTable {
    ranks: Vec<Rank>,
    depths: Vec<Option<Depth>>,
    roots: Vec<NodeId>,
    max_depth: Depth,
}

impl RankTable {
    /// Rank of a node.
    pub fn rank(&self, id: NodeId) -> Option<Rank> {
        self.ranks.get(id.index()).copied()
    }

    /// Generation depth of a person; `None` for unreached persons and
    /// non-person nodes.
    pub fn depth(&self, id: NodeId) -> Option<Depth> {
        self.depths.get(id.index()).copied().flatten()
    }

    /// All ranks, indexed by node id.
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    /// Root persons in id order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Deepest generation reached by the traversal.
    pub fn max_depth(&self) -> Depth {
        self.max_depth
    }

    /// Highest rank in the table, `None` for an empty graph.
    pub fn max_rank(&self) -> Option<Rank> {
        self.ranks.iter().copied().max()
    }

    /// Number of distinct generation depths among reached persons.
    pub fn generations(&self) -> usize {
        let mut seen: Vec<Depth> = self.depths.iter().filter_map(|d| *d).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

/// Computes depth and rank for every node of `graph`.
#[instrument(skip_all, fields(nodes = graph.len()))]
pub fn assign_ranks(graph: &FamilyGraph) -> RankTable {
    let mut depths: Vec<Option<Depth>> = vec![None; graph.len()];
    let roots: Vec<NodeId> = graph
        .ids_of_kind(NodeKind::Person)
        .filter(|&p| !graph.has_structural_parents(p))
        .collect();

    let mut queue: VecDeque<NodeId> = VecDeque::with_capacity(roots.len());
    for &root in &roots {
        depths[root.index()] = Some(0);
        queue.push_back(root);
    }

    let mut max_depth: Depth = 0;
    while let Some(parent) = queue.pop_front() {
        let Some(depth) = depths[parent.index()] else {
            continue;
        };
        for child in graph.children_of(parent) {
            if depths[child.index()].is_some() {
                continue;
            }
            let child_depth = depth + 1;
            depths[child.index()] = Some(child_depth);
            max_depth = max_depth.max(child_depth);
            queue.push_back(child);
        }
    }

    let mut ranks: Vec<Rank> = vec![DEFAULT_RANK; graph.len()];
    for (id, node) in graph.iter_nodes() {
        if let Node::Person(_) = node {
            if let Some(depth) = depths[id.index()] {
                ranks[id.index()] = (max_depth - depth) * 2 + 1;
            }
        }
    }
    // Partnerships precede their hubs in id order, but keep the passes explicit.
    for (id, node) in graph.iter_nodes() {
        if let Node::Partnership(p) = node {
            ranks[id.index()] = p
                .partners
                .iter()
                .filter_map(|partner| ranks.get(partner.index()).copied())
                .min()
                .unwrap_or(DEFAULT_RANK);
        }
    }
    for (id, node) in graph.iter_nodes() {
        if let Node::ChildHub(hub) = node {
            let parent_rank = ranks.get(hub.partnership.index()).copied().unwrap_or(DEFAULT_RANK);
            ranks[id.index()] = parent_rank.saturating_sub(1);
        }
    }

    let unreached = graph
        .ids_of_kind(NodeKind::Person)
        .filter(|p| depths[p.index()].is_none())
        .count();
    debug!(roots = roots.len(), max_depth, unreached, "ranks assigned");

    RankTable {
        ranks,
        depths,
        roots,
        max_depth,
    }
}
