// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The end-to-end pipeline: validate → normalize → build → rank → layout.
use tracing::{info, instrument};

use crate::anomaly::Anomaly;
use crate::builder::{build_family_graph, NormalizedRelationship};
use crate::coding::{Normalizer, Orientation};
use crate::config::PedigreeConfig;
use crate::error::PedigreeError;
use crate::graph::{FamilyGraph, NodeKind};
use crate::ident::{NodeId, Rank};
use crate::input::PedigreeInput;
use crate::layout::{layout, Layout};
use crate::rank::{assign_ranks, RankTable};

/// Result of one pipeline run. Owned entirely by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pedigree {
    /// The family graph.
    pub graph: FamilyGraph,
    /// Rank and depth per node.
    pub ranks: RankTable,
    /// Position per node and the per-rank order table.
    pub layout: Layout,
    /// Statements dropped during the build, in input order.
    pub anomalies: Vec<Anomaly>,
}

/// Counts a caller can report without walking the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PedigreeSummary {
    /// All nodes.
    pub total_nodes: usize,
    /// Person nodes.
    pub person_nodes: usize,
    /// Partnership nodes.
    pub partnership_nodes: usize,
    /// Child hub nodes.
    pub child_hub_nodes: usize,
    /// Highest rank in use (0 for an empty graph).
    pub max_rank: Rank,
    /// Distinct generation depths among reached persons.
    pub generations: usize,
}

impl Pedigree {
    /// Rank of a node.
    pub fn rank(&self, id: NodeId) -> Option<Rank> {
        self.ranks.rank(id)
    }

    /// Horizontal position of a node.
    pub fn position(&self, id: NodeId) -> Option<f64> {
        self.layout.position(id)
    }

    /// Node id of a person by external id.
    pub fn person(&self, external_id: &str) -> Option<NodeId> {
        self.graph.person_by_external_id(external_id)
    }

    /// Summary counts.
    pub fn summary(&self) -> PedigreeSummary {
        let count = |kind| self.graph.ids_of_kind(kind).count();
        PedigreeSummary {
            total_nodes: self.graph.len(),
            person_nodes: count(NodeKind::Person),
            partnership_nodes: count(NodeKind::Partnership),
            child_hub_nodes: count(NodeKind::ChildHub),
            max_rank: self.ranks.max_rank().unwrap_or(0),
            generations: self.ranks.generations(),
        }
    }
}

/// Normalizes every statement, flipping inverse codes so the target is
/// always the parent or partner.
pub fn normalize_relationships(
    input: &PedigreeInput,
    normalizer: &Normalizer,
) -> Vec<NormalizedRelationship> {
    input
        .relationships
        .iter()
        .enumerate()
        .map(|(index, rel)| {
            let class = normalizer.classify(&rel.relationship_coding);
            let (subject, target) = match class.orientation {
                Orientation::AsStated => (&rel.subject_external_id, &rel.target_external_id),
                Orientation::Inverse => (&rel.target_external_id, &rel.subject_external_id),
            };
            NormalizedRelationship {
                index,
                subject: subject.trim().to_owned(),
                kind: class.kind,
                target: target.trim().to_owned(),
                code: class.code,
            }
        })
        .collect()
}

/// Runs the whole pipeline.
///
/// Fails only on a malformed payload; everything else is recovered and
/// listed in [`Pedigree::anomalies`].
#[instrument(skip_all)]
pub fn build_pedigree(
    input: &PedigreeInput,
    config: &PedigreeConfig,
) -> Result<Pedigree, PedigreeError> {
    input.validate()?;

    let normalizer = Normalizer::new(&config.coding);
    let relationships = normalize_relationships(input, &normalizer);

    let mut anomalies = Vec::new();
    let graph = build_family_graph(&input.persons, &relationships, &mut anomalies);
    let ranks = assign_ranks(&graph);
    let layout = layout(&graph, &ranks, &config.layout);

    let pedigree = Pedigree {
        graph,
        ranks,
        layout,
        anomalies,
    };
    info!(
        nodes = pedigree.graph.len(),
        anomalies = pedigree.anomalies.len(),
        "pedigree built"
    );
    Ok(pedigree)
}
