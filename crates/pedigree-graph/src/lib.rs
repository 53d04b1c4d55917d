// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serialized pedigree document handed to renderers and exporters.
//! Pure data (nodes, outgoing edges, rank table, positions) with deterministic
//! CBOR serialization and BLAKE3 hashing.

use blake3::Hash;
use ciborium::ser::into_writer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pedigree_core::{
    Anomaly, NodeId, NodeKind, Pedigree, PedigreeSummary, PersonNode, Rank, Sex, DEFAULT_RANK,
};

/// Blake3 document hash (32 bytes).
pub type Hash32 = [u8; 32];

/// Canonical encoding failure.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The CBOR serializer rejected the document.
    #[error("canonical encoding failed: {0}")]
    Cbor(#[from] ciborium::ser::Error<std::io::Error>),
}

/// Person payload attached to person nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonData {
    /// External id from the registry.
    pub external_id: String,
    /// Administrative sex.
    pub sex: Sex,
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub family_name: String,
    /// Birth date as recorded.
    pub birth_date: Option<String>,
}

impl From<&PersonNode> for PersonData {
    fn from(person: &PersonNode) -> Self {
        Self {
            external_id: person.external_id.clone(),
            sex: person.sex,
            given_name: person.given_name.clone(),
            family_name: person.family_name.clone(),
            birth_date: person.birth_date.clone(),
        }
    }
}

/// Edge as seen from its source node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct OutgoingEdge {
    /// Destination node.
    pub to: NodeId,
}

/// Renderable node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    /// Node identifier.
    pub id: NodeId,
    /// Node classification.
    pub kind: NodeKind,
    /// Person payload; `null` for partnerships and hubs.
    pub person_data: Option<PersonData>,
    /// Vertical layer.
    pub rank: Rank,
    /// Structural edges leaving this node.
    pub outgoing_edges: Vec<OutgoingEdge>,
}

/// The complete document for one build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PedigreeDocument {
    /// All nodes, indexed by id.
    pub nodes: Vec<RenderNode>,
    /// Row `r` lists the nodes of rank `r`, left to right.
    pub rank_table: Vec<Vec<NodeId>>,
    /// Horizontal offset per node id.
    pub positions: Vec<f64>,
    /// Node and generation counts.
    pub summary: PedigreeSummary,
    /// Statements dropped during the build.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<Anomaly>,
}

impl PedigreeDocument {
    /// Flattens a built pedigree into its serialized shape.
    pub fn from_pedigree(pedigree: &Pedigree) -> Self {
        let graph = &pedigree.graph;
        let nodes = graph
            .iter_nodes()
            .map(|(id, node)| RenderNode {
                id,
                kind: node.kind(),
                person_data: node.as_person().map(PersonData::from),
                rank: pedigree.rank(id).unwrap_or(DEFAULT_RANK),
                outgoing_edges: graph
                    .edges_from(id)
                    .map(|e| OutgoingEdge { to: e.to })
                    .collect(),
            })
            .collect();
        Self {
            nodes,
            rank_table: pedigree.layout.order_table().to_vec(),
            positions: pedigree.layout.positions().to_vec(),
            summary: pedigree.summary(),
            anomalies: pedigree.anomalies.clone(),
        }
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.get(id.index()).filter(|n| n.id == id)
    }

    /// Canonical serialization (nodes and edges sorted) for hashing/comparison.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut doc = self.clone();
        doc.nodes.sort_by_key(|n| n.id);
        for node in &mut doc.nodes {
            node.outgoing_edges.sort_unstable();
        }
        let mut bytes = Vec::new();
        into_writer(&doc, &mut bytes)?;
        Ok(bytes)
    }

    /// BLAKE3 digest of [`to_canonical_bytes`](Self::to_canonical_bytes).
    ///
    /// Builds of the same input under the same config always digest equal,
    /// so the value doubles as a determinism check.
    pub fn compute_hash(&self) -> Result<Hash32, EncodeError> {
        let h: Hash = blake3::hash(&self.to_canonical_bytes()?);
        Ok(h.into())
    }
}
