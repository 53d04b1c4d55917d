// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Family graph builder.
//!
//! Turns the person registry and the normalized relationship list into a
//! [`FamilyGraph`]. Node ids come out in three contiguous blocks: persons in
//! registry order, then partnerships, then child hubs.
use rustc_hash::FxHashSet;
use tracing::{debug, instrument, warn};

use crate::anomaly::Anomaly;
use crate::coding::RelationshipKind;
use crate::graph::{
    pair_key, ChildHubNode, FamilyGraph, GraphBuilder, Node, PartnershipNode, PersonNode,
};
use crate::ident::NodeId;
use crate::input::{PersonRecord, Side};

/// A relationship statement after normalization.
///
/// Always reads "`target` is the `kind` of `subject`"; inverse codes have
/// already been flipped by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRelationship {
    /// Index of the source statement.
    pub index: usize,
    /// External id of the subject.
    pub subject: String,
    /// Canonical kind.
    pub kind: RelationshipKind,
    /// External id of the target.
    pub target: String,
    /// Code that produced `kind`.
    pub code: String,
}

impl NormalizedRelationship {
    /// Creates a statement with index 0 and an empty code.
    pub fn new(subject: impl Into<String>, kind: RelationshipKind, target: impl Into<String>) -> Self {
        Self {
            index: 0,
            subject: subject.into(),
            kind,
            target: target.into(),
            code: String::new(),
        }
    }
}

/// Per-person link lists collected before any structural node is created.
#[derive(Debug, Default)]
struct Kinship {
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
    partners: Vec<NodeId>,
}

fn push_unique(list: &mut Vec<NodeId>, id: NodeId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Builds the family graph.
///
/// Dropped statements are appended to `anomalies`; the build itself never fails.
#[instrument(skip_all, fields(persons = persons.len(), relationships = relationships.len()))]
pub fn build_family_graph(
    persons: &[PersonRecord],
    relationships: &[NormalizedRelationship],
    anomalies: &mut Vec<Anomaly>,
) -> FamilyGraph {
    let mut builder = GraphBuilder::new();
    for record in persons {
        builder.add_node(Node::Person(PersonNode::from(record)));
    }
    let mut kin: Vec<Kinship> = persons.iter().map(|_| Kinship::default()).collect();

    for rel in relationships {
        let subject = builder.graph().person_by_external_id(&rel.subject);
        let target = builder.graph().person_by_external_id(&rel.target);
        let (subject, target) = match (subject, target) {
            (Some(s), Some(t)) => (s, t),
            (s, t) => {
                let missing = match (s, t) {
                    (None, None) => Side::Both,
                    (None, Some(_)) => Side::Subject,
                    _ => Side::Target,
                };
                warn!(
                    index = rel.index,
                    subject = %rel.subject,
                    target = %rel.target,
                    %missing,
                    "dropping relationship with unknown person"
                );
                anomalies.push(Anomaly::UnresolvedReference {
                    index: rel.index,
                    subject: rel.subject.clone(),
                    target: rel.target.clone(),
                    missing,
                });
                continue;
            }
        };

        if rel.kind == RelationshipKind::Unknown {
            debug!(index = rel.index, code = %rel.code, "ignoring unrecognized relationship");
            anomalies.push(Anomaly::UnrecognizedRelationship {
                index: rel.index,
                subject: rel.subject.clone(),
                target: rel.target.clone(),
                code: rel.code.clone(),
            });
            continue;
        }

        if subject == target {
            warn!(index = rel.index, person = %rel.subject, "dropping self relationship");
            anomalies.push(Anomaly::SelfReference {
                index: rel.index,
                person: rel.subject.clone(),
            });
            continue;
        }

        if rel.kind.is_parental() {
            push_unique(&mut kin[subject.index()].parents, target);
            push_unique(&mut kin[target.index()].children, subject);
        } else {
            push_unique(&mut kin[subject.index()].partners, target);
            push_unique(&mut kin[target.index()].partners, subject);
        }
    }

    let mut materialized: FxHashSet<[NodeId; 2]> = FxHashSet::default();
    let mut partnerships = Vec::new();
    for (index, links) in kin.iter().enumerate() {
        let person = NodeId(index);
        for &partner in &links.partners {
            let key = pair_key(person, partner);
            if !materialized.insert(key) {
                continue;
            }
            let p = builder.add_node(Node::Partnership(PartnershipNode { partners: key }));
            builder.add_edge(key[0], p);
            builder.add_edge(key[1], p);
            partnerships.push((p, key));
        }
    }

    let mut hubs = 0usize;
    for (p, [a, b]) in partnerships {
        let shared: Vec<NodeId> = kin[a.index()]
            .children
            .iter()
            .copied()
            .filter(|c| kin[b.index()].children.contains(c))
            .collect();
        if shared.is_empty() {
            continue;
        }
        let hub = builder.add_node(Node::ChildHub(ChildHubNode { partnership: p }));
        builder.add_edge(p, hub);
        for child in shared {
            builder.add_edge(hub, child);
        }
        hubs += 1;
    }

    let graph = builder.finish();
    // Recorded children that did not land under any hub (single-parent records).
    let detached = kin
        .iter()
        .enumerate()
        .filter(|(i, k)| !k.parents.is_empty() && !graph.has_structural_parents(NodeId(*i)))
        .count();
    debug!(
        nodes = graph.len(),
        edges = graph.edges().len(),
        partnerships = materialized.len(),
        hubs,
        detached,
        "family graph built"
    );
    graph
}
