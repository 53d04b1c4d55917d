// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Family graph: person, partnership and child-hub nodes plus structural edges.
//!
//! The graph is append-only while it is being built through [`GraphBuilder`]
//! and immutable afterwards. Ranks and positions never live on the nodes;
//! later stages keep them in side tables keyed by [`NodeId`].
use rustc_hash::FxHashMap;

use crate::ident::NodeId;
use crate::input::{PersonRecord, Sex};

/// An individual from the person registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonNode {
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

impl From<&PersonRecord> for PersonNode {
    fn from(record: &PersonRecord) -> Self {
        Self {
            external_id: record.external_id.trim().to_owned(),
            sex: record.sex,
            given_name: record.given_name.clone(),
            family_name: record.family_name.clone(),
            birth_date: record.birth_date.clone(),
        }
    }
}

/// A union of exactly two persons. `partners` is sorted ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartnershipNode {
    /// The two partners, lower id first.
    pub partners: [NodeId; 2],
}

/// Fan-out point from a partnership to the children both partners share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildHubNode {
    /// The owning partnership.
    pub partnership: NodeId,
}

/// A graph node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An individual.
    Person(PersonNode),
    /// A couple.
    Partnership(PartnershipNode),
    /// A couple's shared children.
    ChildHub(ChildHubNode),
}

impl Node {
    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Person(_) => NodeKind::Person,
            Self::Partnership(_) => NodeKind::Partnership,
            Self::ChildHub(_) => NodeKind::ChildHub,
        }
    }

    /// Person payload, if this is a person.
    pub fn as_person(&self) -> Option<&PersonNode> {
        match self {
            Self::Person(p) => Some(p),
            _ => None,
        }
    }
}

/// Node discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NodeKind {
    /// [`Node::Person`].
    Person,
    /// [`Node::Partnership`].
    Partnership,
    /// [`Node::ChildHub`].
    ChildHub,
}

impl NodeKind {
    /// Ordering key inside a rank row: persons, then partnerships, then hubs.
    pub fn layout_priority(self) -> u8 {
        match self {
            Self::Person => 1,
            Self::Partnership => 2,
            Self::ChildHub => 3,
        }
    }
}

/// Meaning of an edge, derived from the kinds it connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Person → Partnership: "is partner in".
    PartnerIn,
    /// Partnership → ChildHub: "has children via".
    HasChildren,
    /// ChildHub → Person: "is parent of this child".
    ParentOf,
}

/// Directed structural edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Source node.
    pub from: NodeId,
    /// Destination node.
    pub to: NodeId,
}

/// Immutable family graph produced by the builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Outbound edge indices per node, in insertion order.
    edges_from: Vec<Vec<usize>>,
    /// Inbound edge indices per node, in insertion order.
    edges_to: Vec<Vec<usize>>,
    persons_by_external_id: FxHashMap<String, NodeId>,
}

impl FamilyGraph {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node when it exists.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Kind of a node when it exists.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(Node::kind)
    }

    /// All nodes with their ids, in id order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Ids of all nodes of `kind`, in id order.
    pub fn ids_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.iter_nodes()
            .filter(move |(_, n)| n.kind() == kind)
            .map(|(id, _)| id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges leaving `id`, in insertion order.
    pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges_from
            .get(id.index())
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }

    /// Edges entering `id`, in insertion order.
    pub fn edges_to(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges_to
            .get(id.index())
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }

    /// Semantic kind of an edge; `None` when an endpoint is missing or the
    /// kinds do not form a structural edge.
    pub fn edge_kind(&self, edge: &Edge) -> Option<EdgeKind> {
        match (self.kind(edge.from)?, self.kind(edge.to)?) {
            (NodeKind::Person, NodeKind::Partnership) => Some(EdgeKind::PartnerIn),
            (NodeKind::Partnership, NodeKind::ChildHub) => Some(EdgeKind::HasChildren),
            (NodeKind::ChildHub, NodeKind::Person) => Some(EdgeKind::ParentOf),
            _ => None,
        }
    }

    /// Successors of `id` that have the given kind.
    pub fn successors_of_kind(&self, id: NodeId, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.edges_from(id)
            .map(|e| e.to)
            .filter(move |&to| self.kind(to) == Some(kind))
    }

    /// Person node for an external id.
    pub fn person_by_external_id(&self, external_id: &str) -> Option<NodeId> {
        self.persons_by_external_id.get(external_id.trim()).copied()
    }

    /// Partnerships a person takes part in, in creation order.
    pub fn partnerships_of(&self, person: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors_of_kind(person, NodeKind::Partnership)
    }

    /// The child hub of a partnership, if the couple shares children.
    pub fn child_hub_of(&self, partnership: NodeId) -> Option<NodeId> {
        self.successors_of_kind(partnership, NodeKind::ChildHub).next()
    }

    /// Children attached to a child hub, in edge order.
    pub fn children_of_hub(&self, hub: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors_of_kind(hub, NodeKind::Person)
    }

    /// Structural children of a person: every child reached through one of
    /// the person's partnerships and its hub.
    pub fn children_of(&self, person: NodeId) -> Vec<NodeId> {
        self.partnerships_of(person)
            .filter_map(|p| self.child_hub_of(p))
            .flat_map(|hub| self.children_of_hub(hub))
            .collect()
    }

    /// Partnership that `a` and `b` form, in either order.
    pub fn partnership_between(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let key = pair_key(a, b);
        self.partnerships_of(a).find(|&p| {
            matches!(self.node(p), Some(Node::Partnership(pn)) if pn.partners == key)
        })
    }

    /// True when some child hub points at `person`.
    pub fn has_structural_parents(&self, person: NodeId) -> bool {
        self.edges_to(person)
            .any(|e| self.kind(e.from) == Some(NodeKind::ChildHub))
    }
}

/// Sorted tuple of two node ids; the deduplication key of a partnership.
pub fn pair_key(a: NodeId, b: NodeId) -> [NodeId; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

/// Append-only construction handle for a [`FamilyGraph`].
///
/// Owns the id counter for the duration of one build; [`GraphBuilder::finish`]
/// hands out the immutable graph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: FamilyGraph,
    next_id: usize,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its freshly assigned id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        if let Node::Person(p) = &node {
            self.graph
                .persons_by_external_id
                .insert(p.external_id.clone(), id);
        }
        self.graph.nodes.push(node);
        self.graph.edges_from.push(Vec::new());
        self.graph.edges_to.push(Vec::new());
        id
    }

    /// Appends an edge between two existing nodes.
    ///
    /// Returns `false` and leaves the graph untouched if an endpoint is unknown.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        if from.index() >= self.next_id || to.index() >= self.next_id {
            return false;
        }
        let index = self.graph.edges.len();
        self.graph.edges.push(Edge { from, to });
        self.graph.edges_from[from.index()].push(index);
        self.graph.edges_to[to.index()].push(index);
        true
    }

    /// Read access to the graph under construction.
    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    /// Seals the graph.
    pub fn finish(self) -> FamilyGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str) -> Node {
        Node::Person(PersonNode::from(&PersonRecord::new(id, Sex::Unknown)))
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut b = GraphBuilder::new();
        assert_eq!(b.add_node(person("a")), NodeId(0));
        assert_eq!(b.add_node(person("b")), NodeId(1));
        let p = b.add_node(Node::Partnership(PartnershipNode {
            partners: [NodeId(0), NodeId(1)],
        }));
        assert_eq!(p, NodeId(2));
        assert_eq!(b.graph().len(), 3);
    }

    #[test]
    fn edges_with_missing_endpoints_are_refused() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(person("a"));
        assert!(!b.add_edge(a, NodeId(9)));
        assert!(!b.add_edge(NodeId(9), a));
        assert!(b.finish().edges().is_empty());
    }

    #[test]
    fn edge_kinds_follow_node_kinds() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(person("a"));
        let c = b.add_node(person("c"));
        let p = b.add_node(Node::Partnership(PartnershipNode {
            partners: [a, a],
        }));
        let h = b.add_node(Node::ChildHub(ChildHubNode { partnership: p }));
        assert!(b.add_edge(a, p));
        assert!(b.add_edge(p, h));
        assert!(b.add_edge(h, c));
        assert!(b.add_edge(a, c));
        let g = b.finish();
        let kinds: Vec<_> = g.edges().iter().map(|e| g.edge_kind(e)).collect();
        assert_eq!(
            kinds,
            vec![
                Some(EdgeKind::PartnerIn),
                Some(EdgeKind::HasChildren),
                Some(EdgeKind::ParentOf),
                None,
            ]
        );
        assert_eq!(g.children_of(a), vec![c]);
        assert!(g.has_structural_parents(c));
        assert!(!g.has_structural_parents(a));
        assert_eq!(g.person_by_external_id(" c "), Some(c));
    }

    #[test]
    fn pair_key_is_order_insensitive() {
        assert_eq!(pair_key(NodeId(4), NodeId(1)), pair_key(NodeId(1), NodeId(4)));
        assert_eq!(pair_key(NodeId(4), NodeId(1)), [NodeId(1), NodeId(4)]);
    }
}
