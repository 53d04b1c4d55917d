// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node identifiers and layer values.
use std::fmt;

/// Strongly typed index of a node inside one [`FamilyGraph`](crate::FamilyGraph).
///
/// Ids are handed out sequentially from zero while a graph is built and are
/// never reused or renumbered. They are local to a single build call and carry
/// no relation to the external person identifiers of the input registry.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the position of this node in the graph's node list.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Vertical layer index. Larger numbers are drawn higher (older generations).
pub type Rank = u32;

/// Breadth-first distance of a person from its root ancestor.
pub type Depth = u32;

/// Rank given to anything the generation traversal could not place.
pub const DEFAULT_RANK: Rank = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_orders_by_creation_index() {
        let mut ids = vec![NodeId(3), NodeId(0), NodeId(2)];
        ids.sort();
        assert_eq!(ids, vec![NodeId(0), NodeId(2), NodeId(3)]);
        assert_eq!(NodeId(7).index(), 7);
        assert_eq!(NodeId(7).to_string(), "n7");
    }
}
