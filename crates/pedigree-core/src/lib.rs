// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! pedigree-core: layered pedigree graphs from coded family relationships.
//!
//! The pipeline runs in four synchronous stages, each a pure function of the
//! previous stage's output:
//!
//! 1. [`coding`] folds coded relationship terms into a [`RelationshipKind`].
//! 2. [`builder`] creates person, partnership and child-hub nodes.
//! 3. [`rank`] assigns generation depths and ranks.
//! 4. [`layout`] orders every rank row and assigns horizontal offsets.
//!
//! [`build_pedigree`] runs them all. Independent calls share nothing and may
//! run on separate threads.
#![forbid(unsafe_code)]

/// Recoverable build anomalies.
pub mod anomaly;
/// Family graph builder.
pub mod builder;
/// Relationship normalizer.
pub mod coding;
/// Pipeline configuration.
pub mod config;
/// Build errors.
pub mod error;
/// Family graph data structure.
pub mod graph;
/// Identifiers and rank types.
pub mod ident;
/// Input records.
pub mod input;
/// Horizontal layout.
pub mod layout;
/// End-to-end pipeline.
pub mod pipeline;
/// Generation and rank assignment.
pub mod rank;

pub use anomaly::Anomaly;
pub use builder::{build_family_graph, NormalizedRelationship};
pub use coding::{Classification, Normalizer, Orientation, RelationshipKind};
pub use config::{CodingConfig, LayoutConfig, PedigreeConfig};
pub use error::{InputError, PedigreeError};
pub use graph::{
    ChildHubNode, Edge, EdgeKind, FamilyGraph, GraphBuilder, Node, NodeKind, PartnershipNode,
    PersonNode,
};
pub use ident::{Depth, NodeId, Rank, DEFAULT_RANK};
pub use input::{Coding, PedigreeInput, PersonRecord, RelationshipRecord, Sex, Side};
pub use layout::{layout, spread_offset, Layout};
pub use pipeline::{build_pedigree, normalize_relationships, Pedigree, PedigreeSummary};
pub use rank::{assign_ranks, RankTable};
