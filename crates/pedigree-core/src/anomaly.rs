// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recoverable problems found while building a graph.
use std::fmt;

use crate::input::Side;

/// A relationship statement that was dropped without aborting the build.
///
/// `index` always refers to the position of the statement in
/// [`PedigreeInput::relationships`](crate::PedigreeInput::relationships).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Anomaly {
    /// Subject or target is not in the person registry.
    UnresolvedReference {
        /// Relationship index.
        index: usize,
        /// Subject id as given.
        subject: String,
        /// Target id as given.
        target: String,
        /// Which end could not be resolved.
        missing: Side,
    },
    /// No coding of the statement maps to a known relationship kind.
    UnrecognizedRelationship {
        /// Relationship index.
        index: usize,
        /// Subject id as given.
        subject: String,
        /// Target id as given.
        target: String,
        /// First code of the statement, verbatim.
        code: String,
    },
    /// Subject and target are the same person.
    SelfReference {
        /// Relationship index.
        index: usize,
        /// The person's external id.
        person: String,
    },
}

impl Anomaly {
    /// Index of the offending relationship statement.
    pub fn index(&self) -> usize {
        match self {
            Self::UnresolvedReference { index, .. }
            | Self::UnrecognizedRelationship { index, .. }
            | Self::SelfReference { index, .. } => *index,
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedReference {
                index,
                subject,
                target,
                missing,
            } => write!(
                f,
                "relationship #{index} ({subject} -> {target}): unknown {missing}"
            ),
            Self::UnrecognizedRelationship {
                index,
                subject,
                target,
                code,
            } => write!(
                f,
                "relationship #{index} ({subject} -> {target}): unrecognized code {code:?}"
            ),
            Self::SelfReference { index, person } => {
                write!(f, "relationship #{index}: {person} is related to itself")
            }
        }
    }
}
