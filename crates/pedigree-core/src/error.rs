// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors that abort a build.
//!
//! Only structurally broken payloads end up here. Per-record problems are
//! collected as [`Anomaly`](crate::Anomaly) values instead.
use thiserror::Error;

use crate::input::Side;

/// First structural violation found in a [`PedigreeInput`](crate::PedigreeInput).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A registry entry has a blank external id.
    #[error("person #{index} has an empty external id")]
    EmptyPersonId {
        /// Registry index.
        index: usize,
    },
    /// Two registry entries share the same external id.
    #[error("person id {id:?} is registered twice (#{first} and #{second})")]
    DuplicatePersonId {
        /// The duplicated id.
        id: String,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },
    /// A relationship statement names a blank person id.
    #[error("relationship #{index} has an empty {side} id")]
    EmptyReference {
        /// Relationship index.
        index: usize,
        /// The blank end(s).
        side: Side,
    },
    /// A relationship statement carries no coding at all.
    #[error("relationship #{index} carries no coding")]
    MissingCoding {
        /// Relationship index.
        index: usize,
    },
}

/// Error returned by [`build_pedigree`](crate::build_pedigree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PedigreeError {
    /// The input payload is malformed; no graph was built.
    #[error("malformed input: {0}")]
    Input(#[from] InputError),
}
