// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Developer harness around the pedigree pipeline.
//!
//! Reads a JSON [`PedigreeInput`](pedigree_core::PedigreeInput), runs
//! [`build_pedigree`](pedigree_core::build_pedigree) and reports the document,
//! a summary, or its canonical hash. `torture` rebuilds the same input many
//! times and fails on the first divergent hash.
#![forbid(unsafe_code)]

/// Command-line surface and command runners.
pub mod harness;
