// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for the pedigree harness.

use anyhow::Result;
use pedigree_cli::harness::entrypoint;

fn main() -> Result<()> {
    entrypoint()
}
