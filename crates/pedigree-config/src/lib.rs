// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Configuration plumbing for pedigree tools.
//!
//! [`ConfigStore`] is the storage port, [`ConfigService`] (de)serializes JSON
//! values through it, and [`FsConfigStore`] keeps them as files under the
//! platform config directory. [`resolve_config`] picks the
//! [`PedigreeConfig`](pedigree_core::PedigreeConfig) a tool should run with.
#![forbid(unsafe_code)]

/// Filesystem-backed store.
pub mod fs;
/// Config resolution for the pipeline.
pub mod resolve;
/// JSON service over a store.
pub mod service;
/// Storage port and errors.
pub mod store;

pub use fs::FsConfigStore;
pub use resolve::{read_config_file, resolve_config, ConfigSource, PEDIGREE_CONFIG_KEY};
pub use service::ConfigService;
pub use store::{ConfigError, ConfigStore};
