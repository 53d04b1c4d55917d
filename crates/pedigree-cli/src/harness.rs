// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use pedigree_config::{resolve_config, ConfigService, ConfigSource, FsConfigStore};
use pedigree_core::{build_pedigree, Anomaly, Pedigree, PedigreeConfig, PedigreeInput, PedigreeSummary};
use pedigree_graph::PedigreeDocument;

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "pedigree")]
#[command(about = "Build layered pedigree graphs from coded family relationships")]
pub struct Cli {
    /// Raise log verbosity (`-v` debug, `-vv` trace). Overrides `RUST_LOG`.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Configuration file; defaults to the stored `pedigree` config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Harness subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the pedigree and print the document as JSON
    Build {
        /// Path to the input JSON
        input: PathBuf,
        /// Write the document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print node counts and dropped relationships
    Summary {
        /// Path to the input JSON
        input: PathBuf,
    },
    /// Print the hex BLAKE3 digest of the canonical document
    Hash {
        /// Path to the input JSON
        input: PathBuf,
    },
    /// Rebuild the same input repeatedly and fail on any divergence
    Torture {
        /// Path to the input JSON
        input: PathBuf,
        /// Number of runs
        #[arg(long, default_value = "20")]
        runs: u32,
    },
}

/// Output of the `summary` command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    /// Node and generation counts.
    pub summary: PedigreeSummary,
    /// Relationships dropped during the build.
    pub anomalies: Vec<Anomaly>,
    /// Where the configuration came from.
    pub config_source: String,
}

/// Parses arguments, installs logging, and runs the selected command
/// against stdout.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

/// Runs one command, writing its primary output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let (config, source) = load_config(cli.config.as_deref())?;
    debug!(%source, "using configuration");

    match &cli.command {
        Commands::Build { input, out: path, pretty } => {
            let doc = PedigreeDocument::from_pedigree(&build(input, &config)?);
            let json = if *pretty {
                serde_json::to_string_pretty(&doc)?
            } else {
                serde_json::to_string(&doc)?
            };
            if let Some(path) = path {
                fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), nodes = doc.nodes.len(), "document written");
            } else {
                writeln!(out, "{json}")?;
            }
        }
        Commands::Summary { input } => {
            let pedigree = build(input, &config)?;
            let report = SummaryReport {
                summary: pedigree.summary(),
                anomalies: pedigree.anomalies,
                config_source: source.to_string(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        Commands::Hash { input } => {
            let hash = document_hash(&build(input, &config)?)?;
            writeln!(out, "{hash}")?;
        }
        Commands::Torture { input, runs } => {
            torture(input, &config, *runs, out)?;
        }
    }
    Ok(())
}

fn torture(input: &Path, config: &PedigreeConfig, runs: u32, out: &mut impl Write) -> Result<()> {
    if runs == 0 {
        bail!("--runs must be at least 1");
    }
    let payload = load_input(input)?;
    let baseline = document_hash(&build_from(&payload, config)?).context("run 1 (baseline) failed")?;
    for run in 2..=runs {
        let hash = document_hash(&build_from(&payload, config)?)
            .with_context(|| format!("run {run} failed"))?;
        if hash != baseline {
            bail!("divergence detected in run {run}\nbaseline: {baseline}\ncurrent:  {hash}");
        }
    }
    writeln!(out, "torture: {runs} runs, hash {baseline}")?;
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<(PedigreeConfig, ConfigSource)> {
    // No platform config dir (e.g. no HOME) just means no stored config.
    let service = match FsConfigStore::new() {
        Ok(store) => Some(ConfigService::new(store)),
        Err(err) => {
            debug!(%err, "config store unavailable");
            None
        }
    };
    resolve_config(explicit, service.as_ref()).context("failed to load configuration")
}

/// Reads a JSON input payload.
pub fn load_input(path: &Path) -> Result<PedigreeInput> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn build(path: &Path, config: &PedigreeConfig) -> Result<Pedigree> {
    build_from(&load_input(path)?, config)
}

fn build_from(input: &PedigreeInput, config: &PedigreeConfig) -> Result<Pedigree> {
    let pedigree = build_pedigree(input, config)?;
    if !pedigree.anomalies.is_empty() {
        warn!(
            dropped = pedigree.anomalies.len(),
            "some relationships were dropped; run `summary` for details"
        );
    }
    Ok(pedigree)
}

/// Hex BLAKE3 digest of the canonical document for `pedigree`.
pub fn document_hash(pedigree: &Pedigree) -> Result<String> {
    let hash = PedigreeDocument::from_pedigree(pedigree).compute_hash()?;
    Ok(hex::encode(hash))
}
