//! dagledger: run a concurrent proposer simulation over a block-DAG, then
//! prune to the heaviest branch and report what is final.

mod http;
mod render;

use anyhow::Context;
use clap::Parser;
use dagledger_consensus::{finalized, heaviest_tip, prune_branches, PruneOutcome};
use dagledger_ledger::{Dag, DagSummary, UtxoSet};
use dagledger_sim::{termination_signal, SimConfig, SimReport, Simulator};
use dagledger_types::{Block, BlockId, Timestamp};
use dagledger_utils::LogFormat;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;

const GENESIS_ID: &str = "genesis";

#[derive(Parser)]
#[command(name = "dagledger", about = "Concurrent block-DAG ledger simulation")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base; CLI
    /// flags and env vars override them.
    #[arg(long, env = "DAGLEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent proposers.
    #[arg(long, env = "DAGLEDGER_PROPOSERS")]
    proposers: Option<usize>,

    /// Simulation length in milliseconds.
    #[arg(long, env = "DAGLEDGER_DURATION_MS")]
    duration_ms: Option<u64>,

    /// Base RNG seed for reproducible pauses and minted values.
    #[arg(long, env = "DAGLEDGER_SEED")]
    seed: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DAGLEDGER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "DAGLEDGER_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the simulation.
    Run {
        /// Keep competing branches instead of pruning to the heaviest tip.
        #[arg(long)]
        no_prune: bool,

        /// Write a Graphviz rendering of the final DAG to this path.
        #[arg(long)]
        dot: Option<PathBuf>,

        /// Print a one-line-per-block listing of the final DAG.
        #[arg(long)]
        ascii: bool,

        /// Print a JSON summary of the run to stdout.
        #[arg(long)]
        json: bool,

        /// After reporting, serve the final DAG over HTTP on this address
        /// until interrupted.
        #[arg(long, env = "DAGLEDGER_SERVE")]
        serve: Option<SocketAddr>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

/// JSON summary printed by `run --json`.
#[derive(Serialize)]
struct RunSummary {
    simulation: SimReport,
    heaviest_tip: Option<BlockId>,
    prune: Option<PruneOutcome>,
    dag: DagSummary,
    finalized: Vec<BlockId>,
}

fn load_config(cli: &Cli) -> anyhow::Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(proposers) = cli.proposers {
        config.proposers = proposers;
    }
    if let Some(duration_ms) = cli.duration_ms {
        config.duration_ms = duration_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Run {
            no_prune,
            dot,
            ascii,
            json,
            serve,
        } => {
            dagledger_utils::init_logging(config.log_format, &config.log_level);
            if let Some(path) = &cli.config {
                tracing::info!("Loaded config from {}", path.display());
            }

            let mut dag = Dag::new();
            dag.add_genesis(Block::genesis(GENESIS_ID, Timestamp::now()), &UtxoSet::new())?;
            tracing::info!(genesis = GENESIS_ID, "genesis added");

            let duration = config.duration();
            let sim = Simulator::new(dag, config)?;
            let report = sim
                .run_until(async {
                    tokio::select! {
                        _ = tokio::time::sleep(duration) => {}
                        _ = termination_signal() => {}
                    }
                })
                .await?;

            let shared = sim.dag();
            let mut dag = shared.lock().await;

            let tip = heaviest_tip(&dag).map(|t| (t.id().clone(), t.weight()));
            if let Some((id, weight)) = &tip {
                tracing::info!(tip = %id, weight, "heaviest tip");
            }

            let prune = if no_prune {
                None
            } else {
                Some(prune_branches(&mut dag))
            };

            let final_ids = finalized(&dag);
            tracing::info!(
                remaining = dag.len(),
                finalized = final_ids.len(),
                "consensus pass complete"
            );

            if let Some(path) = dot {
                std::fs::write(&path, render::dot(&dag))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("Wrote {} (render with `dot -Tpng`)", path.display());
            }
            if ascii {
                print!("{}", render::ascii(&dag));
            }
            if json {
                let summary = RunSummary {
                    simulation: report,
                    heaviest_tip: tip.map(|(id, _)| id),
                    prune,
                    dag: dag.summary(),
                    finalized: final_ids,
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            drop(dag);

            if let Some(addr) = serve {
                http::serve(addr, shared, termination_signal())
                    .await
                    .with_context(|| format!("HTTP API on {addr} failed"))?;
            }

            tracing::info!("dagledger exited cleanly");
        }
    }

    Ok(())
}
