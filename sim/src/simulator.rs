//! Drives a pool of proposer tasks against one shared DAG.

use dagledger_ledger::Dag;
use serde::Serialize;
use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, Mutex};

use crate::config::SimConfig;
use crate::proposer::Proposer;
use crate::shutdown::ShutdownController;
use crate::SimError;

/// The DAG shared by all proposers. Every proposal and every consensus query
/// that runs alongside proposers goes through this one lock.
pub type SharedDag = Arc<Mutex<Dag>>;

/// Outcome of one simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimReport {
    /// Blocks accepted into the DAG.
    pub proposed: u64,
    /// Proposals that `add_block` rejected.
    pub rejected: u64,
    /// Accepted blocks per proposer, by proposer index.
    pub per_proposer: Vec<u64>,
    pub elapsed_ms: u64,
}

/// What one proposer task did before it stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProposerTally {
    pub accepted: u64,
    pub rejected: u64,
}

impl SimReport {
    /// Combine per-proposer tallies, given in proposer index order.
    pub fn from_tallies(tallies: &[ProposerTally], elapsed_ms: u64) -> Self {
        Self {
            proposed: tallies.iter().map(|t| t.accepted).sum(),
            rejected: tallies.iter().map(|t| t.rejected).sum(),
            per_proposer: tallies.iter().map(|t| t.accepted).collect(),
            elapsed_ms,
        }
    }
}

pub struct Simulator {
    dag: SharedDag,
    config: SimConfig,
}

impl Simulator {
    /// `dag` must already hold a genesis block.
    pub fn new(dag: Dag, config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        if dag.genesis_id().is_none() {
            return Err(SimError::NoGenesis);
        }
        Ok(Self {
            dag: Arc::new(Mutex::new(dag)),
            config,
        })
    }

    /// Handle to the shared DAG; lock it to read or rewrite.
    pub fn dag(&self) -> SharedDag {
        Arc::clone(&self.dag)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run for the configured duration.
    pub async fn run(&self) -> Result<SimReport, SimError> {
        self.run_until(tokio::time::sleep(self.config.duration())).await
    }

    /// Run until `stop` completes, then signal every proposer and wait for
    /// all of them to exit. An insertion already in progress always finishes.
    pub async fn run_until<F>(&self, stop: F) -> Result<SimReport, SimError>
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let shutdown = ShutdownController::new();

        tracing::info!(
            proposers = self.config.proposers,
            duration_ms = self.config.duration_ms,
            "starting simulation"
        );

        let handles: Vec<_> = (0..self.config.proposers)
            .map(|index| {
                let proposer = Proposer::new(index, self.config.seed, self.config.max_mint_value);
                tokio::spawn(proposer_loop(
                    proposer,
                    Arc::clone(&self.dag),
                    self.config.pause_range_ms(),
                    shutdown.subscribe(),
                ))
            })
            .collect();

        stop.await;
        shutdown.shutdown();

        let mut tallies = Vec::with_capacity(handles.len());
        for handle in handles {
            tallies.push(handle.await.map_err(|e| SimError::Join(e.to_string()))?);
        }

        let report = SimReport::from_tallies(&tallies, started.elapsed().as_millis() as u64);
        tracing::info!(
            proposed = report.proposed,
            rejected = report.rejected,
            per_proposer = ?report.per_proposer,
            elapsed_ms = report.elapsed_ms,
            "simulation complete"
        );
        Ok(report)
    }
}

/// One proposer: propose under the lock, pause, repeat until signalled.
async fn proposer_loop(
    mut proposer: Proposer,
    dag: SharedDag,
    pause_ms: RangeInclusive<u64>,
    mut shutdown: broadcast::Receiver<()>,
) -> ProposerTally {
    let mut tally = ProposerTally::default();

    loop {
        if !matches!(shutdown.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }

        let outcome = {
            let mut dag = dag.lock().await;
            proposer.propose(&mut dag)
        };

        match outcome {
            Ok(block) => {
                tally.accepted += 1;
                tracing::debug!(proposer = proposer.name(), %block, "proposed block");
            }
            Err(e) => {
                // not retried; the next cycle builds a fresh block
                tally.rejected += 1;
                tracing::warn!(proposer = proposer.name(), error = %e, "proposal rejected");
            }
        }

        let pause = proposer.pause(pause_ms.clone());
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = tokio::time::sleep(pause) => {}
        }
    }

    tracing::debug!(
        proposer = proposer.name(),
        accepted = tally.accepted,
        rejected = tally.rejected,
        "proposer stopped"
    );
    tally
}
