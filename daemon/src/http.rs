//! Read-only HTTP view of the DAG.
//!
//! Every handler takes the shared DAG lock for the duration of one query, so
//! responses always reflect a single consistent state.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use dagledger_consensus::{finalized, heaviest_tip};
use dagledger_sim::SharedDag;
use dagledger_types::BlockId;
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;

use crate::render;

pub const DOT_CONTENT_TYPE: &str = "text/vnd.graphviz";

#[derive(Debug, Serialize)]
struct TipResponse {
    id: BlockId,
    weight: u64,
    parents: Vec<BlockId>,
    transactions: u64,
}

pub fn router(dag: SharedDag) -> Router {
    Router::new()
        .route("/tips", get(get_tip))
        .route("/finalized", get(get_finalized))
        .route("/ascii", get(get_ascii))
        .route("/dot", get(get_dot))
        .with_state(dag)
}

/// Serve [`router`] on `addr` until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, dag: SharedDag, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(dag))
        .with_graceful_shutdown(shutdown)
        .await
}

// ── GET /tips ──

/// The heaviest tip, or `null` on an empty DAG.
async fn get_tip(State(dag): State<SharedDag>) -> Json<Option<TipResponse>> {
    let dag = dag.lock().await;
    Json(heaviest_tip(&dag).map(|tip| TipResponse {
        id: tip.id().clone(),
        weight: tip.weight(),
        parents: tip.parents().to_vec(),
        transactions: tip.block().tx_count(),
    }))
}

// ── GET /finalized ──

async fn get_finalized(State(dag): State<SharedDag>) -> Json<Vec<BlockId>> {
    let dag = dag.lock().await;
    Json(finalized(&dag))
}

// ── GET /ascii, GET /dot ──

async fn get_ascii(State(dag): State<SharedDag>) -> String {
    let dag = dag.lock().await;
    render::ascii(&dag)
}

async fn get_dot(State(dag): State<SharedDag>) -> impl IntoResponse {
    let dag = dag.lock().await;
    ([(header::CONTENT_TYPE, DOT_CONTENT_TYPE)], render::dot(&dag))
}
