use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Local, Utc};
use log::{error, info};
use serde_json::json;

use crate::collector::Collector;
use crate::config::Settings;
use crate::error::Result;
use crate::insights::StabilitySnapshot;

#[derive(Debug, Clone)]
pub struct ServerState {
    config_path: PathBuf,
    utc: bool,
}

impl ServerState {
    pub fn new(config_path: PathBuf, utc: bool) -> Self {
        Self { config_path, utc }
    }

    /// Settings are re-read for every snapshot, so edits apply without a restart.
    pub async fn snapshot(&self) -> Result<StabilitySnapshot> {
        let collector = Collector::new(Settings::load(&self.config_path)?);

        if self.utc {
            collector.collect(&Utc::now()).await
        } else {
            collector.collect(&Local::now()).await
        }
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: ServerState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Serving release stability on http://{}/metrics",
        listener.local_addr()?
    );

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}

async fn metrics(State(state): State<Arc<ServerState>>) -> Response {
    match state.snapshot().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            error!("Failed to collect release stability: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
