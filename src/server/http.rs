use crate::app::dto::*;
use crate::app::engine::NavigatorEngine;
use crate::domain::error::ToolError;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct HttpState {
    pub engine: NavigatorEngine,
}

#[derive(Debug, Clone, Deserialize)]
struct TreeQuery {
    depth: Option<usize>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct ApiErrorBody {
    error: String,
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> impl IntoResponse {
    (status, Json(ApiErrorBody { error: msg.into() }))
}

/// Tool failures are upstream problems; everything else blames the request.
fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<ToolError>() {
        Some(ToolError::ToolInvocation { .. }) => StatusCode::BAD_GATEWAY,
        Some(ToolError::MalformedOutput { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        None => StatusCode::BAD_REQUEST,
    }
}

pub fn build_router(engine: NavigatorEngine) -> Router {
    let state = Arc::new(HttpState { engine });

    Router::new()
        .route("/health", get(health))
        .route("/definition", post(find_definition))
        .route("/definition/parse", post(parse_definition))
        .route("/tree", get(tree))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(engine: NavigatorEngine, addr: SocketAddr) -> Result<()> {
    let app = build_router(engine);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let engine = state.engine.clone();
    match spawn_blocking(move || engine.health()).await {
        Ok(res) => Json(res).into_response(),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        )
        .into_response(),
    }
}

async fn find_definition(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<FindDefinitionRequest>,
) -> impl IntoResponse {
    let engine = state.engine.clone();
    match spawn_blocking(move || engine.find_definition(req)).await {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) => api_error(status_for(&e), format!("{e:#}")).into_response(),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        )
        .into_response(),
    }
}

async fn parse_definition(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<ParseOutputRequest>,
) -> impl IntoResponse {
    match state.engine.parse_output(req) {
        Ok(res) => Json(res).into_response(),
        Err(e) => api_error(status_for(&e), format!("{e:#}")).into_response(),
    }
}

async fn tree(State(state): State<Arc<HttpState>>, Query(q): Query<TreeQuery>) -> impl IntoResponse {
    let engine = state.engine.clone();
    match spawn_blocking(move || engine.tree(q.depth)).await {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) => api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response(),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        )
        .into_response(),
    }
}
