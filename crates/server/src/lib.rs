//! HTTP lookup endpoint.
//!
//! `GET /query/{key}` answers with the JSON [`QueryResult`] for `key`, an
//! unknown key gives an empty `entries` list. `GET /health` reports the size
//! of the loaded store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use jdict_api::models::QueryResult;
use jdict_core::{EntryStore, IndexError, StoreStats};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EntryStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }
}

/// Lookup failure, reported as a 500 with an `error` message.
#[derive(Debug)]
pub struct ServerError(IndexError);

impl From<IndexError> for ServerError {
    fn from(err: IndexError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("Query failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub fn router(store: Arc<dyn EntryStore>) -> Router {
    Router::new()
        .route("/query/{key}", get(query_handler))
        .route("/health", get(health_handler))
        .with_state(AppState::new(store))
}

pub async fn query_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<QueryResult>, ServerError> {
    let result = jdict_core::query(state.store.as_ref(), &key)?;
    info!(key = %key, entries = result.entries.len(), "GET /query");
    Ok(Json(result))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.store.stats())
}

/// Serve `store` on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, store: Arc<dyn EntryStore>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Query server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down query server");
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdict_api::models::{DictEntry, MeaningBlock, PhoneticForm, WrittenForm};
    use jdict_core::{MemoryStore, index_entry};

    fn state() -> AppState {
        let mut store = MemoryStore::new();
        let entry = DictEntry {
            sequence: 1358280,
            written: vec![WrittenForm {
                text: "食べる".to_string(),
                ..Default::default()
            }],
            phonetic: vec![PhoneticForm {
                text: "たべる".to_string(),
                ..Default::default()
            }],
            meanings: vec![MeaningBlock {
                glosses: vec!["to eat".to_string()],
                ..Default::default()
            }],
        };
        index_entry(&mut store, &entry).unwrap();
        AppState::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_query_known_key() {
        let Json(result) = query_handler(State(state()), Path("食べる".to_string()))
            .await
            .unwrap();
        assert_eq!(result.key, "食べる");
        assert_eq!(result.entries[0].phonetic_texts(), vec!["たべる"]);
        assert_eq!(result.entries[0].glosses(), vec![vec!["to eat"]]);
    }

    #[tokio::test]
    async fn test_query_unknown_key_is_empty() {
        let Json(result) = query_handler(State(state()), Path("飲む".to_string()))
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let Json(stats) = health_handler(State(state())).await;
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.keys, 3);
    }

    #[test]
    fn test_error_is_internal_server_error() {
        let response = ServerError::from(IndexError::inconsistency(7, "slot out of range"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
