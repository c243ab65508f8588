//! HTTP request/response surface over the query pipeline.
//!
//! Two routes, mirroring the catalog listing and the single-query request:
//!
//! * `GET /database/{dbname}` – the catalog as JSON `SetInfo` records.
//! * `POST /database/{dbname}` – body `{"expression": "..."}`, response a
//!   JSON array of the result items, or an error message with a 4xx/5xx
//!   status.
//!
//! Open handles live in a process-wide map; every handle sits behind its
//! own mutex so at most one query runs against a given database at a time.
//! The engine itself is synchronous, so handler work is pushed through
//! `spawn_blocking`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::database::{BackendRegistry, Database, SetInfo};
use crate::error::{CantorError, Result};

#[derive(Deserialize)]
pub struct QueryRequest {
    pub expression: String,
}

type HandlerError = (StatusCode, String);

/// Process-wide server state: the backend registry and the open handles.
pub struct ServerState {
    registry: BackendRegistry,
    backend: String,
    databases: Mutex<HashMap<String, Arc<Mutex<Database>>>>,
}

impl ServerState {
    pub fn new(registry: BackendRegistry, backend: impl Into<String>) -> Self {
        Self {
            registry,
            backend: backend.into(),
            databases: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches the already-open handle for `name`, opening it on first use.
    fn open_database(&self, name: &str) -> Result<Arc<Mutex<Database>>> {
        let mut databases = self
            .databases
            .lock()
            .map_err(|e| CantorError::Lock(e.to_string()))?;
        if let Some(database) = databases.get(name) {
            return Ok(Arc::clone(database));
        }
        let database = Arc::new(Mutex::new(self.registry.open(&self.backend, name)?));
        databases.insert(name.to_string(), Arc::clone(&database));
        Ok(database)
    }
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/database/:dbname", get(list_database).post(query_database))
        .with_state(state)
}

fn status_for(e: &CantorError) -> StatusCode {
    match e {
        CantorError::Parse { .. }
        | CantorError::UnknownSet(_)
        | CantorError::CyclicReference(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(e: CantorError) -> HandlerError {
    (status_for(&e), e.to_string())
}

async fn list_database(
    State(state): State<Arc<ServerState>>,
    Path(dbname): Path<String>,
) -> std::result::Result<Json<Vec<SetInfo>>, HandlerError> {
    let database = state.open_database(&dbname).map_err(reject)?;
    let infos = tokio::task::spawn_blocking(move || {
        let database = database.lock().map_err(|e| CantorError::Lock(e.to_string()))?;
        database.list()
    })
    .await
    .map_err(|e| {
        warn!(error = %e, "join error");
        (StatusCode::INTERNAL_SERVER_ERROR, "join error".to_string())
    })?
    .map_err(reject)?;
    Ok(Json(infos))
}

async fn query_database(
    State(state): State<Arc<ServerState>>,
    Path(dbname): Path<String>,
    Json(request): Json<QueryRequest>,
) -> std::result::Result<Json<Vec<String>>, HandlerError> {
    let database = state.open_database(&dbname).map_err(reject)?;
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        let mut database = database.lock().map_err(|e| CantorError::Lock(e.to_string()))?;
        database.query(&request.expression).map(|result| result.items())
    })
    .await
    .map_err(|e| {
        warn!(error = %e, "join error");
        (StatusCode::INTERNAL_SERVER_ERROR, "join error".to_string())
    })?;
    match result {
        Ok(items) => {
            info!(ms = started.elapsed().as_millis() as u64, items = items.len(), "query complete");
            Ok(Json(items))
        }
        Err(e) => {
            warn!(error = %e, "query failed");
            Err(reject(e))
        }
    }
}
