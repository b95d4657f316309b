#![cfg(not(tarpaulin_include))]
#![cfg(feature = "web")]

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use handlebars::RenderError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::block::Model;
use crate::config::ServerConfig;
use crate::error::GridError;
use crate::events::{Event, EventRecord};
use crate::grid::BlockGrid;
use crate::memory::{BlockGridMemory, MemorySettings};
use crate::render::Renderer;
use crate::saving;

pub struct AppState {
    memory: Mutex<BlockGridMemory>,
    renderer: Renderer,
    snapshot: Option<PathBuf>,
}

impl AppState {
    pub fn new(memory: BlockGridMemory, renderer: Renderer, snapshot: Option<PathBuf>) -> Self {
        AppState {
            memory: Mutex::new(memory),
            renderer,
            snapshot,
        }
    }

    /// Builds the state for `config`, restoring the snapshot if one exists.
    pub fn from_config(config: &ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let grid = match &config.snapshot {
            Some(path) if path.exists() => {
                log::info!("restoring grid from {}", path.display());
                saving::load_grid(path)?
            }
            _ => BlockGrid::new(config.dims()?),
        };
        let settings = MemorySettings {
            policy: config.policy,
        };
        let memory = BlockGridMemory::with_default_listeners(grid, settings);
        Ok(AppState::new(
            memory,
            Renderer::new()?,
            config.snapshot.clone(),
        ))
    }

    fn memory(&self) -> MutexGuard<'_, BlockGridMemory> {
        self.memory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// htmx requests get the grid fragment, everything else the whole page.
    fn respond(&self, grid: &BlockGrid, headers: &HeaderMap) -> Result<Html<String>, AppError> {
        let partial = headers.contains_key("hx-request");
        Ok(Html(self.renderer.render(grid, partial)?))
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Template error: {0}")]
    Render(#[from] RenderError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] std::io::Error),
    #[error("No snapshot path configured")]
    NoSnapshot,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Grid(GridError::NoSuchBlock(_)) | AppError::NoSnapshot => {
                StatusCode::NOT_FOUND
            }
            AppError::Grid(GridError::UnknownComponent(_))
            | AppError::Grid(GridError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            AppError::Grid(GridError::BlockNotEmpty(_)) | AppError::Grid(GridError::BlockEmpty(_)) => {
                StatusCode::CONFLICT
            }
            AppError::Grid(GridError::OutOfBounds { .. })
            | AppError::Grid(GridError::BoxTooLarge { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}

#[derive(Serialize)]
struct SaveResponse {
    status: String,
    message: Option<String>,
}

pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/", get(root_page))
        .route("/blockgrid", get(get_blockgrid))
        .route("/blockgrid/:block_id", delete(delete_component))
        .route("/blockgrid/:block_id/select", get(select_block))
        .route("/blockgrid/:block_id/select/:component", post(add_component))
        .route("/blockgrid/:block_id/component", get(select_component))
        .route("/events", get(get_events))
        .route("/snapshot", post(save_snapshot))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(middleware::from_fn(log_requests))
        .with_state(state);

    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.addr()).await?;
    log::info!(
        "Listening on http://{} ({}x{} grid, {} boundary policy)",
        config.addr(),
        config.columns,
        config.rows,
        config.policy
    );
    axum::serve(listener, app).await?;

    Ok(())
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    log::info!(
        "{} {} -> {} in {:?}",
        method,
        uri,
        response.status(),
        started.elapsed()
    );
    response
}

async fn root_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let mut memory = state.memory();
    memory.emit(Event::PageLoaded)?;
    Ok(Html(state.renderer.render(&memory.grid, false)?))
}

async fn get_blockgrid(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let mut memory = state.memory();
    memory.emit(Event::PageLoaded)?;
    state.respond(&memory.grid, &headers)
}

async fn select_block(
    State(state): State<Arc<AppState>>,
    Path(block_id): Path<usize>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let mut memory = state.memory();
    memory.emit(Event::BlockSelected { block_id })?;
    state.respond(&memory.grid, &headers)
}

async fn add_component(
    State(state): State<Arc<AppState>>,
    Path((block_id, component)): Path<(usize, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let component: Model = component.parse()?;
    let mut memory = state.memory();
    memory.emit(Event::ComponentAdded {
        block_id,
        component,
    })?;
    state.respond(&memory.grid, &headers)
}

async fn select_component(
    State(state): State<Arc<AppState>>,
    Path(block_id): Path<usize>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let mut memory = state.memory();
    memory.emit(Event::ComponentSelected { block_id })?;
    state.respond(&memory.grid, &headers)
}

async fn delete_component(
    State(state): State<Arc<AppState>>,
    Path(block_id): Path<usize>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let mut memory = state.memory();
    memory.emit(Event::ComponentDeleted { block_id })?;
    state.respond(&memory.grid, &headers)
}

async fn get_events(State(state): State<Arc<AppState>>) -> Json<Vec<EventRecord>> {
    Json(state.memory().events().to_vec())
}

async fn save_snapshot(State(state): State<Arc<AppState>>) -> Result<Json<SaveResponse>, AppError> {
    let path = state.snapshot.clone().ok_or(AppError::NoSnapshot)?;
    let grid = state.memory().grid.clone();

    let target = path.clone();
    tokio::task::spawn_blocking(move || saving::save_grid(&grid, target))
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;
    log::info!("grid saved to {}", path.display());

    Ok(Json(SaveResponse {
        status: "ok".to_string(),
        message: Some(path.display().to_string()),
    }))
}
