use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{delete, get},
    Form, Json, Router,
};
use serde::Deserialize;
use shared::{
    domain::MovieId,
    error::{ApiError, ErrorCode},
};
use storage::{normalize_database_url, Storage};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeFile, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod render;

use api::ApiContext;
use app_state::AppState;
use config::load_settings;

/// Missing fields deserialize as empty strings so they fail validation
/// with the same 400 as blank ones.
#[derive(Debug, Deserialize)]
struct MovieForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    director: String,
}

type HttpError = (StatusCode, Json<ApiError>);

const MAX_FORM_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            error = ?error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    if !settings.styles_path.is_file() {
        warn!(
            path = %settings.styles_path.display(),
            "stylesheet not found; /styles.css will answer 404"
        );
    }

    let state = AppState {
        api: ApiContext::new(storage),
        styles_path: settings.styles_path,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "favorite movies server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

fn build_router(state: Arc<AppState>) -> Router {
    let styles = ServeFile::new(&state.styles_path);
    Router::new()
        .route("/", get(index))
        .route("/movies", get(http_list_movies).post(http_create_movie))
        .route("/movies/:id", delete(http_delete_movie))
        .route_service("/styles.css", styles)
        .route("/healthz", get(healthz))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn reject(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

async fn index() -> Html<String> {
    Html(render::index_page())
}

async fn healthz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match api::health(&state.api).await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
    }
}

async fn http_list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, HttpError> {
    let movies = api::list_movies(&state.api).await.map_err(reject)?;
    Ok(Html(render::movie_list(&movies)))
}

async fn http_create_movie(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MovieForm>,
) -> Result<Html<String>, HttpError> {
    let movie = api::create_movie(&state.api, &form.title, &form.director)
        .await
        .map_err(reject)?;
    Ok(Html(render::movie_item(&movie)))
}

/// Answers 200 with an empty body: htmx does not swap on 204, and the empty
/// swap is what removes the `<li>`.
async fn http_delete_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    api::delete_movie(&state.api, MovieId(movie_id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
