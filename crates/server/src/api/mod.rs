use std::sync::Arc;

use shared::{
    domain::{Movie, MovieId, NewMovie},
    error::ApiError,
};
use storage::MovieStore;
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn MovieStore>,
}

impl ApiContext {
    pub fn new(store: impl MovieStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub async fn list_movies(ctx: &ApiContext) -> Result<Vec<Movie>, ApiError> {
    ctx.store.list_movies().await.map_err(internal)
}

pub async fn create_movie(
    ctx: &ApiContext,
    title: &str,
    director: &str,
) -> Result<Movie, ApiError> {
    let new_movie = NewMovie::parse(title, director)?;
    let movie = ctx.store.add_movie(&new_movie).await.map_err(internal)?;
    info!(movie_id = %movie.id, title = %movie.title, "movie created");
    Ok(movie)
}

/// Unknown ids succeed without touching the store.
pub async fn delete_movie(ctx: &ApiContext, movie_id: MovieId) -> Result<(), ApiError> {
    let removed = ctx.store.delete_movie(movie_id).await.map_err(internal)?;
    info!(%movie_id, removed, "movie delete handled");
    Ok(())
}

pub async fn health(ctx: &ApiContext) -> Result<(), ApiError> {
    ctx.store.health_check().await.map_err(internal)
}

fn internal(err: anyhow::Error) -> ApiError {
    error!(error = ?err, "movie store failure");
    ApiError::internal(err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
