use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::{Movie, MovieId, NewMovie};
use storage::MovieStore;

/// Store whose every call fails, standing in for a broken database.
pub(crate) struct BrokenStore;

#[async_trait]
impl MovieStore for BrokenStore {
    async fn add_movie(&self, _movie: &NewMovie) -> Result<Movie> {
        Err(anyhow!("disk I/O error"))
    }

    async fn list_movies(&self) -> Result<Vec<Movie>> {
        Err(anyhow!("disk I/O error"))
    }

    async fn delete_movie(&self, _movie_id: MovieId) -> Result<bool> {
        Err(anyhow!("disk I/O error"))
    }

    async fn health_check(&self) -> Result<()> {
        Err(anyhow!("disk I/O error"))
    }
}
