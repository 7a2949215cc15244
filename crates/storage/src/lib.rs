use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use shared::domain::{Movie, MovieId, NewMovie};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/movies.db";

/// Persistence boundary for the movie collection.
///
/// Routes only see this trait; `Storage` is the SQLite-backed implementation.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn add_movie(&self, movie: &NewMovie) -> Result<Movie>;
    async fn list_movies(&self) -> Result<Vec<Movie>>;
    /// Returns whether a row was removed. Missing ids are not an error.
    async fn delete_movie(&self, movie_id: MovieId) -> Result<bool>;
    async fn health_check(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run movie migrations")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn add_movie(&self, movie: &NewMovie) -> Result<Movie> {
        let rec = sqlx::query(
            "INSERT INTO movies (title, director) VALUES (?, ?) RETURNING id, title, director",
        )
        .bind(&movie.title)
        .bind(&movie.director)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert movie")?;
        Ok(movie_from_row(&rec))
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        let rows = sqlx::query("SELECT id, title, director FROM movies ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .context("failed to list movies")?;
        Ok(rows.iter().map(movie_from_row).collect())
    }

    pub async fn load_movie(&self, movie_id: MovieId) -> Result<Option<Movie>> {
        let row = sqlx::query("SELECT id, title, director FROM movies WHERE id = ?")
            .bind(movie_id.0)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load movie")?;
        Ok(row.as_ref().map(movie_from_row))
    }

    pub async fn delete_movie(&self, movie_id: MovieId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(movie_id.0)
            .execute(&self.pool)
            .await
            .context("failed to delete movie")?;
        let removed = result.rows_affected() > 0;
        if !removed {
            debug!(%movie_id, "delete requested for unknown movie");
        }
        Ok(removed)
    }
}

#[async_trait]
impl MovieStore for Storage {
    async fn add_movie(&self, movie: &NewMovie) -> Result<Movie> {
        Storage::add_movie(self, movie).await
    }

    async fn list_movies(&self) -> Result<Vec<Movie>> {
        Storage::list_movies(self).await
    }

    async fn delete_movie(&self, movie_id: MovieId) -> Result<bool> {
        Storage::delete_movie(self, movie_id).await
    }

    async fn health_check(&self) -> Result<()> {
        Storage::health_check(self).await
    }
}

/// Turns a plain path or single-colon `sqlite:` path into a `sqlite://` url.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return DEFAULT_DATABASE_URL.to_string();
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

fn movie_from_row(row: &SqliteRow) -> Movie {
    Movie {
        id: MovieId(row.get::<i64, _>("id")),
        title: row.get::<String, _>("title"),
        director: row.get::<String, _>("director"),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
