use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::domain::{MovieId, NewMovie};
use storage::{normalize_database_url, Storage, DEFAULT_DATABASE_URL};

#[derive(Parser, Debug)]
struct Cli {
    /// `sqlite://` url or a plain file path; missing parent directories are created.
    #[arg(long, default_value = DEFAULT_DATABASE_URL)]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    Add { title: String, director: String },
    List,
    Show { movie_id: i64 },
    Delete { movie_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    for line in run(cli).await? {
        println!("{line}");
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<Vec<String>> {
    let storage = Storage::new(&normalize_database_url(&cli.database_url)).await?;

    let lines = match cli.command {
        Command::Add { title, director } => {
            let new_movie = NewMovie::parse(&title, &director)?;
            let movie = storage.add_movie(&new_movie).await?;
            vec![format!("created movie_id={}", movie.id)]
        }
        Command::List => storage
            .list_movies()
            .await?
            .into_iter()
            .map(|movie| format!("{}\t{}\t{}", movie.id, movie.title, movie.director))
            .collect(),
        Command::Show { movie_id } => match storage.load_movie(MovieId(movie_id)).await? {
            Some(movie) => vec![
                format!("movie_id={}", movie.id),
                format!("title={}", movie.title),
                format!("director={}", movie.director),
            ],
            None => vec![format!("no movie with movie_id={movie_id}")],
        },
        Command::Delete { movie_id } => {
            let movie_id = MovieId(movie_id);
            if storage.delete_movie(movie_id).await? {
                vec![format!("deleted movie_id={movie_id}")]
            } else {
                vec![format!("no movie with movie_id={movie_id}")]
            }
        }
    };
    storage.pool().close().await;

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("movies_admin").chain(args.iter().copied()))
            .expect("parse")
    }

    #[test]
    fn parses_add_with_default_database() {
        let cli = cli(&["add", "Inception", "Christopher Nolan"]);
        assert_eq!(cli.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(
            cli.command,
            Command::Add {
                title: "Inception".into(),
                director: "Christopher Nolan".into(),
            }
        );
    }

    #[test]
    fn delete_requires_integer_id() {
        assert!(Cli::try_parse_from(["movies_admin", "delete", "one"]).is_err());
        let cli = cli(&["--database-url", "sqlite::memory:", "delete", "3"]);
        assert_eq!(cli.command, Command::Delete { movie_id: 3 });
    }

    #[tokio::test]
    async fn plain_path_in_missing_directory_is_usable() {
        let temp_root = tempfile::tempdir().expect("tempdir");
        let db_path = temp_root.path().join("data2").join("movies.db");
        let db = db_path.to_string_lossy().to_string();

        let created = run(cli(&["--database-url", &db, "add", "Heat", "Mann"]))
            .await
            .expect("add");
        assert_eq!(created, vec!["created movie_id=1".to_string()]);
        assert!(db_path.exists());

        let listed = run(cli(&["--database-url", &db, "list"])).await.expect("list");
        assert_eq!(listed, vec!["1\tHeat\tMann".to_string()]);
    }

    #[tokio::test]
    async fn show_uses_stored_record() {
        let temp_root = tempfile::tempdir().expect("tempdir");
        let db = temp_root.path().join("movies.db").to_string_lossy().to_string();

        run(cli(&["--database-url", &db, "add", " Alien ", "Scott"]))
            .await
            .expect("add");

        let shown = run(cli(&["--database-url", &db, "show", "1"])).await.expect("show");
        assert_eq!(shown, vec!["movie_id=1", "title=Alien", "director=Scott"]);

        let missing = run(cli(&["--database-url", &db, "show", "9"])).await.expect("show");
        assert_eq!(missing, vec!["no movie with movie_id=9"]);
    }

    #[tokio::test]
    async fn add_rejects_blank_director() {
        let err = run(cli(&["--database-url", "sqlite::memory:", "add", "Alien", " "]))
            .await
            .expect_err("blank director");
        assert!(err.to_string().contains("director is required"));
    }
}
