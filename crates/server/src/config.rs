use std::{fs, path::PathBuf};

use serde::Deserialize;
use storage::DEFAULT_DATABASE_URL;
use tracing::warn;

pub const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub database_url: String,
    pub styles_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            database_url: DEFAULT_DATABASE_URL.into(),
            styles_path: PathBuf::from("assets/styles.css"),
        }
    }
}

/// Keys accepted in `server.toml`. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    database_url: Option<String>,
    styles_path: Option<String>,
}

/// Defaults, then `server.toml`, then the environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(error) => warn!(%error, file = CONFIG_FILE, "ignoring unreadable config file"),
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.database_url {
        settings.database_url = v;
    }
    if let Some(v) = file_cfg.styles_path {
        settings.styles_path = PathBuf::from(v);
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("PORT") {
        match replace_port(&settings.server_bind, &v) {
            Some(bind) => settings.server_bind = bind,
            None => warn!(port = %v, "ignoring invalid PORT"),
        }
    }

    if let Some(v) = lookup("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = lookup("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = lookup("STYLES_PATH") {
        settings.styles_path = PathBuf::from(v);
    }
    if let Some(v) = lookup("APP__STYLES_PATH") {
        settings.styles_path = PathBuf::from(v);
    }
}

fn replace_port(bind: &str, port: &str) -> Option<String> {
    let port: u16 = port.trim().parse().ok()?;
    let host = bind.rsplit_once(':').map_or(bind, |(host, _)| host);
    Some(format!("{host}:{port}"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
