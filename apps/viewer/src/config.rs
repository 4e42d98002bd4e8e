use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";

/// Read lowest precedence first; the last one set wins.
const API_URL_ENV: &[&str] = &["REACT_APP_API_URL", "API_URL", "APP__API_URL"];
const LOG_FILTER_ENV: &[&str] = &["VIEWER_LOG", "APP__LOG_FILTER"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3001".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then the environment.
///
/// An explicitly named file must exist; the default `viewer.toml` is
/// optional but must parse when present.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let last_set = |keys: &[&str]| {
        keys.iter()
            .filter_map(|key| lookup(key))
            .filter(|v| !v.trim().is_empty())
            .last()
    };

    if let Some(v) = last_set(API_URL_ENV) {
        settings.api_url = v;
    }
    if let Some(v) = last_set(LOG_FILTER_ENV) {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
