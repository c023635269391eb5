use std::{fs, path::Path};

use anyhow::{bail, Context};
use event_sync::DEFAULT_PAGE_LIMIT;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "eventscroll.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub page_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000/api".into(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    page_limit: Option<u32>,
}

/// Defaults, then `path` if it exists, then the environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    layer_settings(raw.as_deref(), |key| std::env::var(key).ok())
        .with_context(|| format!("invalid settings from '{}'", path.display()))
}

fn layer_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings = toml::from_str(raw).context("malformed settings file")?;
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.page_limit {
            settings.page_limit = v;
        }
    }

    if let Some(v) = env("EVENTSCROLL_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__PAGE_LIMIT") {
        settings.page_limit = v
            .parse()
            .with_context(|| format!("APP__PAGE_LIMIT '{v}' is not a number"))?;
    }

    Ok(settings)
}

/// Checks that `raw` is an absolute http(s) URL and returns it normalized.
pub fn validate_server_url(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("server url '{raw}' must use http or https");
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
