use std::path::PathBuf;

use const_format::concatcp;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{EmsError, Result};

const DEFAULT_HOST: &str = "http://localhost:8080";
const EMPLOYEES_PATH: &str = "/api/employees";

/// Collection resource used when nothing else is configured.
pub const DEFAULT_API_URL: &str = concatcp!(DEFAULT_HOST, EMPLOYEES_PATH);

pub const API_URL_ENV: &str = "EMS_API_URL";

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Config {
    pub api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| EmsError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| EmsError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "ems")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(EmsError::NoConfigDir)
    }

    /// Resolve the collection URL: explicit flag, then `EMS_API_URL`, then the
    /// config file, then [`DEFAULT_API_URL`].
    pub fn api_url(&self, explicit: Option<&str>) -> Result<Url> {
        let env = std::env::var(API_URL_ENV).ok();
        let raw = pick_api_url(explicit, env.as_deref(), self.api_url.as_deref());
        parse_api_url(raw)
    }
}

fn pick_api_url<'a>(
    explicit: Option<&'a str>,
    env: Option<&'a str>,
    configured: Option<&'a str>,
) -> &'a str {
    [explicit, env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| EmsError::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(EmsError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}
