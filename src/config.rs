//! Runtime configuration for a catalog session.
//!
//! Settings come from an optional RON file and are then overridden by
//! `POKEMON_CATALOG_*` environment variables.

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_CATALOG_LIMIT: usize = 151;
pub const DEFAULT_BATCH_SIZE: usize = 20;

pub const ENV_API_URL: &str = "POKEMON_CATALOG_API_URL";
pub const ENV_LIMIT: &str = "POKEMON_CATALOG_LIMIT";
pub const ENV_BATCH_SIZE: &str = "POKEMON_CATALOG_BATCH_SIZE";

/// What happens when a filter pass settles after a newer pass was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StalePassPolicy {
    /// Every pass publishes when it settles, so the slowest pass wins.
    #[default]
    LastSettledWins,
    /// Passes superseded by a newer `apply` call discard their result.
    LastInvokedWins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub api_base_url: String,
    /// Number of catalog entries requested at start-up.
    pub catalog_limit: usize,
    pub batch_size: usize,
    pub user_agent: String,
    /// No timeout unless configured; a stalled request stalls its pass.
    pub request_timeout_secs: Option<u64>,
    pub stale_pass_policy: StalePassPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            user_agent: format!("pokemon-catalog/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: None,
            stale_pass_policy: StalePassPolicy::default(),
        }
    }
}

impl CatalogConfig {
    /// Loads the file at `path` (if given), then applies environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(limit) = lookup(ENV_LIMIT) {
            self.catalog_limit = parse_count(ENV_LIMIT, &limit)?;
        }
        if let Some(size) = lookup(ENV_BATCH_SIZE) {
            self.batch_size = parse_count(ENV_BATCH_SIZE, &size)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.catalog_limit == 0 {
            return Err(ConfigError::Invalid("catalog_limit must be at least 1".into()));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready for path joining.
    pub fn api_root(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

fn parse_count(key: &str, raw: &str) -> ConfigResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} must be a positive integer, got '{}'", key, raw)))
}
