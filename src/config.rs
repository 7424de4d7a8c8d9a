//! Optional TOML configuration for bio
//!
//! Every field is optional; CLI flags override whatever the file sets.

use crate::cmd::bio_tui::state::Route;
use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PREFIX_TIMEOUT_MS: u64 = 1500;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prefix_timeout_ms: Option<u64>,
    pub start_route: Option<String>,
    pub links: Vec<LinkSeed>,
    pub blogs: Vec<BlogSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkSeed {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub clicks: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogSeed {
    pub title: String,
    /// Post body as markdown source
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub published: bool,
}

impl Config {
    /// Load the config file at `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&raw).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn prefix_timeout(&self) -> Duration {
        Duration::from_millis(self.prefix_timeout_ms.unwrap_or(DEFAULT_PREFIX_TIMEOUT_MS))
    }

    pub fn start_route(&self) -> Result<Route> {
        match self.start_route.as_deref() {
            Some(path) => path.parse(),
            None => Ok(Route::Home),
        }
    }
}
