//! Configuration and credential loading
//!
//! Config comes from `gh-compare-review.toml` in the working directory,
//! then from the user config directory; a missing or unparseable file
//! falls back to defaults (public GitHub). The credential is optional:
//! without one, requests go out unauthenticated.

use gh_compare_client::{DEFAULT_API_BASE, DEFAULT_RAW_BASE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Command;

const CONFIG_FILE: &str = "gh-compare-review.toml";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST API base URL (override for GitHub Enterprise).
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Raw-content base URL (override for GitHub Enterprise).
    #[serde(default = "default_raw_base")]
    pub raw_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_raw_base() -> String {
    DEFAULT_RAW_BASE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            raw_base: default_raw_base(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the config directory, or use defaults.
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("failed to parse {}: {e}", path.display());
                }
            }
        }
        log::debug!("using default config");
        Self::default()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("gh-compare-review").join("config.toml"));
        }
        paths
    }
}

/// Resolve the API credential, if any.
///
/// Tries `GITHUB_TOKEN`, then `GH_TOKEN`, then `gh auth token`. Absence is
/// not an error; the client simply sends unauthenticated requests.
pub fn resolve_token() -> Option<String> {
    if let Ok(token) = std::env::var("GITHUB_TOKEN") {
        log::debug!("using token from GITHUB_TOKEN");
        return Some(token);
    }
    if let Ok(token) = std::env::var("GH_TOKEN") {
        log::debug!("using token from GH_TOKEN");
        return Some(token);
    }

    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;
    if output.status.success() {
        let token = String::from_utf8(output.stdout).ok()?.trim().to_string();
        if !token.is_empty() {
            log::debug!("using token from gh CLI");
            return Some(token);
        }
    }
    None
}
