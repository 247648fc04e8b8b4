use std::{env, fs, path::PathBuf, time::Duration};

use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::signature::RESOURCE_PATH;

/// Data collector API version pinned into the ingestion URL.
pub const API_VERSION: &str = "2016-04-01";

const DEFAULT_ENDPOINT_HOST: &str = "ods.opinsights.azure.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub workspace_id: String,
    pub shared_key: String,
    pub endpoint_host: String,
    /// Full URL override; set for self-hosted proxies and tests.
    pub ingestion_url: Option<String>,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    workspace_id: String,
    shared_key: String,
    #[serde(default = "default_endpoint_host")]
    endpoint_host: String,
    #[serde(default)]
    ingestion_url: Option<String>,
    #[serde(default = "default_http_timeout_secs")]
    http_timeout_secs: u64,
}

fn default_endpoint_host() -> String {
    DEFAULT_ENDPOINT_HOST.to_string()
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            workspace_id: raw.workspace_id,
            shared_key: raw.shared_key,
            endpoint_host: raw.endpoint_host,
            ingestion_url: raw.ingestion_url,
            http_timeout_secs: raw.http_timeout_secs,
        }
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut cfg = if let Some(path) = path {
            let raw = fs::read_to_string(path)?;
            Config::from(toml::from_str::<RawConfig>(&raw)?)
        } else {
            let default_path = default_config_path();
            if default_path.exists() {
                let raw = fs::read_to_string(&default_path)?;
                Config::from(toml::from_str::<RawConfig>(&raw)?)
            } else {
                Self::default_from_env()?
            }
        };

        if let Ok(v) = env::var("LA_WORKSPACE_ID") {
            cfg.workspace_id = v;
        }
        if let Ok(v) = env::var("LA_SHARED_KEY") {
            cfg.shared_key = v;
        }
        if let Ok(v) = env::var("LA_ENDPOINT_HOST") {
            cfg.endpoint_host = v;
        }
        if let Ok(v) = env::var("LA_INGESTION_URL") {
            cfg.ingestion_url = Some(v);
        }
        maybe_env_u64(&mut cfg.http_timeout_secs, "HTTP_TIMEOUT_SECS");
        validate_required(&cfg)?;
        Ok(cfg)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Fully qualified ingestion URL; the override takes precedence over
    /// the workspace-derived Azure host.
    pub fn ingestion_url(&self) -> String {
        if let Some(url) = &self.ingestion_url {
            return url.clone();
        }
        format!(
            "https://{}.{}{}?api-version={}",
            self.workspace_id, self.endpoint_host, RESOURCE_PATH, API_VERSION
        )
    }
}

impl Config {
    fn default_from_env() -> Result<Self> {
        Ok(Self {
            workspace_id: env_required("LA_WORKSPACE_ID")?,
            shared_key: env_required("LA_SHARED_KEY")?,
            endpoint_host: env::var("LA_ENDPOINT_HOST")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT_HOST.into()),
            ingestion_url: env::var("LA_INGESTION_URL").ok(),
            http_timeout_secs: env_u64("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }
}

fn default_config_path() -> PathBuf {
    ProjectDirs::from("com", "logship", "logship")
        .map(|p| p.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".logship/config.toml"))
}

fn validate_required(cfg: &Config) -> Result<()> {
    if cfg.workspace_id.trim().is_empty() {
        anyhow::bail!("LA_WORKSPACE_ID is required (set via env or config)");
    }
    if cfg.shared_key.trim().is_empty() {
        anyhow::bail!("LA_SHARED_KEY is required (set via env or config)");
    }
    if cfg.endpoint_host.trim().is_empty() && cfg.ingestion_url.is_none() {
        anyhow::bail!("LA_ENDPOINT_HOST is required when no ingestion URL is set");
    }
    Ok(())
}

fn maybe_env_u64(val: &mut u64, key: &str) {
    if let Ok(v) = env::var(key) {
        if let Ok(n) = v.parse::<u64>() {
            *val = n;
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_required(key: &str) -> Result<String> {
    let val = env::var(key).unwrap_or_default();
    if val.trim().is_empty() {
        anyhow::bail!("{key} is required");
    }
    Ok(val)
}
