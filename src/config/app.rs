// src/config/app.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::artifacts::ArtifactPaths;

pub const DEFAULT_CONFIG_PATH: &str = "config/factlyzer.toml";

pub const ENV_CONFIG_PATH: &str = "FACTLYZER_CONFIG_PATH";
pub const ENV_VECTORIZER_PATH: &str = "FACTLYZER_VECTORIZER_PATH";
pub const ENV_MODEL_PATH: &str = "FACTLYZER_MODEL_PATH";

fn default_max_text_bytes() -> usize {
    1024 * 1024
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Requests with longer article text are rejected with 413.
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_text_bytes: default_max_text_bytes(),
        }
    }
}

/// Application config (TOML). Trust thresholds are deliberately not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let mut cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Resolve config using env var + fallbacks:
    /// 1) $FACTLYZER_CONFIG_PATH (must exist)
    /// 2) config/factlyzer.toml
    /// 3) built-in defaults
    ///
    /// Artifact paths can then be overridden one by one via env.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        if let Some(p) = non_empty_env(ENV_VECTORIZER_PATH) {
            cfg.artifacts.vectorizer = PathBuf::from(p);
        }
        if let Some(p) = non_empty_env(ENV_MODEL_PATH) {
            cfg.artifacts.model = PathBuf::from(p);
        }
        Ok(cfg)
    }

    fn sanitize(&mut self) {
        if self.server.max_text_bytes == 0 {
            self.server.max_text_bytes = default_max_text_bytes();
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
