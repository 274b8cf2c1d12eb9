//! Engine configuration loaded from TOML.
//!
//! ```toml
//! fallback = "lenient"          # or "strict" (default)
//! max_resample_attempts = 64
//! default_topic = "fraction_arith"
//!
//! [server]
//! port = 3000
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::drill_engine::error::{EngineError, EngineResult};

/// What the dispatcher does with malformed input (unknown topic, level
/// out of range, unknown variation key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Reject with a typed error.
    #[default]
    Strict,
    /// Log a warning and continue with the default topic / level 1.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { port: 3000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fallback: FallbackPolicy,
    pub max_resample_attempts: u32,
    pub default_topic: String,
    pub server: ServerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fallback: FallbackPolicy::Strict,
            max_resample_attempts: 64,
            default_topic: "fraction_arith".into(),
            server: ServerConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> EngineResult<Self> {
        let cfg: EngineConfig = toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        if cfg.max_resample_attempts == 0 {
            return Err(EngineError::Config("max_resample_attempts must be at least 1".into()));
        }
        Ok(cfg)
    }

    /// Load from the file named by `DRILL_CONFIG_PATH`. A missing variable
    /// gives the defaults; an unreadable or invalid file is logged and also
    /// gives the defaults.
    pub fn load_from_env() -> Self {
        let Ok(path) = std::env::var("DRILL_CONFIG_PATH") else {
            return EngineConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(s) => match EngineConfig::from_toml_str(&s) {
                Ok(cfg) => {
                    info!(target: "question_engine", %path, "Loaded engine config (TOML)");
                    cfg
                }
                Err(e) => {
                    error!(target: "question_engine", %path, error = %e, "Failed to parse TOML config");
                    EngineConfig::default()
                }
            },
            Err(e) => {
                error!(target: "question_engine", %path, error = %e, "Failed to read TOML config file");
                EngineConfig::default()
            }
        }
    }
}
