//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use wattwise_core::error::{Result, WattwiseError};

pub use schema::{AnalysisSection, GatewayConfig, GatewaySection, SessionsSection};

/// Default config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "wattwise.yaml";

/// Env var overriding the config path.
pub const CONFIG_PATH_ENV: &str = "WATTWISE_CONFIG";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| WattwiseError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| WattwiseError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config: explicit path, then `WATTWISE_CONFIG`, then
/// `wattwise.yaml`. Only a missing default file falls back to built-in defaults.
pub fn load(explicit: Option<String>) -> Result<GatewayConfig> {
    resolve(explicit, std::env::var(CONFIG_PATH_ENV).ok(), DEFAULT_CONFIG_PATH)
}

/// Same order as [`load`] with the env value and default path passed in.
pub fn resolve(
    explicit: Option<String>,
    env: Option<String>,
    default_path: &str,
) -> Result<GatewayConfig> {
    if let Some(path) = explicit.or(env) {
        return load_from_file(&path);
    }
    match fs::read_to_string(default_path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = default_path, "config file not found, using defaults");
            Ok(GatewayConfig::default())
        }
        Err(e) => Err(WattwiseError::Internal(format!(
            "read config failed ({default_path}): {e}"
        ))),
    }
}
