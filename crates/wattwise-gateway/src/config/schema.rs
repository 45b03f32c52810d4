use std::net::SocketAddr;

use serde::Deserialize;
use wattwise_core::error::{Result, WattwiseError};
use wattwise_core::SafetyPolicy;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub sessions: SessionsSection,

    #[serde(default)]
    pub analysis: AnalysisSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            sessions: SessionsSection::default(),
            analysis: AnalysisSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WattwiseError::UnsupportedVersion);
        }
        self.gateway.validate()?;
        self.sessions.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            WattwiseError::BadRequest(format!(
                "gateway.listen must be a valid SocketAddr ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionsSection {
    /// Sessions untouched for this long are discarded by the sweeper.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionsSection {
    fn default() -> Self {
        Self {
            idle_timeout_ms: default_idle_timeout_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl SessionsSection {
    pub fn validate(&self) -> Result<()> {
        if !(60_000..=86_400_000).contains(&self.idle_timeout_ms) {
            return Err(WattwiseError::BadRequest(
                "sessions.idle_timeout_ms must be between 60000 and 86400000".into(),
            ));
        }
        if !(1_000..=3_600_000).contains(&self.sweep_interval_ms) {
            return Err(WattwiseError::BadRequest(
                "sessions.sweep_interval_ms must be between 1000 and 3600000".into(),
            ));
        }
        if self.sweep_interval_ms >= self.idle_timeout_ms {
            return Err(WattwiseError::BadRequest(
                "sessions.sweep_interval_ms must be less than idle_timeout_ms".into(),
            ));
        }
        if !(1..=1_000_000).contains(&self.max_sessions) {
            return Err(WattwiseError::BadRequest(
                "sessions.max_sessions must be between 1 and 1000000".into(),
            ));
        }
        Ok(())
    }
}

fn default_idle_timeout_ms() -> u64 {
    1_800_000
}
fn default_sweep_interval_ms() -> u64 {
    60_000
}
fn default_max_sessions() -> usize {
    10_000
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    #[serde(default)]
    pub safety_policy: SafetyPolicy,
}
