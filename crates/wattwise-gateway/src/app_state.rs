//! Shared application state for the Wattwise gateway.
//!
//! Holds the validated config, the session registry and the metrics registry
//! behind one `Arc` so handlers clone it cheaply.

use std::sync::Arc;

use wattwise_core::SafetyPolicy;

use crate::config::GatewayConfig;
use crate::obs::GatewayMetrics;
use crate::session::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    sessions: SessionRegistry,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Build application state from an already validated config.
    pub fn new(cfg: GatewayConfig) -> Self {
        let sessions = SessionRegistry::new(cfg.sessions.max_sessions);
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                sessions,
                metrics: GatewayMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn safety_policy(&self) -> SafetyPolicy {
        self.inner.cfg.analysis.safety_policy
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.inner.sessions
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Gauge lines rendered alongside the registry on `/metrics`.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![("wattwise_sessions_active", self.inner.sessions.len() as u64)]
    }
}
