use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::app_state::AppState;

/// Remove idle sessions once and record the count.
pub fn sweep_once(app: &AppState, now: Instant) -> usize {
    let idle = Duration::from_millis(app.cfg().sessions.idle_timeout_ms);
    let removed = app.sessions().sweep_idle(now, idle);
    if removed > 0 {
        app.metrics().sessions_swept.add(&[], removed as u64);
        tracing::info!(removed, remaining = app.sessions().len(), "idle sessions swept");
    }
    removed
}

/// Background task sweeping idle sessions every `sessions.sweep_interval_ms`.
pub fn spawn_sweeper(app: AppState) -> JoinHandle<()> {
    let every = Duration::from_millis(app.cfg().sessions.sweep_interval_ms);
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            if app.is_draining() {
                break;
            }
            sweep_once(&app, Instant::now());
        }
    })
}
