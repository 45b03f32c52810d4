use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use wattwise_core::error::{Result, WattwiseError};
use wattwise_core::MetricsEngine;

use crate::context::SessionId;

struct SessionEntry {
    engine: MetricsEngine,
    last_access: Instant,
}

impl SessionEntry {
    fn new(now: Instant) -> Self {
        Self {
            engine: MetricsEngine::new(),
            last_access: now,
        }
    }
}

/// Session registry: `session_id -> (engine, last access)`.
///
/// `live` counts reserved slots and never exceeds `max_sessions`. A slot is
/// taken before a session is inserted and given back when it is removed.
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionEntry>,
    live: AtomicUsize,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            live: AtomicUsize::new(0),
            max_sessions,
        }
    }

    /// Mint a new empty session.
    pub fn create(&self) -> Result<SessionId> {
        self.reserve()?;
        let sid = SessionId::generate();
        if self
            .sessions
            .insert(sid.clone(), SessionEntry::new(Instant::now()))
            .is_some()
        {
            // uuid collision replaced an existing session; it keeps its slot.
            self.release(1);
        }
        Ok(sid)
    }

    /// Run `f` against the session's engine, creating the session on first access.
    ///
    /// The entry stays locked for the duration of `f`; `f` must not touch the
    /// registry again.
    pub fn with_engine<R>(&self, sid: &SessionId, f: impl FnOnce(&mut MetricsEngine) -> R) -> Result<R> {
        let now = Instant::now();
        let mut entry = match self.sessions.entry(sid.clone()) {
            Entry::Occupied(o) => o.into_ref(),
            Entry::Vacant(v) => {
                self.reserve()?;
                tracing::info!(session = %sid, "session created on first access");
                v.insert(SessionEntry::new(now))
            }
        };
        entry.last_access = now;
        Ok(f(&mut entry.engine))
    }

    /// Discard a session. Returns whether it existed.
    pub fn end(&self, sid: &SessionId) -> bool {
        let existed = self.sessions.remove(sid).is_some();
        if existed {
            self.release(1);
        }
        existed
    }

    pub fn contains(&self, sid: &SessionId) -> bool {
        self.sessions.contains_key(sid)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions whose last access is more than `idle` before `now`.
    /// Returns how many were removed.
    pub fn sweep_idle(&self, now: Instant, idle: Duration) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, e| {
            let keep = now.saturating_duration_since(e.last_access) <= idle;
            if !keep {
                removed += 1;
            }
            keep
        });
        self.release(removed);
        removed
    }

    /// Take one session slot, or fail when all `max_sessions` are in use.
    fn reserve(&self) -> Result<()> {
        let max = self.max_sessions;
        self.live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < max).then_some(n + 1))
            .map(|_| ())
            .map_err(|_| {
                tracing::warn!(max, "session limit reached");
                WattwiseError::SessionLimit
            })
    }

    fn release(&self, n: usize) {
        if n > 0 {
            self.live.fetch_sub(n, Ordering::AcqRel);
        }
    }
}
