use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, NaiveDateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::services::wizard::BookingWizard;

/// Sessions untouched for longer than this are discarded.
pub const SESSION_IDLE_MINUTES: i64 = 30;

pub type SessionMap = HashMap<Uuid, WizardSession>;

/// An open booking flow and who it is for.
pub struct WizardSession {
    pub wizard: BookingWizard,
    pub customer_name: Option<String>,
    pub last_touched: NaiveDateTime,
}

impl WizardSession {
    pub fn new(wizard: BookingWizard, customer_name: Option<String>) -> Self {
        Self {
            wizard,
            customer_name,
            last_touched: Utc::now().naive_utc(),
        }
    }

    pub fn touch(&mut self, now: NaiveDateTime) {
        self.last_touched = now;
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now - self.last_touched > Duration::minutes(SESSION_IDLE_MINUTES)
    }
}

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub sessions: Mutex<SessionMap>,
}

impl AppState {
    pub fn new(conn: Connection, config: AppConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn db(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    pub fn sessions(&self) -> anyhow::Result<MutexGuard<'_, SessionMap>> {
        self.sessions
            .lock()
            .map_err(|_| anyhow::anyhow!("session lock poisoned"))
    }

    /// Session map with idle sessions already dropped.
    pub fn live_sessions(&self) -> anyhow::Result<MutexGuard<'_, SessionMap>> {
        let mut sessions = self.sessions()?;
        prune_expired(&mut sessions, Utc::now().naive_utc());
        Ok(sessions)
    }
}

/// Drops idle sessions and returns how many were removed.
pub fn prune_expired(sessions: &mut SessionMap, now: NaiveDateTime) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_expired(now));
    let removed = before - sessions.len();
    if removed > 0 {
        tracing::info!(removed, "expired booking sessions discarded");
    }
    removed
}
