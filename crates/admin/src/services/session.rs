//! Admin session gate.
//!
//! The dashboard has a single staff session at a time, persisted as one JSON
//! record so a restart does not log the admin out. The gate owns that record
//! plus an in-process activity marker and is shared through [`crate::state::AppState`].
//!
//! Two checks exist with deliberately different inputs:
//!
//! - [`SessionGate::is_authenticated`] runs per request and judges inactivity
//!   from the live activity marker.
//! - [`SessionGate::revalidate`] runs on the periodic sweep and judges
//!   inactivity from the persisted login timestamp only. Past the inactivity
//!   window the sweep expires a session that recent requests would have kept
//!   alive.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use thiserror::Error;

use creperie_core::{AdminSession, SESSION_STORAGE_KEY};

use crate::api::ApiError;

/// Time source, swappable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Errors reading or writing the persisted session record.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Failed to read session record {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write session record {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Checks a submitted passcode against whoever holds the real one.
pub trait PasscodeVerifier: Send + Sync {
    /// True when the passcode is correct.
    fn verify(
        &self,
        passcode: &SecretString,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;
}

impl PasscodeVerifier for crate::api::AdminApiClient {
    async fn verify(&self, passcode: &SecretString) -> Result<bool, ApiError> {
        self.verify_passcode(passcode).await
    }
}

/// Why authentication did not open a session.
#[derive(Debug, Error)]
pub enum AuthenticateError {
    /// The verifier could not be reached or failed.
    #[error(transparent)]
    Store(#[from] ApiError),

    /// The accepted session could not be persisted.
    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Storage for the single admin session record.
pub trait SessionStore: Send + Sync {
    /// Load the current session, if one is stored. A corrupt record is
    /// cleared and reported as absent.
    fn load(&self) -> Result<Option<AdminSession>, SessionStoreError>;

    /// Persist the session, replacing any previous record.
    fn save(&self, session: &AdminSession) -> Result<(), SessionStoreError>;

    /// Remove the stored session.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Session record persisted as a JSON file on disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes file access across handlers.
    lock: Mutex<()>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<AdminSession>, SessionStoreError> {
        let _guard = self.lock.lock();
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionStoreError::Read {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt session record");
                let _ = std::fs::remove_file(&self.path);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &AdminSession) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock();
        let json = serde_json::to_string(session).map_err(|e| SessionStoreError::Write {
            path: self.path.display().to_string(),
            source: std::io::Error::other(e),
        })?;
        std::fs::write(&self.path, json).map_err(|source| SessionStoreError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionStoreError::Write {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}

/// In-memory store keyed like browser local storage, for tests.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slots: Mutex<HashMap<String, AdminSession>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<AdminSession>, SessionStoreError> {
        Ok(self
            .slots
            .lock()
            .map(|slots| slots.get(SESSION_STORAGE_KEY).copied())
            .unwrap_or(None))
    }

    fn save(&self, session: &AdminSession) -> Result<(), SessionStoreError> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(SESSION_STORAGE_KEY.to_string(), *session);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.remove(SESSION_STORAGE_KEY);
        }
        Ok(())
    }
}

/// Owns the admin session lifecycle: login, per-request checks, the periodic
/// sweep and logout.
pub struct SessionGate<S, C> {
    store: S,
    clock: C,
    last_activity: Mutex<Option<DateTime<Utc>>>,
}

impl<S: SessionStore, C: Clock> SessionGate<S, C> {
    #[must_use]
    pub const fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            last_activity: Mutex::new(None),
        }
    }

    /// Check a passcode and, when accepted, open a fresh session.
    ///
    /// A refused passcode persists nothing and leaves any existing session
    /// alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the verifier fails or the accepted session cannot
    /// be persisted.
    pub async fn authenticate<V: PasscodeVerifier>(
        &self,
        verifier: &V,
        passcode: &SecretString,
    ) -> Result<bool, AuthenticateError> {
        if !verifier.verify(passcode).await? {
            return Ok(false);
        }
        self.begin()?;
        Ok(true)
    }

    /// Start a fresh session after a successful passcode check.
    ///
    /// # Errors
    ///
    /// Returns an error if the session record cannot be persisted.
    pub fn begin(&self) -> Result<(), SessionStoreError> {
        let now = self.clock.now();
        self.store.save(&AdminSession::begin(now))?;
        self.set_marker(Some(now));
        Ok(())
    }

    /// Record admin activity, pushing back the inactivity cutoff for
    /// per-request checks.
    pub fn touch(&self) {
        self.set_marker(Some(self.clock.now()));
    }

    /// Per-request check: valid session within its absolute lifetime and the
    /// inactivity window measured from the live activity marker. An invalid
    /// session is cleared.
    pub fn is_authenticated(&self) -> bool {
        let now = self.clock.now();
        let Ok(Some(session)) = self.store.load() else {
            return false;
        };

        let activity = self.marker().unwrap_or(session.timestamp);
        if session.is_valid_with_activity(now, activity) {
            return true;
        }

        self.expire("inactive or past expiry");
        false
    }

    /// Periodic sweep: judges inactivity from the persisted login timestamp,
    /// ignoring the activity marker. An invalid session is cleared.
    pub fn revalidate(&self) -> bool {
        let now = self.clock.now();
        let Ok(Some(session)) = self.store.load() else {
            return false;
        };

        if session.is_valid(now) {
            return true;
        }

        self.expire("periodic sweep");
        false
    }

    /// Drop the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record cannot be removed.
    pub fn logout(&self) -> Result<(), SessionStoreError> {
        self.store.clear()?;
        self.set_marker(None);
        Ok(())
    }

    fn expire(&self, reason: &str) {
        tracing::info!(reason, "Admin session expired");
        let _ = self.store.clear();
        self.set_marker(None);
    }

    fn marker(&self) -> Option<DateTime<Utc>> {
        self.last_activity.lock().map(|g| *g).unwrap_or(None)
    }

    fn set_marker(&self, value: Option<DateTime<Utc>>) {
        if let Ok(mut guard) = self.last_activity.lock() {
            *guard = value;
        }
    }
}
