//! Session-scoped admin gate.
//!
//! This is a convenience switch that decides whether admin controls are
//! offered, not a security boundary: the passphrase is a fixed value that
//! ships with every client. Anything that needs real protection must not
//! rely on it.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::kv::KeyValueStore;

/// Passphrase used when none is configured.
pub const DEFAULT_ADMIN_PASSPHRASE: &str = "serc-admin";

/// Session key holding the authorized flag.
pub const SESSION_FLAG_KEY: &str = "isAdminAuthenticated";

/// Gate for mutating operations, backed by a session store.
#[derive(Clone)]
pub struct AdminGate {
    session: Arc<dyn KeyValueStore>,
    passphrase: String,
}

impl AdminGate {
    /// Create a gate using [`DEFAULT_ADMIN_PASSPHRASE`].
    pub fn new(session: Arc<dyn KeyValueStore>) -> Self {
        Self::with_passphrase(session, DEFAULT_ADMIN_PASSPHRASE)
    }

    /// Create a gate with a custom passphrase.
    pub fn with_passphrase(session: Arc<dyn KeyValueStore>, passphrase: impl Into<String>) -> Self {
        Self {
            session,
            passphrase: passphrase.into(),
        }
    }

    /// Mark the session authorized if `attempt` matches.
    pub fn login(&self, attempt: &str) -> Result<()> {
        if attempt != self.passphrase {
            log::warn!("Admin login rejected");
            return Err(Error::Unauthorized("Incorrect password".to_string()));
        }
        self.session.set(SESSION_FLAG_KEY, "true")?;
        log::info!("Admin session authorized");
        Ok(())
    }

    /// Clear the session flag.
    pub fn logout(&self) -> Result<()> {
        self.session.remove(SESSION_FLAG_KEY)
    }

    /// Whether this session may use admin controls.
    pub fn is_authorized(&self) -> bool {
        matches!(self.session.get(SESSION_FLAG_KEY), Ok(Some(flag)) if flag == "true")
    }

    /// Fail unless the session is authorized.
    pub fn require(&self) -> Result<()> {
        if self.is_authorized() {
            Ok(())
        } else {
            Err(Error::Unauthorized(
                "admin login required for this operation".to_string(),
            ))
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("authorized", &self.is_authorized())
            .finish_non_exhaustive()
    }
}
