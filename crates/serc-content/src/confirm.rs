//! Two-step confirmation for destructive actions.
//!
//! A destructive request returns a [`ConfirmationToken`] describing what will
//! happen; nothing changes until the caller hands the token back. Tokens
//! are single-use.

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::error::{Error, Result};

/// Proof that a specific destructive action was requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfirmationToken {
    id: Uuid,
    prompt: String,
}

impl ConfirmationToken {
    /// The question to put to the user before confirming.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Outstanding requests awaiting an affirmative answer.
#[derive(Debug)]
pub struct ConfirmationGate<A> {
    pending: HashMap<Uuid, A>,
}

impl<A> Default for ConfirmationGate<A> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<A> ConfirmationGate<A> {
    /// Create an empty gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action and return the token that releases it.
    pub fn request(&mut self, action: A, prompt: impl Into<String>) -> ConfirmationToken {
        let id = Uuid::new_v4();
        self.pending.insert(id, action);
        ConfirmationToken {
            id,
            prompt: prompt.into(),
        }
    }

    /// Consume a token and return its action.
    pub fn confirm(&mut self, token: &ConfirmationToken) -> Result<A> {
        self.pending
            .remove(&token.id)
            .ok_or_else(|| Error::UnknownConfirmation(token.to_string()))
    }

    /// Drop a pending request. Returns `false` if the token was not pending.
    pub fn cancel(&mut self, token: &ConfirmationToken) -> bool {
        self.pending.remove(&token.id).is_some()
    }

    /// Drop every pending request.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of outstanding requests.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
