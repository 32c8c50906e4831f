//! Content lifecycle state.
//!
//! Provides [`ContentState`] and [`StatusHandle`] so presentation code can
//! render a loading, failed, or ready view without holding the service
//! itself.
//!
//! # Usage
//!
//! ```rust
//! use serc_content::status::{ContentState, StatusHandle};
//!
//! let handle = StatusHandle::new("site-content");
//! assert_eq!(handle.state(), ContentState::Uninitialized);
//!
//! handle.set_state(ContentState::Loading);
//! handle.set_state(ContentState::Ready);
//! assert!(handle.state().is_ready());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::error::{Error, Result};

// ============================================================================
// ContentState
// ============================================================================

/// Where the content service is in its lifecycle.
///
/// `Uninitialized → Loading → Ready`, or `Loading → Failed`. `Failed` is
/// terminal for the life of the service; recovery is a fresh process.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentState {
    /// Nothing has been loaded yet.
    Uninitialized,
    /// Baselines are being fetched.
    Loading,
    /// Effective content is available.
    Ready,
    /// Loading failed; carries the message shown in place of content.
    Failed(String),
}

impl ContentState {
    /// Returns `true` if content can be read.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` if the service can never become ready again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure message, if failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for ContentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// ============================================================================
// StatusHandle
// ============================================================================

/// Thread-safe handle for observing and updating content state.
///
/// Cheap to clone (Arc internals). State changes are broadcast
/// to all subscribers via a watch channel.
#[derive(Clone)]
pub struct StatusHandle {
    inner: Arc<StatusHandleInner>,
}

struct StatusHandleInner {
    name: String,
    tx: watch::Sender<ContentState>,
    created_at: Instant,
}

impl StatusHandle {
    /// Create a handle in [`ContentState::Uninitialized`].
    pub fn new(name: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(ContentState::Uninitialized);
        Self {
            inner: Arc::new(StatusHandleInner {
                name: name.into(),
                tx,
                created_at: Instant::now(),
            }),
        }
    }

    /// Handle name, used in log lines.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current state.
    pub fn state(&self) -> ContentState {
        self.inner.tx.borrow().clone()
    }

    /// Update the state and notify subscribers.
    pub fn set_state(&self, state: ContentState) {
        match &state {
            ContentState::Failed(_) => log::error!("Content '{}' → {state}", self.inner.name),
            _ => log::info!("Content '{}' → {state}", self.inner.name),
        }
        self.inner.tx.send_replace(state);
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ContentState> {
        self.inner.tx.subscribe()
    }

    /// Wait until content is Ready, Failed, or the timeout passes.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let mut rx = self.subscribe();
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        {
            let state = rx.borrow_and_update().clone();
            match state {
                ContentState::Ready => return Ok(()),
                ContentState::Failed(reason) => {
                    return Err(Error::invalid_state("read content", format!("failed: {reason}")));
                }
                _ => {}
            }
        }

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    return Err(Error::Timeout {
                        seconds: timeout.as_secs_f64(),
                        state: self.state().to_string(),
                    });
                }
                result = rx.changed() => {
                    if result.is_err() {
                        return Err(Error::invalid_state("read content", "closed"));
                    }
                    let state = rx.borrow().clone();
                    match state {
                        ContentState::Ready => return Ok(()),
                        ContentState::Failed(reason) => {
                            return Err(Error::invalid_state(
                                "read content",
                                format!("failed: {reason}"),
                            ));
                        }
                        _ => continue,
                    }
                }
            }
        }
    }

    /// Elapsed time since the handle was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.created_at.elapsed()
    }
}

impl fmt::Debug for StatusHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusHandle")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
