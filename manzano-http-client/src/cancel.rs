//! Cancellation tokens.

use std::fmt;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

use crate::CancelError;

/// Reason recorded when [`Cancel::cancel`] is called without one.
pub const DEFAULT_CANCEL_REASON: &str = "canceled";

/// Token attached to a request so that it can be cancelled.
///
/// Clones share state: cancelling through the paired [`Cancel`] is observed
/// by every clone.
#[derive(Clone, Default)]
pub struct CancelToken {
    signal: CancellationToken,
    reason: Arc<OnceLock<String>>,
}

impl CancelToken {
    /// Create a fresh token together with the function that cancels it.
    pub fn source() -> (CancelToken, Cancel) {
        let token = CancelToken::default();
        let cancel = Cancel {
            token: token.clone(),
        };
        (token, cancel)
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// The reason given by the first cancellation, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.get().map(String::as_str)
    }

    /// Wait until cancellation is requested.
    pub async fn cancelled(&self) {
        self.signal.cancelled().await
    }

    /// Fail with [`CancelError`] if cancellation was already requested.
    pub fn throw_if_requested(&self) -> Result<(), CancelError> {
        match self.reason() {
            Some(reason) if self.is_cancelled() => Err(CancelError::new(reason)),
            _ => Ok(()),
        }
    }
}

impl PartialEq for CancelToken {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.reason, &other.reason)
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .field("reason", &self.reason())
            .finish()
    }
}

/// Cancel function paired with a [`CancelToken`].
///
/// Only the first call has an effect; later calls keep the original reason.
#[derive(Clone, Debug)]
pub struct Cancel {
    token: CancelToken,
}

impl Cancel {
    /// Cancel with [`DEFAULT_CANCEL_REASON`].
    pub fn cancel(&self) {
        self.cancel_with_reason(DEFAULT_CANCEL_REASON);
    }

    /// Cancel with a custom reason.
    pub fn cancel_with_reason(&self, reason: impl Into<String>) {
        // The reason is published before the signal fires so observers never
        // see a cancelled token without one.
        if self.token.reason.set(reason.into()).is_ok() {
            self.token.signal.cancel();
        }
    }

    /// The token this function cancels.
    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}
