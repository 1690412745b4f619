use crate::models::*;
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Status Probe Trait
// ---------------------------------------------------------------------------

/// Queries the live VPN connection state.
///
/// Implementations never fail: anything that prevents a definite answer is
/// reported as [`ConnectionState::Unknown`].
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn check(&self) -> ConnectionState;
}

// ---------------------------------------------------------------------------
// Notifier Trait
// ---------------------------------------------------------------------------

/// Errors that can occur while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Endpoint rejected message: {0}")]
    Rejected(String),
    #[error("Notifier error: {0}")]
    Other(String),
}

/// What happened to a notification that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Notifier is not configured; no call was made.
    Skipped,
}

/// Best-effort outbound alert channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message. Makes at most one outbound call and never retries.
    async fn notify(&self, message: &str) -> Result<Delivery, NotifyError>;
}

#[async_trait]
impl<'a, T: Notifier + ?Sized> Notifier for &'a T {
    async fn notify(&self, message: &str) -> Result<Delivery, NotifyError> {
        (**self).notify(message).await
    }
}

// ---------------------------------------------------------------------------
// Pointer Trait
// ---------------------------------------------------------------------------

/// Errors raised by the emulated input device.
#[derive(Debug, thiserror::Error)]
pub enum PointerError {
    #[error("Input device unavailable: {0}")]
    Unavailable(String),
    #[error("Pointer move to {target} failed: {reason}")]
    Move { target: ScreenPoint, reason: String },
    #[error("Click at {target} failed: {reason}")]
    Click { target: ScreenPoint, reason: String },
}

/// An emulated pointing device.
///
/// Assumes exclusive use of the device and that the target window already
/// has input focus.
pub trait Pointer {
    /// Move the cursor to an absolute screen position.
    fn move_to(&mut self, target: ScreenPoint) -> Result<(), PointerError>;

    /// Press and release the primary button at `at`, the current position.
    fn click(&mut self, at: ScreenPoint) -> Result<(), PointerError>;
}
