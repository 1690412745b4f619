use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Screen geometry
// ---------------------------------------------------------------------------

/// Absolute pixel position on the primary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Connection state
// ---------------------------------------------------------------------------

/// VPN connection state as reported by a single status query.
///
/// Every value is derived fresh from the live status command; nothing is
/// carried over between checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connected,
    Disconnected,
    /// The status query itself could not be completed.
    Unknown(String),
}

impl ConnectionState {
    /// Only a positive confirmation counts as connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Unknown(reason) => write!(f, "unknown ({})", reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// Terminal state of one reconnection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// VPN went down and came back up.
    Reconnected,
    /// VPN went down but the reconnect could not be confirmed. Alerted, not fatal.
    ReconnectUnverified,
    /// Both disconnect attempts left the VPN up.
    DisconnectFailed,
}

impl RunOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RunOutcome::DisconnectFailed)
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_fatal() {
            1
        } else {
            0
        }
    }
}
