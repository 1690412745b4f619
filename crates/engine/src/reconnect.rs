use std::time::Duration;
use tracing::{debug, error, info, warn};
use vpnclick_core::*;
use vpnclick_gui::ClickSequencer;

use crate::alert::send_alert;

// Attempt labels are the operator-facing Russian names; alert texts and
// log lines are English.

/// Label of the first disconnect attempt.
pub const FIRST_ATTEMPT: &str = "Попытка 1";
/// Label of the second disconnect attempt.
pub const SECOND_ATTEMPT: &str = "Попытка 2";
/// Label of the reconnect click sequence.
pub const RECONNECT: &str = "Переподключение";

pub const ALERT_FIRST_ATTEMPT_FAILED: &str =
    "Alert: could not disconnect the VPN on the first attempt. Check window focus or click coordinates.";
pub const ALERT_DISCONNECT_FAILED: &str =
    "ALERT: the VPN is still connected after two disconnect attempts. Manual intervention required.";
pub const ALERT_RECONNECT_FAILED: &str = "VPN was not restored after the reconnection attempt.";

/// Errors that abort a run outright.
#[derive(Debug, thiserror::Error)]
pub enum ReconnectError {
    #[error("Click sequence failed")]
    Pointer(#[from] PointerError),
}

/// Fixed waits of the reconnection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPlan {
    /// Pause between a disconnect attempt and its status check.
    pub settle: Duration,
    /// Pause between a confirmed disconnect and the reconnect click.
    pub stabilize: Duration,
}

impl Default for ReconnectPlan {
    fn default() -> Self {
        Self {
            settle: Duration::from_secs(5),
            stabilize: Duration::from_secs(20),
        }
    }
}

/// States of one run. `Failed`, `Success` and `ReconnectFailed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Attempt1,
    VerifiedDown,
    StillUp,
    Attempt2,
    Recovered,
    Failed,
    Reconnecting,
    Success,
    ReconnectFailed,
}

/// Drives the disconnect → verify → retry → reconnect cycle.
///
/// Only failing to disconnect twice is fatal. A reconnect that cannot be
/// confirmed is alerted but ends the run normally, since no further
/// automated step exists for it.
pub struct Reconnector<S, N, P>
where
    S: StatusProbe,
    N: Notifier,
    P: Pointer,
{
    status: S,
    notifier: N,
    clicker: ClickSequencer<P>,
    plan: ReconnectPlan,
}

impl<S, N, P> Reconnector<S, N, P>
where
    S: StatusProbe,
    N: Notifier,
    P: Pointer,
{
    pub fn new(status: S, notifier: N, clicker: ClickSequencer<P>, plan: ReconnectPlan) -> Self {
        Self {
            status,
            notifier,
            clicker,
            plan,
        }
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn clicker(&self) -> &ClickSequencer<P> {
        &self.clicker
    }

    /// Execute one full run. Returns `Err` only for failures outside the
    /// state machine (the input device refusing clicks).
    pub async fn run(&mut self) -> Result<RunOutcome, ReconnectError> {
        let mut phase = Phase::Start;
        let outcome = loop {
            phase = match phase {
                Phase::Start => Phase::Attempt1,
                Phase::Attempt1 => {
                    if self.attempt_disconnect(FIRST_ATTEMPT).await? {
                        Phase::StillUp
                    } else {
                        Phase::VerifiedDown
                    }
                }
                Phase::VerifiedDown => {
                    info!(
                        "VPN disconnected. Waiting {}s before reconnecting...",
                        self.plan.stabilize.as_secs()
                    );
                    tokio::time::sleep(self.plan.stabilize).await;
                    Phase::Reconnecting
                }
                Phase::StillUp => {
                    warn!("VPN still connected after the first attempt");
                    send_alert(&self.notifier, ALERT_FIRST_ATTEMPT_FAILED).await;
                    info!("Starting second attempt...");
                    Phase::Attempt2
                }
                Phase::Attempt2 => {
                    if self.attempt_disconnect(SECOND_ATTEMPT).await? {
                        Phase::Failed
                    } else {
                        Phase::Recovered
                    }
                }
                Phase::Recovered => {
                    info!(
                        "VPN disconnected on the second attempt. Waiting {}s before reconnecting...",
                        self.plan.stabilize.as_secs()
                    );
                    tokio::time::sleep(self.plan.stabilize).await;
                    Phase::Reconnecting
                }
                Phase::Failed => {
                    error!("All disconnect attempts failed");
                    send_alert(&self.notifier, ALERT_DISCONNECT_FAILED).await;
                    break RunOutcome::DisconnectFailed;
                }
                Phase::Reconnecting => {
                    self.clicker.perform(RECONNECT).await?;
                    if self.status.check().await.is_connected() {
                        Phase::Success
                    } else {
                        Phase::ReconnectFailed
                    }
                }
                Phase::Success => {
                    info!("VPN reconnected successfully");
                    break RunOutcome::Reconnected;
                }
                Phase::ReconnectFailed => {
                    error!("Reconnection failed");
                    send_alert(&self.notifier, ALERT_RECONNECT_FAILED).await;
                    break RunOutcome::ReconnectUnverified;
                }
            };
            debug!(?phase, "Reconnect phase");
        };

        Ok(outcome)
    }

    /// Click, settle, check. Returns whether the VPN is still up.
    async fn attempt_disconnect(&mut self, label: &str) -> Result<bool, ReconnectError> {
        self.clicker.perform(label).await?;
        tokio::time::sleep(self.plan.settle).await;
        let state = self.status.check().await;
        debug!(attempt = label, %state, "Disconnect attempt checked");
        Ok(state.is_connected())
    }
}
