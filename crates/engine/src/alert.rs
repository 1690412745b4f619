use tracing::{debug, error};
use vpnclick_core::{Delivery, Notifier};

/// Fire-and-forget alert: delivery problems are logged and dropped so they
/// can never change how a run ends.
pub async fn send_alert<N: Notifier + ?Sized>(notifier: &N, message: &str) {
    match notifier.notify(message).await {
        Ok(Delivery::Sent) => debug!("Alert sent"),
        Ok(Delivery::Skipped) => {}
        Err(e) => error!("Failed to send alert: {}", e),
    }
}
