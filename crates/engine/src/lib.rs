pub mod alert;
pub mod reconnect;

pub use alert::send_alert;
pub use reconnect::{ReconnectError, ReconnectPlan, Reconnector};
