//! Domain types and component seams shared by the vpnclick crates.

pub mod models;
pub mod traits;

pub use models::*;
pub use traits::*;
