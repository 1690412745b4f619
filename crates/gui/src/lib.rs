//! GUI automation for the VPN client window.
//!
//! Fallback for clients whose CLI cannot be trusted to connect/disconnect,
//! uses input simulation against a fixed window layout.

pub mod pointer;
pub mod sequencer;

pub use pointer::EnigoPointer;
pub use sequencer::{ClickDelays, ClickSequencer, ClickTargets};
