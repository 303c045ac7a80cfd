//! Core types for the bridge.

pub mod message;

pub use message::*;
