//! # Agentic Chat Core
//!
//! Domain types and error definitions shared by every Agentic Chat crate.
//! This crate has **zero framework dependencies**: it only describes the
//! messages that flow into the responder and the ways things can go wrong.
//!
//! ## Design Philosophy
//!
//! The responder is a pure function of a conversation history. Everything
//! that crosses a crate boundary (the HTTP gateway, the CLI) speaks in the
//! types defined here, so the engine can be tested without either surface.

pub mod error;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use error::{Error, InputError, Result};
pub use message::{ChatMessage, Role, Transcript};
