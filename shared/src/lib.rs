//! Shared types for the startup intelligence pipeline
//!
//! Contains the data that crosses crate boundaries: research documents, the
//! accumulated pipeline state, chat session records, plus the logging
//! helpers every crate uses.

pub mod errors;
pub mod logging;
pub mod session;
pub mod types;

pub use errors::*;
pub use session::{ChatMessage, ChatRole, SessionRecord, SessionSummary};
pub use types::*;
