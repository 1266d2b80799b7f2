//! Service implementations
//!
//! Production implementations of the orchestrator-owned service traits.

pub mod session_store;

#[cfg(test)]
mod tests;

pub use session_store::FileSessionStore;
