//! AI Tool Agent client
//!
//! The agent owns all command understanding. This side only ships the
//! command text with a scene snapshot and hands the reply back for display.

pub mod client;
pub mod protocol;
pub mod transport;

pub use client::AgentClient;
pub use protocol::{AgentResponse, CommandRequest, FoundryCommand};
pub use transport::{AgentTransport, HttpTransport, RawResponse};
