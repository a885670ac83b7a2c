//! VTT Agent Connector - chat commands to an AI Tool Agent and back

pub mod agent;
pub mod connector;
pub mod core;
pub mod host;
pub mod scene;
