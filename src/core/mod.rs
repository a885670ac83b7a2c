pub mod config;
pub mod error;

pub use config::ConnectorConfig;
pub use error::{ConnectorError, Result};
