//! Logging bootstrap for hosts embedding the engine.

mod init;

pub use init::{LoggingConfig, init_logging};
