//! Logging utilities.
//!
//! Centralizes logger initialization. Engine code only depends on the `log`
//! facade; `env_logger` is wired up here for binaries that want it.

mod init;

pub use init::{LoggingConfig, init_logging};
