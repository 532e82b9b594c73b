//! Synchronous structured logging facade.
//!
//! Each call produces one JSON line carrying time, level, service name,
//! correlation id and call site, written to stdout and, when configured,
//! appended to a log file.

pub mod config;
pub mod env;
pub mod error;
pub mod fallback;
pub mod format;
pub mod level;
pub mod record;
pub mod sink;
pub mod trace;

pub mod logger;
mod macros;

pub mod layer;
pub mod init;

#[cfg(test)]
mod test_support;

pub use config::{LogConfiguration, LogFormat};
pub use error::LogError;
pub use level::Level;
pub use logger::Logger;
pub use record::LogRecord;
pub use trace::CallSite;
