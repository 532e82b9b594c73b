//! Environment variable names read by
//! [`LogConfiguration::from_env`](crate::config::LogConfiguration::from_env).
//!
//! These are purely helpers; the facade itself never touches the
//! environment after the configuration has been built.

/// Path of the append-only log file. Empty or unset disables the file sink.
pub const LOG_FILE_ENV: &str = "LOG_FILE";

/// Logical service name, written as `release_name`.
pub const LOG_SERVICE_NAME_ENV: &str = "LOG_SERVICE_NAME";

/// Output layout, `json` (default) or `text`.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
