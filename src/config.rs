use crate::env::{env_or, LOG_FILE_ENV, LOG_FORMAT_ENV, LOG_SERVICE_NAME_ENV};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Line layout produced by the formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Newline-delimited JSON, the contract for downstream consumers.
    #[default]
    Json,
    /// Single-line human readable layout.
    Text,
}

/// Configuration shared by one [`Logger`](crate::logger::Logger).
///
/// Built once by the owning process and never mutated by the facade.
///
/// **Fields**
/// - `log_file`: append-only file receiving a copy of every record.
///   `None` or an empty path means stdout only.
/// - `service_name`: written as `release_name`; may be empty.
/// - `format`: line layout, JSON unless stated otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfiguration {
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl LogConfiguration {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Self::default()
        }
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Build a configuration from `LOG_FILE`, `LOG_SERVICE_NAME` and
    /// `LOG_FORMAT`. An unknown format falls back to JSON.
    pub fn from_env() -> Self {
        let log_file = env_or(LOG_FILE_ENV, "");
        let format = match env_or(LOG_FORMAT_ENV, "json").trim().to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            _ => LogFormat::Json,
        };

        Self {
            log_file: (!log_file.is_empty()).then(|| PathBuf::from(log_file)),
            service_name: env_or(LOG_SERVICE_NAME_ENV, ""),
            format,
        }
    }

    /// The file sink, if one is configured and non-empty.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}
