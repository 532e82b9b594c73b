use std::io;
use std::path::PathBuf;

/// Failures that can occur on the build → format → write path.
///
/// None of these reach callers of the severity methods on
/// [`Logger`](crate::logger::Logger); they are reported to the console
/// fallback instead. Only [`Logger::try_log`](crate::logger::Logger::try_log)
/// hands them back.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("error opening log file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing log record: {0}")]
    Write(#[from] io::Error),

    #[error("failed to marshal fields to JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("not supported log level: {0:?}")]
    UnsupportedLevel(String),

    #[error("recovered from fault while writing log record: {0}")]
    ContainedFault(String),
}
