use crate::error::LogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Serialized in lowercase (`"info"`, `"warn"`, ...), which is also the
/// value written to the `level` key on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Level {
    pub const ALL: [Level; 5] = [Level::Info, Level::Warn, Level::Error, Level::Fatal, Level::Panic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            _ => Err(LogError::UnsupportedLevel(s.to_string())),
        }
    }
}

/// `tracing` has no fatal/panic levels and its DEBUG/TRACE have no
/// counterpart here.
impl TryFrom<tracing::Level> for Level {
    type Error = LogError;

    fn try_from(level: tracing::Level) -> Result<Self, LogError> {
        if level == tracing::Level::INFO {
            Ok(Level::Info)
        } else if level == tracing::Level::WARN {
            Ok(Level::Warn)
        } else if level == tracing::Level::ERROR {
            Ok(Level::Error)
        } else {
            Err(LogError::UnsupportedLevel(level.to_string()))
        }
    }
}
