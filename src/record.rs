use crate::config::LogConfiguration;
use crate::error::LogError;
use crate::level::Level;
use crate::trace::CallSite;
use chrono::{DateTime, Utc};

/// Layout of [`LogRecord::timestamp`]: UTC, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A fully enriched log entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: String,
    level: Level,
    service: String,
    session_id: String,
    function_name: String,
    file_name: String,
    message: String,
}

impl LogRecord {
    /// Assemble a record stamped with the current time.
    ///
    /// Never fails: an unresolved call site simply yields empty
    /// `file_name`/`function_name`.
    pub fn build(
        level: Level,
        message: &str,
        session_id: &str,
        config: &LogConfiguration,
        site: CallSite,
    ) -> Self {
        Self::build_at(Utc::now(), level, message, session_id, config, site)
    }

    /// Like [`LogRecord::build`], with the level given as a string.
    pub fn build_raw(
        level: &str,
        message: &str,
        session_id: &str,
        config: &LogConfiguration,
        site: CallSite,
    ) -> Result<Self, LogError> {
        Ok(Self::build(level.parse()?, message, session_id, config, site))
    }

    pub(crate) fn build_at(
        now: DateTime<Utc>,
        level: Level,
        message: &str,
        session_id: &str,
        config: &LogConfiguration,
        site: CallSite,
    ) -> Self {
        LogRecord {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            level,
            service: config.service_name.clone(),
            session_id: session_id.to_string(),
            function_name: site.function().to_string(),
            file_name: site.file_name(),
            message: message.to_string(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
