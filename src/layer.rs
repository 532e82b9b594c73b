use crate::fallback::FALLBACK_TARGET;
use crate::level::Level;
use crate::logger::Logger;
use crate::trace::CallSite;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that routes `tracing` events through a
/// [`Logger`], so `tracing::info!` and friends produce the same JSON
/// lines as the facade's own methods.
///
/// Only INFO, WARN and ERROR events are recorded. The correlation id is
/// taken from a `request_id` or `session_id` field, and the call site from
/// the event's metadata (file, line and module path).
///
/// The layer reports [`FALLBACK_TARGET`] as disabled. A failed write
/// therefore never loops back into the facade, and its notice goes to
/// stderr instead of being swallowed here.
pub struct FacadeLayer<C> {
    logger: Arc<Logger<C>>,
}

impl<C> FacadeLayer<C> {
    pub fn new(logger: Arc<Logger<C>>) -> Self {
        Self { logger }
    }
}

impl<S, C> Layer<S> for FacadeLayer<C>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        metadata.target() != FALLBACK_TARGET
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let Ok(level) = Level::try_from(*meta.level()) else {
            return;
        };

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let site = match meta.file() {
            Some(file) => CallSite::new(
                file,
                meta.line().unwrap_or(0),
                meta.module_path().unwrap_or_else(|| meta.target()),
            ),
            None => CallSite::unknown(),
        };

        self.logger.log_at(site, level, &visitor.message(), &visitor.session_id);
    }
}

/// Collects the message, the correlation id and any remaining fields of
/// an event.
#[derive(Default)]
pub struct FieldVisitor {
    pub message: String,
    pub session_id: String,
    pub fields: Vec<(&'static str, String)>,
}

impl FieldVisitor {
    /// The event message, with extra fields appended as `key=value`.
    pub fn message(&self) -> String {
        let mut message = self.message.clone();
        for (name, value) in &self.fields {
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(name);
            message.push('=');
            message.push_str(value);
        }
        message
    }

    fn insert(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "request_id" | "session_id" => self.session_id = value,
            name => self.fields.push((name, value)),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfiguration;
    use crate::test_support::Captured;
    use serde_json::Value;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(f: impl FnOnce()) -> Vec<Value> {
        let console = Captured::default();
        let logger = Arc::new(Logger::with_console(LogConfiguration::new("bridge"), console.clone()));
        let subscriber = tracing_subscriber::registry().with(FacadeLayer::new(logger));
        tracing::subscriber::with_default(subscriber, f);
        console
            .lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn bridges_events_into_records() {
        let records = capture(|| {
            tracing::warn!(request_id = "sess-1", attempt = 3, "retrying upstream");
        });

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["level"], "warn");
        assert_eq!(record["release_name"], "bridge");
        assert_eq!(record["request_id"], "sess-1");
        assert_eq!(record["message"], "retrying upstream attempt=3");
        assert_eq!(record["function_name"], "json_log_facade::layer::tests");
        assert!(record["file_name"].as_str().unwrap().starts_with("src/layer.rs:"));
    }

    #[test]
    fn ignores_debug_and_fallback_events() {
        let records = capture(|| {
            tracing::debug!("noise");
            tracing::trace!("more noise");
            tracing::error!(target: FALLBACK_TARGET, "failed to log");
            tracing::error!(session_id = "s", "kept");
        });

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["message"], "kept");
        assert_eq!(records[0]["request_id"], "s");
    }

    #[test]
    fn fallback_target_is_disabled_under_the_bridge() {
        let logger = Arc::new(Logger::with_console(LogConfiguration::new("bridge"), Captured::default()));
        let subscriber = tracing_subscriber::registry().with(FacadeLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(target: FALLBACK_TARGET, tracing::Level::ERROR));
            assert!(tracing::enabled!(tracing::Level::ERROR));
        });
    }
}
