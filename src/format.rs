use crate::config::LogFormat;
use crate::error::LogError;
use crate::level::Level;
use crate::record::LogRecord;
use serde::Serialize;

/// On-the-wire shape of a record. Key names and order are the contract
/// with downstream log consumers.
#[derive(Serialize)]
struct WireRecord<'a> {
    time: &'a str,
    level: Level,
    release_name: &'a str,
    request_id: &'a str,
    file_name: &'a str,
    function_name: &'a str,
    message: &'a str,
}

impl<'a> From<&'a LogRecord> for WireRecord<'a> {
    fn from(record: &'a LogRecord) -> Self {
        WireRecord {
            time: record.timestamp(),
            level: record.level(),
            release_name: record.service(),
            request_id: record.session_id(),
            file_name: record.file_name(),
            function_name: record.function_name(),
            message: record.message(),
        }
    }
}

/// Render `record` in the given layout, newline included.
pub fn format(record: &LogRecord, layout: LogFormat) -> Result<Vec<u8>, LogError> {
    match layout {
        LogFormat::Json => format_json(record),
        LogFormat::Text => Ok(format_text(record)),
    }
}

/// One JSON object followed by exactly one `\n`.
pub fn format_json(record: &LogRecord) -> Result<Vec<u8>, LogError> {
    let mut line = serde_json::to_vec(&WireRecord::from(record))?;
    line.push(b'\n');
    Ok(line)
}

/// `time LEVEL release_name request_id file_name function_name: message`
///
/// Line breaks inside the message are escaped so a record never spans
/// more than one line.
pub fn format_text(record: &LogRecord) -> Vec<u8> {
    let message = record.message().replace('\r', "\\r").replace('\n', "\\n");
    format!(
        "{} {:<5} {} {} {} {}: {}\n",
        record.timestamp(),
        record.level().as_str().to_ascii_uppercase(),
        record.service(),
        record.session_id(),
        record.file_name(),
        record.function_name(),
        message,
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfiguration;
    use crate::trace::CallSite;
    use serde_json::Value;

    fn record(message: &str) -> LogRecord {
        LogRecord::build(
            Level::Info,
            message,
            "sess-123",
            &LogConfiguration::new("api"),
            CallSite::new("src/main.rs", 10, "app::main"),
        )
    }

    #[test]
    fn json_keys_follow_wire_order() {
        let line = String::from_utf8(format_json(&record("service started")).unwrap()).unwrap();
        assert!(line.ends_with("}\n"));
        assert_eq!(line.matches('\n').count(), 1);

        let keys = ["time", "level", "release_name", "request_id", "file_name", "function_name", "message"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| line.find(&format!("\"{}\":", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value.as_object().unwrap().len(), keys.len());
        assert_eq!(value["level"], "info");
        assert_eq!(value["release_name"], "api");
        assert_eq!(value["request_id"], "sess-123");
        assert_eq!(value["file_name"], "src/main.rs:10");
        assert_eq!(value["function_name"], "app::main");
    }

    #[test]
    fn json_preserves_awkward_messages() {
        let message = "say \"hi\"\nnext line\t\\ 日本語 🚀";
        let line = format_json(&record(message)).unwrap();
        let value: Value = serde_json::from_slice(&line).unwrap();
        assert_eq!(value["message"], message);
        assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);
    }

    #[test]
    fn text_layout_is_single_line() {
        let line = String::from_utf8(format(&record("a\nb"), LogFormat::Text).unwrap()).unwrap();
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains(" INFO  api sess-123 src/main.rs:10 app::main: a\\nb\n"));
    }
}
