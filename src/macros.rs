//! Leveled logging macros for [`Logger`](crate::logger::Logger).
//!
//! These capture the enclosing function's path at compile time, so
//! `function_name` is filled in even in builds without debug info:
//!
//! ```no_run
//! use json_log_facade::{log_info, LogConfiguration, Logger};
//!
//! let logger = Logger::new(LogConfiguration::new("api"));
//! log_info!(logger, "sess-123", "user {} signed in", 42);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! logger_log {
    ($logger:expr, $lvl:expr, $session_id:expr, $($arg:tt)+) => {{
        let __msg = ::std::format!($($arg)+);
        $logger.log_at(
            $crate::call_site!(),
            $lvl,
            &__msg,
            ::std::convert::AsRef::<str>::as_ref(&$session_id),
        );
    }};
}

/// Records at `info` level.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $session_id:expr, $($arg:tt)+) => {
        $crate::logger_log!($logger, $crate::level::Level::Info, $session_id, $($arg)+)
    };
}

/// Records at `warn` level.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $session_id:expr, $($arg:tt)+) => {
        $crate::logger_log!($logger, $crate::level::Level::Warn, $session_id, $($arg)+)
    };
}

/// Records at `error` level.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $session_id:expr, $($arg:tt)+) => {
        $crate::logger_log!($logger, $crate::level::Level::Error, $session_id, $($arg)+)
    };
}

/// Records at `fatal` level without terminating the process.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $session_id:expr, $($arg:tt)+) => {
        $crate::logger_log!($logger, $crate::level::Level::Fatal, $session_id, $($arg)+)
    };
}

/// Records at `panic` level without panicking.
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $session_id:expr, $($arg:tt)+) => {
        $crate::logger_log!($logger, $crate::level::Level::Panic, $session_id, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::config::LogConfiguration;
    use crate::logger::Logger;
    use crate::test_support::Captured;
    use serde_json::Value;

    #[test]
    fn macros_fill_in_function_and_line() {
        let console = Captured::default();
        let logger = Logger::with_console(LogConfiguration::new("api"), console.clone());
        let session = String::from("sess-7");

        let line = line!() + 1;
        crate::log_warn!(logger, session, "disk at {}%", 91);
        crate::log_fatal!(&logger, "sess-8", "bye");

        let lines = console.lines();
        let first: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["level"], "warn");
        assert_eq!(first["message"], "disk at 91%");
        assert_eq!(first["request_id"], "sess-7");
        assert_eq!(first["file_name"], format!("{}:{}", file!(), line));
        assert_eq!(
            first["function_name"],
            "json_log_facade::macros::tests::macros_fill_in_function_and_line"
        );

        let second: Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["level"], "fatal");
    }

    #[test]
    fn every_level_macro_records_its_level() {
        let console = Captured::default();
        let logger = Logger::with_console(LogConfiguration::new("api"), console.clone());

        crate::log_info!(logger, "s", "a");
        crate::log_warn!(logger, "s", "b");
        crate::log_error!(logger, "s", "c {}", 1);
        crate::log_fatal!(logger, "s", "d");
        crate::log_panic!(logger, "s", "e");

        let levels: Vec<String> = console
            .lines()
            .iter()
            .map(|line| serde_json::from_str::<Value>(line).unwrap()["level"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(levels, ["info", "warn", "error", "fatal", "panic"]);
    }
}
