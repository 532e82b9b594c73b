use crate::config::LogConfiguration;
use crate::error::LogError;
use crate::fallback;
use crate::format::format;
use crate::level::Level;
use crate::record::LogRecord;
use crate::sink::{write_line, Destination};
use crate::trace::CallSite;
use std::io;
use std::process;
use std::sync::{Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Console writer used by [`Logger::new`].
pub type Stdout = fn() -> io::Stdout;

/// Structured logging facade.
///
/// Every severity method builds one [`LogRecord`], formats it once and
/// writes it to stdout plus the configured log file. Failures are never
/// returned to the caller; they are reported through
/// [`FALLBACK_TARGET`](crate::fallback::FALLBACK_TARGET).
///
/// # Process termination
///
/// [`Logger::fatal`] and [`Logger::panic`] only record at that level.
/// Ending the process is opt-in through [`Logger::fatal_and_exit`] (exit
/// status 1) and [`Logger::panic_and_raise`] (unwinding panic), both of
/// which write the record first.
///
/// Calls are synchronous: the file I/O is finished when a method returns.
/// Concurrent calls are serialized so records never interleave.
pub struct Logger<C = Stdout> {
    config: LogConfiguration,
    console: C,
    write_lock: Mutex<()>,
}

impl Logger {
    /// Logger writing to the process's stdout.
    pub fn new(config: LogConfiguration) -> Self {
        Self::with_console(config, io::stdout as Stdout)
    }
}

impl<C> Logger<C>
where
    C: for<'w> MakeWriter<'w>,
{
    /// Logger writing its console copy through `console` instead of stdout.
    pub fn with_console(config: LogConfiguration, console: C) -> Self {
        Self {
            config,
            console,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &LogConfiguration {
        &self.config
    }

    #[track_caller]
    pub fn info(&self, message: &str, session_id: &str) {
        self.dispatch(Level::Info, message, session_id);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, session_id: &str) {
        self.dispatch(Level::Warn, message, session_id);
    }

    #[track_caller]
    pub fn error(&self, message: &str, session_id: &str) {
        self.dispatch(Level::Error, message, session_id);
    }

    /// Record at `fatal` level. Does not terminate; see
    /// [`Logger::fatal_and_exit`].
    #[track_caller]
    pub fn fatal(&self, message: &str, session_id: &str) {
        self.dispatch(Level::Fatal, message, session_id);
    }

    /// Record at `panic` level. Does not panic; see
    /// [`Logger::panic_and_raise`].
    #[track_caller]
    pub fn panic(&self, message: &str, session_id: &str) {
        self.dispatch(Level::Panic, message, session_id);
    }

    /// Record at `fatal` level, then exit the process with status 1.
    #[track_caller]
    pub fn fatal_and_exit(&self, message: &str, session_id: &str) -> ! {
        self.dispatch(Level::Fatal, message, session_id);
        process::exit(1)
    }

    /// Record at `panic` level, then panic with `message`.
    ///
    /// The panic is raised after the write boundary and does unwind into
    /// the caller.
    #[track_caller]
    pub fn panic_and_raise(&self, message: &str, session_id: &str) -> ! {
        self.dispatch(Level::Panic, message, session_id);
        panic!("{}", message)
    }

    /// Fail-silent write with an explicit call site. Used by the `log_*!`
    /// macros and the `tracing` bridge.
    pub fn log_at(&self, site: CallSite, level: Level, message: &str, session_id: &str) {
        if let Err(err) = self.emit(site, level, message, session_id) {
            fallback::report(&err);
        }
    }

    /// Same as the severity methods, but hands the failure back instead of
    /// reporting it.
    #[track_caller]
    pub fn try_log(&self, level: Level, message: &str, session_id: &str) -> Result<(), LogError> {
        self.emit(CallSite::caller(), level, message, session_id)
    }

    /// [`Logger::try_log`] with the level given as a string. An unknown
    /// level fails with [`LogError::UnsupportedLevel`] before anything is
    /// written.
    #[track_caller]
    pub fn try_log_raw(&self, level: &str, message: &str, session_id: &str) -> Result<(), LogError> {
        let site = CallSite::caller();
        let level: Level = level.parse()?;
        self.emit(site, level, message, session_id)
    }

    #[track_caller]
    fn dispatch(&self, level: Level, message: &str, session_id: &str) {
        self.log_at(CallSite::caller(), level, message, session_id);
    }

    fn emit(&self, site: CallSite, level: Level, message: &str, session_id: &str) -> Result<(), LogError> {
        let record = LogRecord::build(level, message, session_id, &self.config, site);
        let line = format(&record, self.config.format)?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let destination = Destination::from_config(&self.config);
        write_line(&line, &destination, &self.console)
    }
}
