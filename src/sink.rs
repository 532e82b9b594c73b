use crate::config::LogConfiguration;
use crate::error::LogError;
use crate::fallback;
use std::any::Any;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;

/// Set of sinks a single record is written to.
///
/// Computed from the configuration on every call and handed straight to
/// [`write_line`], so no process-wide output setting exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Console only.
    Stdout,
    /// Console plus an append-only file.
    StdoutAndFile(PathBuf),
}

impl Destination {
    pub fn from_config(config: &LogConfiguration) -> Self {
        match config.log_file() {
            Some(path) => Destination::StdoutAndFile(path.to_path_buf()),
            None => Destination::Stdout,
        }
    }
}

/// Writer that copies every byte to two underlying writers.
///
/// Both halves are always attempted; the first error wins.
#[derive(Debug)]
pub struct MultiWriter<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> MultiWriter<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Write, B: Write> Write for MultiWriter<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let first = self.first.write_all(buf);
        let second = self.second.write_all(buf);
        first.and(second).map(|()| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let first = self.first.flush();
        let second = self.second.flush();
        first.and(second)
    }
}

/// Write one formatted line to every sink in `destination`.
///
/// **Parameters**
/// - `line`: the serialized record, trailing newline included.
/// - `destination`: console only, or console plus file.
/// - `console`: source of the console writer, normally `io::stdout`.
///
/// **Returns**
/// - `Ok(())` once every sink accepted the line.
/// - `Err(LogError::FileOpen)` if the file could not be opened. The line
///   has still been written to the console; if that write failed too, it
///   is reported to the fallback channel separately.
/// - `Err(LogError::Write)` if a sink rejected the bytes.
/// - `Err(LogError::ContainedFault)` if anything panicked underneath.
///
/// The file is opened in append mode (created if missing) for this call
/// only and closed before returning, on every path.
pub fn write_line<C>(line: &[u8], destination: &Destination, console: &C) -> Result<(), LogError>
where
    C: for<'w> MakeWriter<'w>,
{
    panic::catch_unwind(AssertUnwindSafe(|| write_unguarded(line, destination, console)))
        .unwrap_or_else(|payload| Err(LogError::ContainedFault(panic_message(payload.as_ref()))))
}

fn write_unguarded<C>(line: &[u8], destination: &Destination, console: &C) -> Result<(), LogError>
where
    C: for<'w> MakeWriter<'w>,
{
    match destination {
        Destination::Stdout => write_all_flush(console.make_writer(), line),
        Destination::StdoutAndFile(path) => {
            let file = match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => file,
                Err(source) => {
                    // Keep the record on the console even without its file.
                    if let Err(err) = write_all_flush(console.make_writer(), line) {
                        fallback::report(&err);
                    }
                    return Err(LogError::FileOpen {
                        path: path.clone(),
                        source,
                    });
                }
            };
            write_all_flush(MultiWriter::new(file, console.make_writer()), line)
        }
    }
}

fn write_all_flush<W: Write>(mut writer: W, line: &[u8]) -> Result<(), LogError> {
    writer.write_all(line)?;
    writer.flush()?;
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
