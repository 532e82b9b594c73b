//! Call-site metadata for log records.
//!
//! There are two ways in:
//!
//! - [`call_site!`](crate::call_site) expands at the call expression and
//!   knows file, line and the enclosing function's path at compile time.
//!   The `log_*!` macros use it.
//! - [`CallSite::caller`] relies on `#[track_caller]` for file and line.
//!   The facade's frames between application code and this function are,
//!   in order:
//!   1. the severity method (`Logger::info` and friends),
//!   2. `Logger::dispatch`,
//!   3. `CallSite::caller` itself.
//!
//!   All three carry `#[track_caller]`, so exactly these three frames are
//!   skipped and the reported location is the application's call. Any new
//!   frame on that chain must carry the attribute too. The function name
//!   is then recovered by walking the stack for the frame whose debug info
//!   points at that file and line. Without debug info nothing matches and
//!   the function stays empty.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Source location a record is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    function: Cow<'static, str>,
}

impl CallSite {
    pub fn new(file: &'static str, line: u32, function: impl Into<Cow<'static, str>>) -> Self {
        Self {
            file,
            line,
            function: function.into(),
        }
    }

    /// Location used when nothing could be resolved.
    pub const fn unknown() -> Self {
        Self {
            file: "",
            line: 0,
            function: Cow::Borrowed(""),
        }
    }

    /// Location of the first caller not marked `#[track_caller]`, with the
    /// enclosing function resolved from the stack when possible.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        let function = resolve_function(location.file(), location.line()).unwrap_or_default();
        Self::new(location.file(), location.line(), function)
    }

    /// Build a call site from the type name of a marker function nested in
    /// the caller, as produced by [`call_site!`](crate::call_site).
    #[doc(hidden)]
    pub fn from_marker(file: &'static str, line: u32, marker: &'static str) -> Self {
        let function = marker.strip_suffix("::__here").unwrap_or(marker);
        Self::new(file, line, trim_closures(function))
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Fully-qualified function path, empty when unavailable.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// `path:line`, or an empty string if the file is unknown.
    pub fn file_name(&self) -> String {
        if self.file.is_empty() {
            String::new()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

fn trim_closures(mut function: &str) -> &str {
    while let Some(outer) = function.strip_suffix("::{{closure}}") {
        function = outer;
    }
    function
}

type Resolved = HashMap<(&'static str, u32), String>;

fn resolved() -> &'static Mutex<Resolved> {
    static RESOLVED: OnceLock<Mutex<Resolved>> = OnceLock::new();
    RESOLVED.get_or_init(Default::default)
}

/// Name of the function containing `file:line`, looked up on the current
/// stack. Successful lookups are cached per location.
fn resolve_function(file: &'static str, line: u32) -> Option<String> {
    if file.is_empty() {
        return None;
    }
    if let Some(name) = resolved()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&(file, line))
    {
        return Some(name.clone());
    }

    let mut found: Option<String> = None;
    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() || symbol.lineno() != Some(line) {
                return;
            }
            let matches_file = symbol
                .filename()
                .is_some_and(|path| path.ends_with(Path::new(file)));
            if let (true, Some(name)) = (matches_file, symbol.name()) {
                found = Some(trim_closures(&format!("{:#}", name)).to_string());
            }
        });
        found.is_none()
    });

    let name = found?;
    resolved()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert((file, line), name.clone());
    Some(name)
}

/// Capture the current file, line and enclosing function as a
/// [`CallSite`](crate::trace::CallSite).
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::trace::CallSite::from_marker(::std::file!(), ::std::line!(), __type_name_of(__here))
    }};
}
