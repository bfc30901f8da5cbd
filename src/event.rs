//! Log callback system for diagnostics.
//!
//! The live redraw controller reports resize and overflow events here so
//! embedding applications can surface them without the crate writing to the
//! terminal it is rendering to.

use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback().lock().expect("log callback lock");
    *guard = Some(Box::new(callback));
}

/// Emit a log event.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_callback() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let called = Arc::new(AtomicBool::new(false));
        let called_clone = Arc::clone(&called);
        set_log_callback(move |level, msg| {
            assert_eq!(level, LogLevel::Info);
            assert_eq!(msg, "hello");
            called_clone.store(true, Ordering::SeqCst);
        });
        emit_log(LogLevel::Info, "hello");
        assert!(called.load(Ordering::SeqCst));

        // Clear the global callback so concurrent tests that emit other
        // levels do not trip this test's assertions.
        *log_callback().lock().expect("log callback lock") = None;
    }
}
