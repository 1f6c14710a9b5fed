//! Logging with a colored module prefix.
//!
//! Output is off until [`set_enabled`] turns it on. The controller does so
//! for `[log] enable = true`. Native targets write to stdout, the wasm
//! build writes to the browser console.
//!
//! # Example
//!
//! ```ignore
//! log!("lightbox"; "wired {} diagrams", count);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Serializes tests that flip the process-wide switch.
#[cfg(test)]
pub(crate) static SWITCH_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Log a message with a module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_enabled() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Turn log output on or off for the whole process (or page).
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Write one message with a `[module]` prefix.
#[cfg(not(target_arch = "wasm32"))]
pub fn log(module: &str, message: &str) {
    use std::io::{Write, stdout};

    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Write one message with a `[module]` prefix.
#[cfg(target_arch = "wasm32")]
pub fn log(module: &str, message: &str) {
    let line = format!("[{module}] {message}");
    if module.eq_ignore_ascii_case("error") {
        web_sys::console::error_1(&line.into());
    } else {
        web_sys::console::log_1(&line.into());
    }
}

/// Apply color to a module prefix based on module type.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> colored::ColoredString {
    use colored::Colorize;

    let prefix = format!("[{module}]");
    match module_lower {
        "open" => prefix.bright_green().bold(),
        "close" => prefix.bright_blue().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}
