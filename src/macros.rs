//! Small crate-wide convenience macros.

/// Log a formatted line to the browser console in debug builds.
///
/// Release builds compile the arguments away entirely so the hot click
/// handlers carry no formatting cost.
///
/// ```rust,ignore
/// debug_log!("registry holds {} ids", registry.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
    };
}

/// Log a formatted warning to the browser console (all build profiles).
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        web_sys::console::warn_1(&format!($($arg)*).into());
    }};
}
