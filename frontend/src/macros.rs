//! Small crate-wide convenience macros.

/// Log a formatted message to the browser console.
///
/// On non-wasm targets (native unit tests) the message goes to stderr so
/// reducers can be exercised without a browser.
///
/// ```rust,ignore
/// debug_log!("Fetched {} files", files.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[debug] {}", format!($($arg)*));
    }};
}

/// Same as [`debug_log!`] but routed to `console.warn`.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[warn] {}", format!($($arg)*));
    }};
}

/// Same as [`debug_log!`] but routed to `console.error`.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[error] {}", format!($($arg)*));
    }};
}
