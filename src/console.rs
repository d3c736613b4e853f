//! Browser console logging.
//!
//! On wasm32 messages go to `console.log` / `console.warn`. Host builds
//! (unit tests) have no console, so both are no-ops.

/// Log an informational message.
#[cfg(target_arch = "wasm32")]
pub fn log(msg: &str) {
    web_sys::console::log_1(&format!("Cash Flow: {msg}").into());
}

/// Log a warning.
#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&format!("Cash Flow: {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_msg: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_msg: &str) {}
