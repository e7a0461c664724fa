//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Logger setup
//! - Durable storage (LocalStorage on web, memory on native)

use crate::storage::KeyValueStorage;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Parse a textual level, falling back to `Info`
pub fn parse_level(level: &str) -> log::Level {
    level.parse().unwrap_or(log::Level::Info)
}

/// Install the console logger and panic hook
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    // A second init (page re-mount) is harmless
    let _ = console_log::init_with_level(level);
}

/// Install env_logger, honoring `RUST_LOG` over the given default
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: log::Level) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_str().to_lowercase()),
    )
    .try_init();
}

/// Durable storage for this execution context
///
/// Falls back to [`Unavailable`](crate::storage::Unavailable) when the browser
/// has no LocalStorage (private mode, sandboxed iframe).
#[cfg(target_arch = "wasm32")]
pub fn durable_storage() -> Box<dyn KeyValueStorage> {
    match crate::storage::LocalStorage::open() {
        Some(storage) => Box::new(storage),
        None => {
            log::warn!("LocalStorage unavailable, data will not persist");
            Box::new(crate::storage::Unavailable)
        }
    }
}

/// Durable storage for this execution context (in-memory on native)
#[cfg(not(target_arch = "wasm32"))]
pub fn durable_storage() -> Box<dyn KeyValueStorage> {
    Box::new(crate::storage::MemoryStorage::new())
}
