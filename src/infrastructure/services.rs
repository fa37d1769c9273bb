//! Browser implementations of the domain logging services.

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};

/// Console logger implementation for WASM environment
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let timestamp = get_time_provider().format_timestamp(entry.timestamp);
        let formatted: wasm_bindgen::JsValue = entry.format_line(&timestamp).into();
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted),
            LogLevel::Info => web_sys::console::info_1(&formatted),
            LogLevel::Warn => web_sys::console::warn_1(&formatted),
            LogLevel::Error => web_sys::console::error_1(&formatted),
        }
    }
}

/// Wall clock backed by `Date.now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}
