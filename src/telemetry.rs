use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Structured JSON event logger.
///
/// Each record is one JSON object with `ts`, `level` and `event` keys plus
/// whatever fields the caller passes. Records go to stdout natively and to the
/// browser console under wasm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Logger {
    min_level: Option<LogLevel>,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level: Some(min_level),
        }
    }

    pub fn disabled() -> Self {
        Self { min_level: None }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.min_level.is_some_and(|min| level >= min)
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Warn, event, fields);
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if !self.enabled(level) {
            return;
        }

        emit(&build_record(now_unix_millis(), level, event, fields));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

pub fn build_record(
    ts: u64,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::from(ts));
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(record: &serde_json::Value) {
    println!("{record}");
}

#[cfg(target_arch = "wasm32")]
fn emit(record: &serde_json::Value) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&record.to_string()));
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

// SystemTime panics on wasm32-unknown-unknown.
#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_merges_extra_fields() {
        let record = build_record(42, LogLevel::Warn, "intro.fallback", json!({ "path": "load" }));

        assert_eq!(record["ts"], 42);
        assert_eq!(record["level"], "warn");
        assert_eq!(record["event"], "intro.fallback");
        assert_eq!(record["path"], "load");
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let record = build_record(1, LogLevel::Info, "tick", json!("loose"));

        assert_eq!(record.as_object().map(|map| map.len()), Some(3));
    }

    #[test]
    fn level_filter_respects_ordering() {
        let logger = Logger::new(LogLevel::Info);

        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
        assert!(!Logger::disabled().enabled(LogLevel::Warn));
    }

    #[test]
    fn level_parse_is_case_insensitive() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), None);
    }
}
