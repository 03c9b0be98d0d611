//! Line-delimited JSON formatter

use super::{user_fields, FieldKey, FieldMap};
use crate::core::{Entry, Formatter, LoggerError, Result, TimestampFormat};
use serde_json::{Map, Value};

/// Renders each entry as one JSON object followed by a newline.
///
/// Keys are written in sorted order. User fields sit at the top level
/// next to `time`, `msg` and `level` unless `data_key` nests them.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    disable_timestamp: bool,
    timestamp_format: TimestampFormat,
    pretty_print: bool,
    data_key: Option<String>,
    field_map: FieldMap,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn disable_timestamp(mut self, disable: bool) -> Self {
        self.disable_timestamp = disable;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Nest all user fields under `key`
    #[must_use]
    pub fn data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    fn to_value(&self, entry: &Entry) -> Value {
        let mut data = Map::new();
        for (key, value) in user_fields(entry.data(), &self.field_map, false) {
            data.insert(key, value.to_json_value());
        }

        let mut root = match &self.data_key {
            Some(key) => {
                let mut root = Map::new();
                root.insert(key.clone(), Value::Object(data));
                root
            }
            None => data,
        };

        if !self.disable_timestamp {
            if let Some(time) = entry.time() {
                root.insert(
                    self.field_map.resolve(FieldKey::Time).to_string(),
                    self.timestamp_format.to_json_value(&time),
                );
            }
        }
        root.insert(
            self.field_map.resolve(FieldKey::Msg).to_string(),
            Value::String(entry.message().to_string()),
        );
        root.insert(
            self.field_map.resolve(FieldKey::Level).to_string(),
            Value::String(entry.level().to_str().to_string()),
        );

        Value::Object(root)
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        let value = self.to_value(entry);
        let mut bytes = if self.pretty_print {
            serde_json::to_vec_pretty(&value)
        } else {
            serde_json::to_vec(&value)
        }
        .map_err(|e| LoggerError::formatter("json", e.to_string()))?;

        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LogLevel, Logger};
    use crate::sinks::MemorySink;

    fn logger_with(formatter: JsonFormatter) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .formatter(formatter)
            .output(sink.clone())
            .build();
        (logger, sink)
    }

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).expect("formatter emits valid JSON")
    }

    #[test]
    fn test_compact_line() {
        let (logger, sink) = logger_with(JsonFormatter::new().disable_timestamp(true));
        logger
            .with_fields([("animal", FieldValue::from("walrus")), ("size", 10.into())])
            .info("A group of walrus emerges from the ocean");

        assert_eq!(
            sink.contents(),
            "{\"animal\":\"walrus\",\"level\":\"info\",\"msg\":\"A group of walrus emerges from the ocean\",\"size\":10}\n"
        );
    }

    #[test]
    fn test_time_present_when_fired() {
        let (logger, sink) = logger_with(JsonFormatter::new());
        logger.warn("stamped");

        let value = parse(&sink.lines()[0]);
        assert!(value["time"].as_str().is_some_and(|t| t.ends_with('Z')));
        assert_eq!(value["level"], "warning");
    }

    #[test]
    fn test_numeric_timestamp() {
        let (logger, sink) =
            logger_with(JsonFormatter::new().timestamp_format(TimestampFormat::Unix));
        logger.info("epoch");

        assert!(parse(&sink.lines()[0])["time"].is_i64());
    }

    #[test]
    fn test_reserved_keys_prefixed() {
        let (logger, sink) = logger_with(JsonFormatter::new().disable_timestamp(true));
        logger
            .with_fields([("msg", "shadow"), ("time", "later")])
            .error("original");

        let value = parse(&sink.lines()[0]);
        assert_eq!(value["msg"], "original");
        assert_eq!(value["fields.msg"], "shadow");
        assert_eq!(value["fields.time"], "later");
        assert!(value.get("time").is_none());
    }

    #[test]
    fn test_data_key_nests_user_fields() {
        let (logger, sink) =
            logger_with(JsonFormatter::new().disable_timestamp(true).data_key("data"));
        logger.with_field("user", "ada").info("login");

        let value = parse(&sink.lines()[0]);
        assert_eq!(value["data"]["user"], "ada");
        assert!(value.get("user").is_none());
        assert_eq!(value["level"], "info");
    }

    #[test]
    fn test_field_map() {
        let map = FieldMap::new().rename(FieldKey::Level, "severity");
        let (logger, sink) = logger_with(JsonFormatter::new().field_map(map));
        logger.error("renamed");

        let value = parse(&sink.lines()[0]);
        assert_eq!(value["severity"], "error");
        assert!(value.get("level").is_none());
    }

    #[test]
    fn test_pretty_print_is_multiline() {
        let (logger, sink) = logger_with(JsonFormatter::new().pretty_print(true));
        logger.with_field("a", 1).log(LogLevel::Info, "pretty").unwrap();

        let contents = sink.contents();
        assert!(contents.lines().count() > 1);
        assert_eq!(parse(&contents)["a"], 1);
    }
}
