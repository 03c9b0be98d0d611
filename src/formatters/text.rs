//! `key=value` text formatter

use super::{user_fields, FieldKey, FieldMap};
use crate::core::{Entry, FieldValue, Formatter, Result, TimestampFormat};
#[cfg(feature = "color")]
use colored::Colorize;

/// Renders `time="..." level=info msg="..." key=value` lines.
///
/// Built-in keys come first (`time`, `level`, then `msg` when the message
/// is non-empty), followed by the user fields sorted by key. A value is
/// quoted unless it consists only of ASCII letters, digits and `-._/@^+`.
///
/// # Example
///
/// ```
/// use rust_hooked_logger::prelude::*;
/// use rust_hooked_logger::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .formatter(TextFormatter::new().disable_timestamp(true))
///     .output(sink.clone())
///     .build();
///
/// logger.with_field("animal", "walrus").warn("The group's number increased");
/// assert_eq!(
///     sink.contents(),
///     "level=warning msg=\"The group's number increased\" animal=walrus\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    disable_timestamp: bool,
    timestamp_format: TimestampFormat,
    disable_sorting: bool,
    quote_empty_fields: bool,
    #[cfg(feature = "color")]
    force_colors: bool,
    field_map: FieldMap,
}

impl TextFormatter {
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

    /// Keep user fields in map order instead of sorting them by key
    #[must_use]
    pub fn disable_sorting(mut self, disable: bool) -> Self {
        self.disable_sorting = disable;
        self
    }

    /// Write empty string values as `""` instead of nothing
    #[must_use]
    pub fn quote_empty_fields(mut self, quote: bool) -> Self {
        self.quote_empty_fields = quote;
        self
    }

    /// Colored layout: four-letter level tag, padded message, tinted keys
    #[cfg(feature = "color")]
    #[must_use]
    pub fn force_colors(mut self, force: bool) -> Self {
        self.force_colors = force;
        self
    }

    #[must_use]
    pub fn field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    fn needs_quoting(&self, text: &str) -> bool {
        if text.is_empty() {
            return self.quote_empty_fields;
        }
        !text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+'))
    }

    fn append_value(&self, buf: &mut String, text: &str) {
        if self.needs_quoting(text) {
            buf.push_str(&format!("{:?}", text));
        } else {
            buf.push_str(text);
        }
    }

    fn append_key_value(&self, buf: &mut String, key: &str, text: &str) {
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(key);
        buf.push('=');
        self.append_value(buf, text);
    }

    fn fields<'a>(&self, entry: &'a Entry) -> Vec<(String, &'a FieldValue)> {
        user_fields(entry.data(), &self.field_map, !self.disable_sorting)
    }

    fn format_plain(&self, entry: &Entry) -> String {
        let mut buf = String::with_capacity(128);

        if !self.disable_timestamp {
            if let Some(time) = entry.time() {
                let key = self.field_map.resolve(FieldKey::Time);
                self.append_key_value(&mut buf, key, &self.timestamp_format.format(&time));
            }
        }
        let level_key = self.field_map.resolve(FieldKey::Level);
        self.append_key_value(&mut buf, level_key, entry.level().to_str());
        if !entry.message().is_empty() {
            let msg_key = self.field_map.resolve(FieldKey::Msg);
            self.append_key_value(&mut buf, msg_key, entry.message());
        }
        for (key, value) in self.fields(entry) {
            self.append_key_value(&mut buf, &key, &value.to_string());
        }

        buf.push('\n');
        buf
    }

    #[cfg(feature = "color")]
    fn format_colored(&self, entry: &Entry) -> String {
        let color = entry.level().color_code();
        let tag: String = entry.level().to_str().to_uppercase().chars().take(4).collect();
        let message = entry.message().trim_end_matches('\n');

        let mut buf = String::with_capacity(128);
        buf.push_str(&tag.color(color).to_string());
        if !self.disable_timestamp {
            if let Some(time) = entry.time() {
                buf.push_str(&format!("[{}]", self.timestamp_format.format(&time)));
            }
        }
        buf.push_str(&format!(" {:<44}", message));

        for (key, value) in self.fields(entry) {
            buf.push(' ');
            buf.push_str(&key.color(color).to_string());
            buf.push('=');
            self.append_value(&mut buf, &value.to_string());
        }

        buf.push('\n');
        buf
    }
}

impl Formatter for TextFormatter {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        #[cfg(feature = "color")]
        {
            if self.force_colors {
                return Ok(self.format_colored(entry).into_bytes());
            }
        }
        Ok(self.format_plain(entry).into_bytes())
    }

    fn name(&self) -> &str {
        "text"
    }
}
