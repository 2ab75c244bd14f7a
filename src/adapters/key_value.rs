//! Logger taking alternating keys and values, as workflow engines do

use crate::core::{Field, FieldValue, Level, Logger};

/// Pair up a flat `key, value, key, value, …` list into fields.
///
/// String keys are used as-is; any other key is rendered with `Display`.
/// A trailing key without a value becomes a field holding `""`.
///
/// ```
/// use logkit::adapters::key_values_to_fields;
/// use logkit::core::FieldValue;
///
/// let fields = key_values_to_fields(&["k1".into(), "v1".into(), "k2".into()]);
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[1].key, "k2");
/// assert_eq!(fields[1].value.to_string(), "");
/// ```
pub fn key_values_to_fields(key_values: &[FieldValue]) -> Vec<Field> {
    key_values
        .chunks(2)
        .map(|pair| {
            let key = match &pair[0] {
                FieldValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            match pair.get(1) {
                Some(value) => Field::new(key, value.clone()),
                None => Field::new(key, ""),
            }
        })
        .collect()
}

/// Leveled logger whose calls take a flat key/value list.
#[derive(Debug, Clone)]
pub struct KeyValueLogger {
    logger: Logger,
}

impl KeyValueLogger {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    #[track_caller]
    pub fn debug(&self, message: &str, key_values: &[FieldValue]) {
        self.log(Level::Debug, message, key_values);
    }

    #[track_caller]
    pub fn info(&self, message: &str, key_values: &[FieldValue]) {
        self.log(Level::Info, message, key_values);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, key_values: &[FieldValue]) {
        self.log(Level::Warn, message, key_values);
    }

    #[track_caller]
    pub fn error(&self, message: &str, key_values: &[FieldValue]) {
        self.log(Level::Error, message, key_values);
    }

    #[track_caller]
    fn log(&self, level: Level, message: &str, key_values: &[FieldValue]) {
        if !self.logger.enabled(level) {
            return;
        }
        self.logger
            .log(level, message, &key_values_to_fields(key_values));
    }
}
