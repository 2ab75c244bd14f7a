//! JSON handler for structured logging

use crate::core::{
    Context, Field, Handler, Level, LevelVar, Output, Record, Result, TimestampFormat,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Keys owned by the record itself. Top-level fields with these names are
/// written under a `fields.` prefix instead.
const RESERVED_KEYS: [&str; 4] = ["time", "level", "msg", "source"];

/// JSON-lines handler
///
/// Writes each record as a single-line JSON object:
/// `{"time":…,"level":…,"msg":…,"source":…,<fields>}`. Ungrouped fields are
/// top-level keys, fields under a group nest inside an object named after
/// the group. Compatible with log aggregation tools like ELK, Loki, etc.
#[derive(Debug, Clone)]
pub struct JsonHandler {
    output: Output,
    level: LevelVar,
    timestamp_format: TimestampFormat,
    groups: Vec<String>,
    attrs: Map<String, Value>,
}

impl JsonHandler {
    pub fn new(output: Output, level: LevelVar) -> Self {
        Self {
            output,
            level,
            timestamp_format: TimestampFormat::Rfc3339,
            groups: Vec::new(),
            attrs: Map::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Render one record as a JSON object.
    pub fn to_value(&self, record: &Record) -> Value {
        let mut object = Map::new();

        if let Some(timestamp) = self.timestamp_format.format(&record.time) {
            object.insert("time".to_string(), Value::String(timestamp));
        }
        object.insert(
            "level".to_string(),
            Value::String(record.level.to_str().to_string()),
        );
        object.insert("msg".to_string(), Value::String(record.message.clone()));
        if let Some(ref caller) = record.caller {
            object.insert("source".to_string(), Value::String(caller.to_string()));
        }

        let mut tree = self.attrs.clone();
        if !record.fields.is_empty() {
            insert_fields(group_mut(&mut tree, &self.groups), &record.fields);
        }
        for (key, value) in tree {
            if RESERVED_KEYS.contains(&key.as_str()) {
                object.insert(format!("fields.{}", key), value);
            } else {
                object.insert(key, value);
            }
        }

        Value::Object(object)
    }

    /// Render one record as a JSON line, including the trailing newline.
    pub fn format_record(&self, record: &Record) -> Result<String> {
        let mut line = serde_json::to_string(&self.to_value(record))?;
        line.push('\n');
        Ok(line)
    }

    pub(crate) fn derive_attrs(&self, fields: &[Field]) -> Self {
        let mut derived = self.clone();
        if !fields.is_empty() {
            insert_fields(group_mut(&mut derived.attrs, &self.groups), fields);
        }
        derived
    }

    pub(crate) fn derive_group(&self, name: &str) -> Self {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.groups.push(name.to_string());
        }
        derived
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        self.level.allows(level)
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
        let line = self.format_record(record)?;
        self.output.write_line(&line)
    }

    fn with_attrs(&self, fields: &[Field]) -> Arc<dyn Handler> {
        Arc::new(self.derive_attrs(fields))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.derive_group(name))
    }
}

fn insert_fields(target: &mut Map<String, Value>, fields: &[Field]) {
    for field in fields {
        target.insert(field.key.clone(), field.value.resolve().to_json_value());
    }
}

/// Walk (and create) the nested objects for `groups`.
fn group_mut<'a>(root: &'a mut Map<String, Value>, groups: &[String]) -> &'a mut Map<String, Value> {
    let mut current = root;
    for group in groups {
        let slot = current
            .entry(group.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = slot
            .as_object_mut()
            .expect("group slot replaced with an object in previous line");
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Caller, FieldValue};
    use chrono::TimeZone;
    use chrono::Utc;

    fn handler() -> JsonHandler {
        JsonHandler::new(Output::new(std::io::sink()), LevelVar::new(Level::Trace))
    }

    #[test]
    fn test_key_order_and_fields() {
        let record = Record::new(Level::Info, "User logged in").with_fields(vec![
            Field::new("user_id", 123),
            Field::new("action", "login"),
        ]);
        let line = handler()
            .with_timestamp_format(TimestampFormat::Disabled)
            .format_record(&record)
            .unwrap();

        assert_eq!(
            line,
            "{\"level\":\"INFO\",\"msg\":\"User logged in\",\"user_id\":123,\"action\":\"login\"}\n"
        );
    }

    #[test]
    fn test_time_and_source() {
        let mut record = Record::new(Level::Debug, "x").with_caller(Some(Caller::new("lib.rs", 3)));
        record.time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().unwrap();

        let value = handler().to_value(&record);
        assert_eq!(value["time"], "2025-01-08T10:30:45.000000000Z");
        assert_eq!(value["source"], "lib.rs:3");
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["time", "level", "msg", "source"]);
    }

    #[test]
    fn test_fields_never_replace_record_keys() {
        let record = Record::new(Level::Error, "disk failed").with_fields(vec![
            Field::new("msg", "user supplied"),
            Field::new("level", "debug"),
        ]);
        let value = handler()
            .derive_attrs(&[Field::new("time", "yesterday")])
            .to_value(&record);

        assert_eq!(value["msg"], "disk failed");
        assert_eq!(value["level"], "ERROR");
        assert_ne!(value["time"], "yesterday");
        assert_eq!(value["fields.msg"], "user supplied");
        assert_eq!(value["fields.level"], "debug");
        assert_eq!(value["fields.time"], "yesterday");
    }

    #[test]
    fn test_groups_nest() {
        let derived = handler()
            .derive_attrs(&[Field::new("service", "api")])
            .derive_group("db")
            .derive_attrs(&[Field::new("pool", 4)]);

        let record = Record::new(Level::Info, "connected").with_fields(vec![Field::new("host", "pg")]);
        let value = derived.to_value(&record);
        assert_eq!(value["service"], "api");
        assert_eq!(value["db"]["pool"], 4);
        assert_eq!(value["db"]["host"], "pg");
    }

    #[test]
    fn test_derive_leaves_original_untouched() {
        let base = handler();
        let _derived = base.derive_group("db").derive_attrs(&[Field::new("k", "v")]);

        let value = base.to_value(&Record::new(Level::Info, "m"));
        assert!(value.get("db").is_none());
        assert!(value.get("k").is_none());
    }

    #[test]
    fn test_empty_group_omitted() {
        let value = handler()
            .derive_group("unused")
            .to_value(&Record::new(Level::Info, "m"));
        assert!(value.get("unused").is_none());
    }

    #[test]
    fn test_lazy_and_float_values() {
        let record = Record::new(Level::Info, "m").with_fields(vec![
            Field::lazy("computed", || FieldValue::Int(42)),
            Field::new("nan", f64::NAN),
        ]);
        let value = handler().to_value(&record);
        assert_eq!(value["computed"], 42);
        assert!(value["nan"].is_null());
    }
}
