//! Console handler implementation

use crate::core::{
    Context, Field, FieldValue, Handler, Level, LevelVar, Output, Record, Result, TimestampFormat,
};
#[cfg(feature = "console")]
use colored::Colorize;
use std::fmt::Write as _;
use std::sync::Arc;

/// Width the level name is padded to, so messages line up.
const LEVEL_WIDTH: usize = 8;

/// Human-readable, one line per record:
///
/// `[timestamp ][file:line ]LEVEL    message key=value …`
#[derive(Debug, Clone)]
pub struct ConsoleHandler {
    output: Output,
    level: LevelVar,
    timestamp_format: TimestampFormat,
    use_colors: bool,
    group_prefix: String,
    attrs: Vec<Field>,
}

impl ConsoleHandler {
    pub fn new(output: Output, level: LevelVar) -> Self {
        Self {
            output,
            level,
            timestamp_format: TimestampFormat::default(),
            use_colors: false,
            group_prefix: String::new(),
            attrs: Vec::new(),
        }
    }

    /// Set the timestamp format for this handler
    ///
    /// # Examples
    ///
    /// ```
    /// use logkit::handlers::ConsoleHandler;
    /// use logkit::core::{LevelVar, Output, TimestampFormat};
    ///
    /// let handler = ConsoleHandler::new(Output::stdout(), LevelVar::default())
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Colour the level name with ANSI escapes.
    ///
    /// Has no effect without the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Render one record as a complete line, including the trailing newline.
    pub fn format_record(&self, record: &Record) -> String {
        let mut line = String::with_capacity(128);

        if let Some(timestamp) = self.timestamp_format.format(&record.time) {
            line.push_str(&timestamp);
            line.push(' ');
        }
        if let Some(ref caller) = record.caller {
            let _ = write!(line, "{} ", caller);
        }

        line.push_str(&self.format_level(record.level));
        line.push_str(&sanitize_message(&record.message));

        for field in &self.attrs {
            line.push(' ');
            write_field(&mut line, "", field);
        }
        for field in &record.fields {
            line.push(' ');
            write_field(&mut line, &self.group_prefix, field);
        }

        line.push('\n');
        line
    }

    pub(crate) fn derive_attrs(&self, fields: &[Field]) -> Self {
        let mut derived = self.clone();
        derived
            .attrs
            .extend(fields.iter().map(|field| field.prefixed(&self.group_prefix)));
        derived
    }

    pub(crate) fn derive_group(&self, name: &str) -> Self {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.group_prefix.push_str(name);
            derived.group_prefix.push('.');
        }
        derived
    }

    fn format_level(&self, level: Level) -> String {
        let padded = format!("{:<width$}", level.to_str(), width = LEVEL_WIDTH);
        #[cfg(feature = "console")]
        if self.use_colors {
            return padded.color(level.color_code()).to_string();
        }
        padded
    }
}

impl Handler for ConsoleHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        self.level.allows(level)
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
        self.output.write_line(&self.format_record(record))
    }

    fn with_attrs(&self, fields: &[Field]) -> Arc<dyn Handler> {
        Arc::new(self.derive_attrs(fields))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.derive_group(name))
    }
}

/// Escape line breaks so one record always stays on one line.
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn write_field(line: &mut String, prefix: &str, field: &Field) {
    if prefix.is_empty() {
        push_text(line, &field.key);
    } else {
        push_text(line, &format!("{}{}", prefix, field.key));
    }
    line.push('=');

    let value = field.value.resolve();
    match value.as_ref() {
        FieldValue::String(s) => push_text(line, s),
        FieldValue::Json(serde_json::Value::String(s)) => push_text(line, s),
        complex if complex.is_complex() => line.push_str(&complex.to_json_value().to_string()),
        scalar => {
            let _ = write!(line, "{}", scalar);
        }
    }
}

fn push_text(line: &mut String, text: &str) {
    if needs_quoting(text) {
        line.push_str(&serde_json::Value::String(text.to_string()).to_string());
    } else {
        line.push_str(text);
    }
}

fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}
