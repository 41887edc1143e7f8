//! CLI line rendering: `<timestamp> [<LEVEL>]: <stack-or-message>`.

use std::error::Error;
use std::fmt::{self, Write as _};

use tracing::Level;
use tracing::field::{Field, Visit};

/// Field name carrying a pre-rendered stack.
pub const STACK_FIELD: &str = "stack";

/// Fields collected from a single event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineFields {
    pub message: Option<String>,
    pub stack: Option<String>,
    pub extras: Vec<(String, String)>,
}

impl LineFields {
    /// Body of the line: the stack when one was captured, else the message.
    ///
    /// An error attached to an event with its own message keeps the message
    /// as the headline so `error!(error = ..., "Failed to parse config")`
    /// reads as `Failed to parse config: <error chain>`.
    pub fn body(&self) -> String {
        let mut body = match (&self.message, &self.stack) {
            (Some(message), Some(stack)) if !message.is_empty() => format!("{message}: {stack}"),
            (_, Some(stack)) => stack.clone(),
            (Some(message), None) => message.clone(),
            (None, None) => String::new(),
        };
        for (key, value) in &self.extras {
            let _ = write!(body, " {key}={value}");
        }
        body
    }

    fn record_value(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            STACK_FIELD => self.stack = Some(value),
            name => self.extras.push((name.to_string(), value)),
        }
    }
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_error(&mut self, _field: &Field, value: &(dyn Error + 'static)) {
        self.stack = Some(error_chain(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }
}

/// Render an error followed by its `source()` chain, one cause per line.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(rendered, "\n    caused by: {cause}");
        source = cause.source();
    }
    rendered
}

pub fn render_line(timestamp: &str, level: &Level, fields: &LineFields) -> String {
    format!("{timestamp} [{}]: {}", level.as_str(), fields.body())
}
