use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::{RefresherError, RefresherResult};

/// Span fields only useful to machines, kept out of the pretty output.
const FIELDS_TO_SKIP: &[&str] = &["correlation_id", "span_type"];

/// Span fields recorded by [`FieldCollectorLayer`], stored in the span extensions.
#[derive(Debug, Clone, Default)]
pub struct CollectedSpanFields {
    pub display: String,
    pub raw_fields: HashMap<String, String>,
}

impl CollectedSpanFields {
    fn add_field(&mut self, name: &str, value: String) {
        if !FIELDS_TO_SKIP.contains(&name) {
            if !self.display.is_empty() {
                self.display.push_str(", ");
            }
            self.display.push_str(&format!("{name}={value}"));
        }
        self.raw_fields.insert(name.to_string(), value);
    }
}

impl Visit for CollectedSpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.add_field(field.name(), format!("{value:?}").trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.add_field(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.add_field(field.name(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.add_field(field.name(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.add_field(field.name(), value.to_string());
    }
}

/// Copies span fields into the span extensions so the formatters can print them on every event.
pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut fields = CollectedSpanFields::default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut extensions = span.extensions_mut();
        let mut fields = extensions.remove::<CollectedSpanFields>().unwrap_or_default();
        values.record(&mut fields);
        extensions.insert(fields);
    }
}

#[derive(Default)]
struct EventFields {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{value:?}").trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

/// Console formatter: `timestamp | level | method | message (fields)`.
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Utc::now().format("%y-%m-%d %H:%M:%S");

        let ts_color = "\x1b[96m";
        let level_color = match *meta.level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };
        let method_color = "\x1b[92m";
        let field_color = "\x1b[90m";
        let reset = "\x1b[0m";

        let method = ctx
            .lookup_current()
            .and_then(|span| {
                span.scope()
                    .find_map(|s| s.extensions().get::<CollectedSpanFields>()?.raw_fields.get("method").cloned())
            })
            .unwrap_or_else(|| "-".to_string());

        let mut visitor = EventFields::default();
        event.record(&mut visitor);

        write!(writer, "{ts_color}{now}{reset} {field_color}|{reset} ")?;
        write!(writer, "{level_color}{:<5}{reset} {field_color}|{reset} ", meta.level())?;
        write!(writer, "{method_color}{method:<10}{reset} {field_color}|{reset} ")?;
        write!(writer, "{}", visitor.message)?;

        if !visitor.fields.is_empty() {
            let fields: Vec<String> =
                visitor.fields.iter().map(|(name, value)| format!("{field_color}{name}={value}{reset}")).collect();
            write!(writer, " ({})", fields.join(", "))?;
        }

        writeln!(writer)
    }
}

/// One JSON object per line, span fields merged under `fields`.
pub struct JsonEventFormatter;

#[derive(Default)]
struct JsonFieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for JsonFieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{value:?}").trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }
}

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let mut visitor = JsonFieldVisitor::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        if let Some(line) = meta.line() {
            root.insert("line_number".to_string(), Value::from(line));
        }
        if let Some(message) = visitor.message.take() {
            root.insert("message".to_string(), Value::String(message));
        }

        let mut fields = visitor.fields;
        if let Some(span) = ctx.lookup_current() {
            fields.insert("span_name".to_string(), Value::String(span.metadata().name().to_string()));
            for span in span.scope().from_root() {
                if let Some(collected) = span.extensions().get::<CollectedSpanFields>() {
                    for (key, value) in &collected.raw_fields {
                        fields.entry(key.clone()).or_insert_with(|| Value::String(value.clone()));
                    }
                }
            }
        }
        if !fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` drives the filter (default `info`), `LOG_FORMAT=json` switches from the console
/// formatter to JSON lines.
pub fn init_logging() -> RefresherResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").map(|format| format == "json").unwrap_or(false);

    let fmt_layer = if json {
        fmt::layer().with_target(true).event_format(JsonEventFormatter).boxed()
    } else {
        fmt::layer().with_target(true).event_format(PrettyFormatter).boxed()
    };

    let subscriber = Registry::default().with(env_filter).with(FieldCollectorLayer).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| RefresherError::ConfigError(format!("Failed to set global default subscriber: {e}")))
}
