//! Flat JSON rendering of finished spans.
//!
//! Each span becomes one self-contained JSON object, written as one line of
//! the trace file:
//!
//! ```json
//! {"service":"tunegrid","traceId":"…","spanId":"…","name":"search",
//!  "start":"2024-05-01T10:00:00.123456Z","durationUs":5120,
//!  "attributes":{"request_id":3,"term":"Alag Aasmaan"},"events":[]}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{Key, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::time::SystemTime;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRecord {
    pub service: String,
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub name: String,
    pub start: String,
    pub duration_us: u64,
    pub attributes: Map<String, JsonValue>,
    pub events: Vec<EventRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventRecord {
    pub name: String,
    pub time: String,
    pub attributes: Map<String, JsonValue>,
}

/// Converts [`SpanData`] into [`SpanRecord`]s tagged with the service name.
#[derive(Debug, Clone)]
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    /// Takes the service name from the resource's `service.name`.
    #[must_use]
    pub fn new(resource: &Resource) -> Self {
        let service = resource
            .get(Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |v| v.to_string());
        Self { service }
    }

    #[must_use]
    pub fn format_span(&self, span: &SpanData) -> SpanRecord {
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        SpanRecord {
            service: self.service.clone(),
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id: (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id)),
            name: span.name.to_string(),
            start: timestamp(span.start_time),
            duration_us,
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: event.name.to_string(),
                    time: timestamp(event.timestamp),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
            error: match &span.status {
                Status::Error { description } => Some(description.to_string()),
                Status::Unset | Status::Ok => None,
            },
        }
    }

    /// Renders `span` as a single JSON line.
    #[must_use]
    pub fn format_line(&self, span: &SpanData) -> String {
        serde_json::to_string(&self.format_span(span)).unwrap_or_else(|e| {
            format!("{{\"service\":\"{}\",\"formatError\":\"{e}\"}}", self.service)
        })
    }
}

/// RFC 3339 UTC timestamp with microsecond precision.
#[must_use]
pub fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn attribute_map(attributes: &[KeyValue]) -> Map<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect()
}

/// Maps an attribute value onto the closest JSON type.
#[must_use]
pub fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::String(s) => JsonValue::String(s.as_str().to_string()),
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn attribute_values_keep_their_json_type() {
        assert_eq!(attribute_value(&Value::Bool(true)), json!(true));
        assert_eq!(attribute_value(&Value::I64(42)), json!(42));
        assert_eq!(attribute_value(&Value::F64(1.5)), json!(1.5));
        assert_eq!(attribute_value(&Value::F64(f64::NAN)), JsonValue::Null);
        assert_eq!(attribute_value(&Value::from("Alag Aasmaan")), json!("Alag Aasmaan"));
    }

    #[test]
    fn timestamps_are_utc_micros() {
        let time = UNIX_EPOCH + Duration::from_micros(1_700_000_000_123_456);
        assert_eq!(timestamp(time), "2023-11-14T22:13:20.123456Z");
    }

    #[test]
    fn service_name_comes_from_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "tunegrid")]);
        let formatter = SpanFormatter::new(&resource);
        assert_eq!(formatter.service, "tunegrid");
    }
}
