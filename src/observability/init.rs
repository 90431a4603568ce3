//! Tracing subscriber setup.

use super::tracer;
use crate::infrastructure::paths::{ensure_parent_dir, resolve_trace_file};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "tunegrid";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level` (default `info`). Events are printed to stderr. When
/// `config.trace_file` is set, spans are also exported to that file as JSON
/// lines; a relative path is placed in the tunegrid data directory.
///
/// Only the first call in a process installs anything. A trace file that
/// cannot be prepared disables file export and is reported as a warning.
///
/// # Example
///
/// ```rust
/// use tunegrid::observability::init_tracing;
/// use tunegrid::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (otel_layer, export_error) = match config.trace_file.as_deref().map(resolve_trace_file) {
        None => (None, None),
        Some(path) => match ensure_parent_dir(&path) {
            Ok(()) => {
                let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
                let provider = tracer::create_tracer_provider(path, resource);
                (Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME))), None)
            }
            Err(e) => (None, Some((path, e))),
        },
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if let Some((path, e)) = export_error {
        tracing::warn!(path = %path.display(), error = %e, "trace file export disabled");
    }
    tracing::debug!(installed = installed, "tracing initialized");
}
