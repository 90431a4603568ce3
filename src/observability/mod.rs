//! Structured logging and optional span export.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                           └→ tracing-opentelemetry → JsonLinesExporter → rotating file
//! ```
//!
//! The file export is only installed when `Config::trace_file` is set. The
//! active file rotates at 10 MB and keeps three numbered backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: One JSON object per span
//! - [`file_writer`]: Rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
