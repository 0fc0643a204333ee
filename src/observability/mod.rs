//! Logging and optional OpenTelemetry trace export.
//!
//! ```text
//! tracing macros ─┬─▶ fmt layer ──▶ stderr
//!                 └─▶ tracing-opentelemetry ──▶ SDK ──▶ FileSpanExporter ──▶ otlp.json
//! ```
//!
//! # Configuration
//!
//! The level comes from `RUST_LOG` when set, otherwise from `trace_level` in
//! the config file (default `warn`). File export is off unless
//! `trace_export = true`; the file lives at `trace_file` or
//! `~/.local/share/folio/otlp.json` and rotates at 10 MB, keeping three
//! backups.
//!
//! # Modules
//!
//! - `init`: Subscriber setup and the flush-on-drop guard
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP/JSON encoding
//! - `file_writer`: Size-rotated line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TracingGuard};
