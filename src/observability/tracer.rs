//! Tracer provider exporting spans to a local OTLP/JSON file.
//!
//! Spans are exported one batch per line through [`RotatingFile`], so a long
//! CLI session never grows the trace file without bound.

use super::file_writer::RotatingFile;
use super::span_formatter::OtlpEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Instrumentation scope recorded on every exported span.
pub const SCOPE: &str = "folio";

#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    encoder: OtlpEncoder,
    stopped: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("file exporter already shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(format!("{}: {e}", self.file.path().display())))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Builds a provider that writes every finished span to `path` immediately.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(path),
        encoder: OtlpEncoder::new(resource.clone(), SCOPE),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
