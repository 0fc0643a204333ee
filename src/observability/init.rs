//! Subscriber setup.
//!
//! Human-readable events go to stderr through a `fmt` layer; stdout stays
//! reserved for command output. When trace export is enabled, spans are also
//! sent through OpenTelemetry to a rotating OTLP/JSON file.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the trace exporter alive; flushes and shuts it down on drop.
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops trace export"]
pub struct TracingGuard {
    provider: Option<TracerProvider>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            for result in provider.force_flush() {
                if let Err(e) = result {
                    eprintln!("folio: failed to flush traces: {e}");
                }
            }
            if let Err(e) = provider.shutdown() {
                eprintln!("folio: failed to stop trace export: {e}");
            }
        }
    }
}

/// Builds the level filter.
///
/// `RUST_LOG` wins over the configured `trace_level`; an unparsable
/// directive falls back to `warn`.
fn filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.trace_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber.
///
/// Calling it twice keeps the first subscriber. Failing to prepare the trace
/// directory disables export but keeps stderr logging.
pub fn init_tracing(config: &Config) -> TracingGuard {
    let provider = config.trace_export.then(|| {
        let path = config.trace_file();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("folio: trace export disabled: {e}");
                return None;
            }
        }
        let resource = Resource::new(vec![
            KeyValue::new("service.name", "folio"),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        Some(tracer::file_tracer_provider(path, resource))
    });
    let provider = provider.flatten();

    let otel_layer = provider
        .as_ref()
        .map(|p| OpenTelemetryLayer::new(p.tracer(tracer::SCOPE)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter(config))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    TracingGuard { provider }
}
