//! # Telemetry
//!
//! Every span and event goes through `tracing`. Two layers consume them:
//!
//! - A `fmt` layer printing human-readable (or JSON) logs to the console.
//! - A `tracing-opentelemetry` layer turning spans into OpenTelemetry spans,
//!   exported in batches over OTLP/gRPC to the configured collector.
//!
//! ## Span behavior
//!
//! - Spans created via `tracing::instrument` or `tracing::info_span!` are
//!   exported to the collector.
//! - Events (`tracing::info!`, etc.) inside a span become span events.
//! - Events outside of a span are only shown in log output.
//! - Recording `otel.status_description` on a span marks its OpenTelemetry
//!   status as error with that description.
//! - Handler spans are parented on the trace context (W3C `traceparent` and
//!   `baggage`) extracted from request metadata by the global propagator.
//!
//! ## Feature matrix
//!
//! - `stdout`: additionally prints every exported span to stdout via
//!   `opentelemetry-stdout`.
//!
//! ```bash
//! OTEL_EXPORTER_OTLP_ENDPOINT=localhost:4317 cargo run --features stdout
//! ```

use crate::server::{
    config::{LogFormat, ServerConfig},
    service::propagation,
};
use anyhow::Context;
use core::time::Duration;
use opentelemetry::{InstrumentationScope, KeyValue, trace::TracerProvider};
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::{Resource, trace as sdktrace};
use opentelemetry_semantic_conventions as semvcns;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Service name reported on every exported span.
pub const SERVICE_NAME: &str = "shippingservice";

pub struct TelemetryProviders {
    pub tracer_provider: sdktrace::SdkTracerProvider,
}

impl TelemetryProviders {
    /// Flushes pending spans and shuts the exporter down. Failures are printed
    /// to stderr since the subscriber may already be unusable.
    pub fn shutdown(&self) {
        if let Err(err) = self.tracer_provider.force_flush() {
            eprintln!("Error flushing traces: {:#?}", err);
        }
        if let Err(err) = self.tracer_provider.shutdown() {
            eprintln!("Error shutting down tracer: {:#?}", err);
        }
    }
}

pub fn init_telemetry(config: &ServerConfig) -> anyhow::Result<TelemetryProviders> {
    opentelemetry::global::set_text_map_propagator(propagation::propagator());

    let tracer_provider = init_tracer(&config.otlp_endpoint)?;

    let scope = InstrumentationScope::builder(SERVICE_NAME)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_schema_url(semvcns::SCHEMA_URL)
        .build();

    let pretty = (config.log_format == LogFormat::Pretty).then(|| {
        tracing_subscriber::fmt::layer()
            .with_thread_ids(true)
            .with_line_number(true)
            .with_target(false)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
            .with_file(true)
            .pretty()
    });
    let json = (config.log_format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
            .with_current_span(true)
    });

    opentelemetry::global::set_tracer_provider(tracer_provider.clone());

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(pretty)
        .with(json)
        .with(
            tracing_opentelemetry::layer()
                .with_tracer(tracer_provider.tracer_with_scope(scope))
                .with_error_records_to_exceptions(true),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(endpoint = %config.otlp_endpoint, "exporting to OTLP collector");

    Ok(TelemetryProviders { tracer_provider })
}

fn resource() -> Resource {
    Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_schema_url(
            [KeyValue::new(
                semvcns::resource::SERVICE_VERSION,
                env!("CARGO_PKG_VERSION"),
            )],
            semvcns::SCHEMA_URL,
        )
        .build()
}

fn batch_config() -> sdktrace::BatchConfig {
    sdktrace::BatchConfigBuilder::default()
        .with_scheduled_delay(Duration::from_secs(5))
        .with_max_queue_size(2048)
        .build()
}

fn init_tracer(endpoint: &str) -> anyhow::Result<sdktrace::SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(10))
        .with_protocol(Protocol::Grpc)
        .build()
        .context("failed to initialize span exporter")?;

    let batch = sdktrace::BatchSpanProcessor::builder(exporter)
        .with_batch_config(batch_config())
        .build();

    let builder = sdktrace::SdkTracerProvider::builder()
        .with_resource(resource())
        .with_sampler(sdktrace::Sampler::AlwaysOn)
        .with_span_processor(batch);

    #[cfg(feature = "stdout")]
    let builder = {
        use opentelemetry_stdout::SpanExporter;
        let batch = sdktrace::BatchSpanProcessor::builder(SpanExporter::default())
            .with_batch_config(batch_config())
            .build();
        builder.with_span_processor(batch)
    };

    Ok(builder.build())
}
