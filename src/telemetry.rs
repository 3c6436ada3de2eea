//! Tracing subscriber: console, daily rolling log files and, optionally, OTLP export.
use std::{path::Path, time::Duration};

use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

pub const SERVICE_NAME: &str = "bmtc_transit_api";

/// Has to be kept alive for as long as the process logs. Dropping it flushes the log files.
pub struct TelemetryGuard {
    _file_guard: WorkerGuard,
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Flushes the spans that haven't been exported yet
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::error!("error shutting down the tracer provider: {e}");
            }
        }
    }
}

pub fn init_tracing(log_dir: &Path, otlp_endpoint: Option<&str>) -> anyhow::Result<TelemetryGuard> {
    let provider = otlp_endpoint.map(tracer_provider).transpose()?;

    let telemetry_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_NAME)));

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = tracing_appender::rolling::daily(log_dir, format!("{SERVICE_NAME}.log"));
    let (non_blocking_appender, file_guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    let console_log = tracing_subscriber::fmt::layer();

    Registry::default()
        .with(telemetry_layer)
        .with(file_log)
        .with(console_log)
        .with(env_filter)
        .try_init()
        .context("couldn't install the tracing subscriber")?;

    Ok(TelemetryGuard {
        _file_guard: file_guard,
        provider,
    })
}

fn tracer_provider(endpoint: &str) -> anyhow::Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_timeout(Duration::from_millis(1000))
        .with_endpoint(endpoint)
        .with_protocol(Protocol::Grpc)
        .build()
        .context("couldn't build the OTLP span exporter")?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .build())
}
