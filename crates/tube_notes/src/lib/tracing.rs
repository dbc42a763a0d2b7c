use sentry_tracing::EventFilter;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const APP_NAME: &str = "tube-notes";

/// Bunyan JSON logs on stderr, filtered by `RUST_LOG` (default `info`).
/// Errors are also forwarded to sentry when a client is bound.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the notes themselves in cli mode
    let formatting_layer = BunyanFormattingLayer::new(APP_NAME.into(), std::io::stderr);

    let sentry_layer = sentry_tracing::layer().event_filter(|md| match *md.level() {
        tracing::Level::ERROR => EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    });

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .with(sentry_layer)
        .try_init()?;

    Ok(())
}
