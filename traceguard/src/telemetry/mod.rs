//! Telemetry export boundary and tracing setup.

mod sink;

pub use sink::{CollectingSink, LoggingSink, NoOpSink, TelemetrySink};

use crate::payload::Payload;
use crate::session::ExportConfig;
use tracing_subscriber::EnvFilter;

/// Applies the config's transform to `payload` and submits the result.
///
/// This is the one place a payload crosses the process boundary; only the
/// transformed payload is ever handed to the sink. The conversational
/// response path is untouched by anything here.
pub async fn export(config: &ExportConfig, sink: &dyn TelemetrySink, payload: Payload) {
    let redacted = config.transform().transform(payload);
    sink.submit(redacted, config.metadata()).await;
}

/// Initializes the global tracing subscriber from `RUST_LOG`, defaulting
/// to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
