//! Tracing initialization.
//!
//! Logs go to stderr so that the `products` and `upload` subcommands keep stdout for their
//! output. The filter comes from `RUST_LOG` when set, otherwise from the directive the caller
//! passes in (`info` for the server, `warn` for one-shot commands).

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing with a console fmt layer.
pub fn init_telemetry(default_directive: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
