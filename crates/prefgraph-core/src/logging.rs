use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{LoggingConfig, PrefGraphError, Result};

/// Install the global tracing subscriber.
///
/// The filter comes from `config.level` alone. `RUST_LOG` and
/// `PREFGRAPH_LOG_LEVEL` are folded into it by `ConfigManager`, the latter
/// taking precedence. Fails (instead of panicking) if a global subscriber is
/// already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(level_filter(config)?);
    let installed = match config.format.as_str() {
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };
    installed.map_err(|e| PrefGraphError::Logging(e.to_string()))
}

fn level_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let level = config.level.trim();
    EnvFilter::try_new(if level.is_empty() { "warn" } else { level })
        .map_err(|e| PrefGraphError::Logging(e.to_string()))
}
