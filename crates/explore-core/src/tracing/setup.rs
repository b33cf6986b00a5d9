//! Subscriber setup for the design engine.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "EXPLORE_LOG";

/// Directives used when `EXPLORE_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "explore_core=info,explore_design=info,explore_storage=info";

/// Filter for the given directives, e.g.
/// `explore_design=debug,explore_storage=warn`. `None` or malformed
/// directives fall back to [`DEFAULT_DIRECTIVES`].
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber, filtered by `EXPLORE_LOG`. Only the first
/// call has an effect, and an already-installed subscriber is left alone.
pub fn init_tracing() {
    INIT.call_once(|| {
        let directives = std::env::var(LOG_ENV_VAR).ok();
        let subscriber = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(build_filter(directives.as_deref()));
        if subscriber.try_init().is_err() {
            tracing::debug!("global subscriber already set");
        }
    });
}
