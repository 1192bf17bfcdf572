//! Logging setup for the headless runner.
//!
//! Writes to stderr. INFO+ by default; `DEBUG_LOGGING=1` raises the game crates
//! to DEBUG. A `RUST_LOG` directive overrides both.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEBUG_DIRECTIVE: &str =
    "info,invaders_core=debug,invaders_ai=debug,invaders_sim=debug,invaders_app=debug,manu_invaders=debug";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok_and(|v| v != "0");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(debug_logging)));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init()
        .is_ok()
    {
        tracing::info!(debug_logging, "logging initialized");
    }
}

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        DEBUG_DIRECTIVE
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_directive_covers_game_crates() {
        assert_eq!(filter_directive(false), "info");
        let debug = filter_directive(true);
        assert!(debug.contains("invaders_sim=debug"));
        assert!(debug.starts_with("info,"));
    }
}
