/// Logging setup
///
/// Level priority: RUST_LOG env var > settings `log_level` > "info".
/// Output goes to stderr in the compact format.
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Pick the filter directive for the subscriber.
fn directive(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Initialise the global tracing subscriber.
pub fn init(configured: Option<&str>) {
    let directive = directive(std::env::var("RUST_LOG").ok(), configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    // try_init so a second call (tests, re-entry) doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();

    tracing::debug!(
        app = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "Logging initialised"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_wins_over_settings() {
        assert_eq!(directive(Some("trace".into()), Some("warn")), "trace");
    }

    #[test]
    fn test_settings_used_without_env() {
        assert_eq!(directive(None, Some("warn")), "warn");
        assert_eq!(directive(Some("  ".into()), Some("debug")), "debug");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(directive(None, None), DEFAULT_LOG_LEVEL);
    }
}
