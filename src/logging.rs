//! Logger setup on top of `env_logger`.

use std::sync::Once;

/// Used when neither `--log` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "warn,raging_sea=info";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax
/// (e.g. "debug", "raging_sea=debug,wgpu=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: Option<String>) -> Self {
        Self {
            env_filter: filter,
            ..Default::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initialize the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized ({filter})");
    });
}

/// Explicit filter first, then `RUST_LOG`, then the default
fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        assert_eq!(
            resolve_filter(Some("debug".into()), Some("trace".into())),
            "debug"
        );
        assert_eq!(resolve_filter(None, Some("trace".into())), "trace");
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(Some("  ".into()), None), DEFAULT_FILTER);
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging(LoggingConfig::with_filter(Some("off".into())));
        init_logging(LoggingConfig::default());
    }
}
