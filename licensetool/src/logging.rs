use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Pick the log level from the command line flags.
///
/// An explicit `--log-level` wins over `--debug`, which wins over `--verbose`.
pub fn resolve_level(log_level: Option<&str>, verbose: bool, debug: bool) -> Level {
    if let Some(level) = log_level {
        return parse_level(level);
    }
    if debug {
        Level::DEBUG
    } else if verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::WARN,
    }
}

/// Install the global subscriber. `RUST_LOG` directives are honoured on
/// top of the given default level.
pub fn setup_logging(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(resolve_level(None, false, false), Level::WARN);
    }

    #[test]
    fn test_flag_levels() {
        assert_eq!(resolve_level(None, true, false), Level::INFO);
        assert_eq!(resolve_level(None, false, true), Level::DEBUG);
        assert_eq!(resolve_level(None, true, true), Level::DEBUG);
    }

    #[test]
    fn test_explicit_level_wins() {
        assert_eq!(resolve_level(Some("error"), true, true), Level::ERROR);
        assert_eq!(resolve_level(Some("TRACE"), false, false), Level::TRACE);
        assert_eq!(resolve_level(Some("bogus"), false, true), Level::WARN);
    }
}
