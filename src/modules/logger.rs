// 日志初始化
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "hangul_relay_lib=info,tower_http=info";
const LOG_FILE_PREFIX: &str = "hangul-relay.log";

/// Installs the global subscriber.
///
/// Console output is always on. When `LOG_DIR` is set a daily rolling file is
/// added; the returned guard must be held for the lifetime of the process.
pub fn init_logger() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console = fmt::layer().with_target(false);

    match std::env::var("LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir.trim(), LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer().with_writer(writer).with_ansi(false);

            if let Err(e) = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file)
                .try_init()
            {
                eprintln!("logger already initialised: {}", e);
            }
            Some(guard)
        }
        _ => {
            if let Err(e) = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init()
            {
                eprintln!("logger already initialised: {}", e);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_targets_this_crate() {
        let crate_directive = concat!(env!("CARGO_CRATE_NAME"), "=info");
        assert!(DEFAULT_FILTER.split(',').any(|d| d == crate_directive));
        assert!(DEFAULT_FILTER.split(',').any(|d| d == "tower_http=info"));
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        std::env::remove_var("LOG_DIR");
        assert!(init_logger().is_none());
        assert!(init_logger().is_none());
        tracing::info!("logger still usable");
    }
}
