//! Logging setup for the application.

use crate::config::GlobalLogLevel;
use env_logger::{Builder, Env};
use log::LevelFilter;

impl From<GlobalLogLevel> for LevelFilter {
    fn from(level: GlobalLogLevel) -> Self {
        match level {
            GlobalLogLevel::Trace => Self::Trace,
            GlobalLogLevel::Debug => Self::Debug,
            GlobalLogLevel::Info => Self::Info,
            GlobalLogLevel::Warn => Self::Warn,
            GlobalLogLevel::Error => Self::Error,
        }
    }
}

/// Initializes the logger.
///
/// `RUST_LOG` is read first (defaulting to `info`), then the global level from
/// the resolved settings is applied on top. A second call keeps the existing logger.
pub fn init_logger(level: GlobalLogLevel) {
    let env = Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);

    builder.filter_level(level.into());

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
        return;
    }

    log::debug!("Logger initialized with global log level: {:?}", level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_filters() {
        assert_eq!(LevelFilter::from(GlobalLogLevel::Trace), LevelFilter::Trace);
        assert_eq!(LevelFilter::from(GlobalLogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(GlobalLogLevel::Error), LevelFilter::Error);
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_logger(GlobalLogLevel::Info);
        init_logger(GlobalLogLevel::Debug);
    }
}
