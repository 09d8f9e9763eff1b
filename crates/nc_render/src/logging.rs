use std::collections::VecDeque;
use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Prepends a fixed set of prefixes to every message it forwards to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefixes.push_back(prefix);
        self
    }

    fn prefixed(&self, message: &str) -> String {
        let prefix = self.prefixes.iter().map(|p| format!("{} ", p)).collect::<String>();
        format!("{}{}", prefix, message)
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.prefixed(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.prefixed(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.prefixed(message));
    }
}

/// Installs a fmt subscriber at INFO unless the host already set one.
pub fn init_logging() -> Logger {
    init_logging_with_level(Level::INFO)
}

pub fn init_logging_with_level(level: Level) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
        });
    }
    Logger::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_joined_in_order() {
        let logger = Logger::new()
            .with_prefix("[cards]".to_string())
            .with_prefix("[registry]".to_string());
        assert_eq!(logger.prefixed("ready"), "[cards] [registry] ready");
        assert_eq!(Logger::new().prefixed("ready"), "ready");
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging().debug("first");
        init_logging_with_level(Level::DEBUG).debug("second");
    }
}
