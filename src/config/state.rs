// Application state module
// Runtime state shared across connection tasks

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,

    /// Copied out of `config` at startup; never changes afterwards
    pub access_log: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            access_log: config.logging.access_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_log_flag_mirrors_config() {
        let mut cfg = Config::load_from("/nonexistent/qr-viewer-config").expect("defaults load");
        assert!(AppState::new(&cfg).access_log);

        cfg.logging.access_log = false;
        assert!(!AppState::new(&cfg).access_log);
    }
}
