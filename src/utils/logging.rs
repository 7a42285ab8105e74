//! Logging utilities
//!
//! Provides logging setup for the command line tool.

/// Setup logging, honouring `RUST_LOG` and defaulting to warnings
pub fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
