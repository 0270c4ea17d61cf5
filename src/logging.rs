//! # Logging
//! src/logging.rs
//!
//! Subscriber de `tracing` para la consola. `RUST_LOG` tiene prioridad sobre
//! el nivel que llega por `--log-level`.

use tracing_subscriber::{fmt, EnvFilter};

/// Instala el subscriber global. Llamar una sola vez, desde `main`.
pub fn init(default_level: &str) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_level),
    };

    fmt()
        .with_env_filter(env_filter)
        .with_level(true)
        .with_target(false)
        .init();
}
