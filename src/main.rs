//! # Static HTTP Server - Entry Point
//! src/main.rs
//!
//! `static_http_server [--port PORT] [--dir DIRECTORY]`

use static_http_server::config::Config;
use static_http_server::logging;
use static_http_server::server::{signals, Server};
use tracing::{error, info};

fn main() {
    let config = Config::new();
    logging::init(&config.log_level);
    config.log_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = signals::install(server.shutdown_handle()) {
        error!("{}", e);
        std::process::exit(1);
    }

    // Bloquea hasta SIGINT/SIGTERM
    server.run();
    info!("Servidor detenido");
}
