//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Loop de accept con un thread por conexión. Los threads solo comparten la
//! configuración y el router (ambos inmutables, detrás de `Arc`).
//!
//! Un fallo en `accept` se registra y el loop sigue. Solo el apagado pedido
//! por `ShutdownHandle` termina el loop; las conexiones en curso no se
//! esperan.

use super::connection::Connection;
use super::shutdown::{Shutdown, ShutdownHandle};
use crate::config::Config;
use crate::error::ServerError;
use crate::files::StaticFiles;
use crate::router::Router;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use tracing::{info, info_span, warn};

/// Servidor de archivos estáticos ya enlazado a su puerto
pub struct Server {
    config: Arc<Config>,
    router: Arc<Router>,
    listener: TcpListener,
    local_addr: SocketAddr,
    shutdown: Shutdown,
}

impl Server {
    /// Valida la configuración y abre el socket. Cualquier fallo acá es fatal.
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        config.validate().map_err(ServerError::Config)?;

        let address = config.address();
        info!("Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;
        info!("Server is listening on port {}", local_addr.port());

        let router = Router::new(StaticFiles::new(config.dir.clone()), config.max_request_bytes);

        Ok(Self {
            config: Arc::new(config),
            router: Arc::new(router),
            listener,
            local_addr,
            shutdown: Shutdown::new(local_addr),
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.handle()
    }

    /// Acepta conexiones hasta que se pida el apagado. Al retornar el
    /// listener se cierra.
    pub fn run(self) {
        for stream in self.listener.incoming() {
            if self.shutdown.is_requested() {
                break;
            }

            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => warn!(error = %e, "Accept failed"),
            }
        }

        info!("Listener on {} closed", self.local_addr);
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let config = Arc::clone(&self.config);
        let router = Arc::clone(&self.router);

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || handle_connection(stream, &peer, &config, &router));

        if let Err(e) = spawned {
            warn!(error = %e, "Could not spawn connection thread");
        }
    }
}

fn handle_connection(stream: TcpStream, peer: &str, config: &Config, router: &Router) {
    let span = info_span!("connection", peer = %peer);
    let _guard = span.enter();

    info!("Connection accepted");

    if let Err(e) = stream.set_read_timeout(config.read_timeout()) {
        warn!(error = %e, "Could not set read timeout");
    }

    let summary = Connection::new(stream, router, config.max_request_bytes).serve();
    info!(
        responses = summary.responses,
        reason = ?summary.reason,
        "Connection closed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    fn local_config(dir: &TempDir) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            dir: dir.path().to_str().unwrap().to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_bind_ephemeral_port() {
        let dir = TempDir::new().unwrap();
        let server = Server::bind(local_config(&dir)).unwrap();

        assert_ne!(server.local_addr().port(), 0);
    }

    #[test]
    fn test_bind_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let mut config = local_config(&dir);
        config.max_request_bytes = 1;

        assert!(matches!(Server::bind(config), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_bind_port_in_use() {
        let dir = TempDir::new().unwrap();
        let first = Server::bind(local_config(&dir)).unwrap();

        let mut config = local_config(&dir);
        config.port = first.local_addr().port();

        assert!(matches!(Server::bind(config), Err(ServerError::Bind { .. })));
    }

    #[test]
    fn test_run_serves_and_stops() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.html"), b"a").unwrap();

        let server = Server::bind(local_config(&dir)).unwrap();
        let addr = server.local_addr();
        let handle = server.shutdown_handle();
        let t = thread::spawn(move || server.run());

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /missing HTTP/1.1\r\n\r\n").unwrap();
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        assert!(String::from_utf8_lossy(&buf).starts_with("HTTP/1.1 404 Not Found"));

        handle.trigger();
        t.join().unwrap();

        assert!(TcpStream::connect(addr).is_err());
    }
}
