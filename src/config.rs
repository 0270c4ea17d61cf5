//! # Configuración del Servidor
//! src/config.rs
//!
//! Argumentos CLI con respaldo en variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_http_server --port 8080 --dir ./public
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=3000 HTTP_DIR=/srv/www ./static_http_server
//! ```
//!
//! Un argumento desconocido o incompleto hace que clap imprima el uso y
//! termine el proceso con estado de error, antes de abrir el socket.

use clap::Parser;
use std::time::Duration;
use tracing::info;

/// Capacidad mínima razonable del buffer de recepción
pub const MIN_REQUEST_BYTES: usize = 16;

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "static_http_server")]
#[command(about = "Servidor HTTP/1.1 mínimo que sirve archivos de un directorio")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Directorio raíz desde el que se sirven los archivos
    #[arg(short, long, default_value = ".", env = "HTTP_DIR")]
    pub dir: String,

    /// Interfaz en la que escucha (por defecto todas)
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Capacidad del buffer de recepción; también es el largo máximo de la request line
    #[arg(long = "max-request-bytes", default_value = "1024", env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Cierra conexiones que pasen este tiempo sin enviar bytes (0 = sin límite)
    #[arg(long = "read-timeout-ms", default_value = "30000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Nivel de log por defecto; RUST_LOG tiene prioridad
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Parsea los argumentos del proceso
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `None` cuando el timeout está deshabilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.dir.is_empty() {
            return Err("Root directory must not be empty".to_string());
        }
        if self.max_request_bytes < MIN_REQUEST_BYTES {
            return Err(format!(
                "Max request bytes must be >= {}",
                MIN_REQUEST_BYTES
            ));
        }
        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(
            port = self.port,
            dir = %self.dir,
            "Server will start on port {} and serve directory {}",
            self.port,
            self.dir
        );
        info!(
            address = %self.address(),
            max_request_bytes = self.max_request_bytes,
            read_timeout_ms = self.read_timeout_ms,
            "Configuración de red"
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            dir: ".".to_string(),
            host: "0.0.0.0".to_string(),
            max_request_bytes: 1024,
            read_timeout_ms: 30_000,
            log_level: "info".to_string(),
        }
    }
}
