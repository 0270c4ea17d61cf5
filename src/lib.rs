//! # Static HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo que sirve archivos de un directorio raíz sobre
//! TCP, implementado sin frameworks HTTP.
//!
//! ## Arquitectura
//!
//! - `config`: argumentos CLI / variables de entorno
//! - `http`: request line, responses y status codes
//! - `files`: resolución de paths contra el directorio raíz
//! - `router`: decide la respuesta y si la conexión sigue abierta
//! - `server`: loop de accept, manejo de conexiones y apagado
//! - `logging`: subscriber de `tracing`
//! - `error`: errores de arranque
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_http_server::config::Config;
//! use static_http_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("bind");
//! server.run();
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
