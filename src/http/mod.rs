//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Subconjunto mínimo de HTTP/1.1 implementado a mano:
//!
//! - Parsing de la request line (`METHOD PATH VERSION`)
//! - Construcción de responses con `Content-Length` siempre presente
//! - Los cuatro status codes que emite el servidor
//!
//! Los headers del request se reciben pero no se usan.

pub mod request;
pub mod response;
pub mod status;

pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
