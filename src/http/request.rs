//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! El servidor solo mira la primera línea de cada fragmento recibido.
//!
//! ## Formato
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n      <- ignorado
//! \r\n
//! ```
//!
//! Los tokens se separan por espacios en blanco y la línea termina en CRLF
//! (también se acepta LF suelto o el fin del fragmento). La versión es
//! opcional: `GET /a.html` sin versión se sirve igual.

use thiserror::Error;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un archivo
    GET,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Cualquier método distinto de `GET` es `UnsupportedMethod`
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

/// Request line parseada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,

    /// Path sin query ni fragmento (ej: "/docs/a.html")
    path: String,

    /// Query string cruda, sin el '?'
    query: Option<String>,

    /// Versión HTTP si el cliente la envió
    version: Option<String>,
}

/// Errores que pueden ocurrir durante el parsing.
///
/// Todos se responden con 400 Bad Request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fragmento vacío o solo espacios
    #[error("Empty request")]
    EmptyRequest,

    /// No se pudo extraer un path de la request line
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Método distinto de GET
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// La request line no cabe en el buffer de recepción
    #[error("Request line exceeds {limit} bytes")]
    RequestLineTooLong { limit: usize },

    /// Path que no empieza con '/' o que intenta salir del directorio raíz
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl Request {
    /// Parsea la request line sin límite de longitud
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_http_server::http::Request;
    ///
    /// let request = Request::parse(b"GET /index.html HTTP/1.1\r\n\r\n").unwrap();
    ///
    /// assert_eq!(request.path(), "/index.html");
    /// assert_eq!(request.version(), Some("HTTP/1.1"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with_limit(buffer, usize::MAX)
    }

    /// Parsea la request line de un fragmento recibido.
    ///
    /// `max_line` es la capacidad del buffer de recepción: un fragmento que
    /// lo llenó sin traer fin de línea se rechaza en vez de truncarse.
    pub fn parse_with_limit(buffer: &[u8], max_line: usize) -> Result<Self, ParseError> {
        let line = match buffer.iter().position(|&b| b == b'\n') {
            Some(end) => &buffer[..end],
            None if buffer.len() >= max_line => {
                return Err(ParseError::RequestLineTooLong { limit: max_line })
            }
            None => buffer,
        };
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidRequestLine)?;

        if line.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        Self::parse_request_line(line)
    }

    /// Formato: `METHOD PATH [VERSION]`. Tokens extra se ignoran.
    fn parse_request_line(line: &str) -> Result<Self, ParseError> {
        let mut parts = line.split_ascii_whitespace();

        let method = parts
            .next()
            .ok_or(ParseError::EmptyRequest)
            .and_then(Method::from_str)?;

        let target = parts.next().ok_or(ParseError::InvalidRequestLine)?;
        if !target.starts_with('/') {
            return Err(ParseError::InvalidPath(target.to_string()));
        }

        let (path, query) = Self::split_target(target);
        let version = parts.next().map(str::to_string);

        Ok(Request {
            method,
            path,
            query,
            version,
        })
    }

    /// Separa path y query; el fragmento (`#...`) se descarta
    ///
    /// Ejemplo: "/a.html?v=2#top" -> ("/a.html", Some("v=2"))
    fn split_target(target: &str) -> (String, Option<String>) {
        let target = target.split('#').next().unwrap_or(target);

        match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
