//! # Despacho de Requests
//! src/router/mod.rs
//!
//! Decide la respuesta para un fragmento recibido y si la conexión sigue
//! abierta después de enviarla.
//!
//! ```text
//! fragmento → "GET / "?  → 303 Location: /index.html      (sigue abierta)
//!           → parse      → 400 Bad Request                (se cierra)
//!           → resolve    → 400 Bad Request si sale de la raíz (se cierra)
//!           → read       → 404 Not Found                  (se cierra)
//!           → 200 OK + contenido                          (sigue abierta)
//! ```

use crate::files::StaticFiles;
use crate::http::{Request, Response, StatusCode};
use tracing::{debug, info, warn};

/// Prefijo literal que dispara la redirección de la raíz
pub const ROOT_REDIRECT_PREFIX: &[u8] = b"GET / ";

/// Destino de la redirección de la raíz
pub const INDEX_LOCATION: &str = "/index.html";

/// Qué hacer con la conexión después de responder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Volver a esperar otro request en la misma conexión
    KeepOpen,
    /// Cerrar la conexión
    Close,
}

/// Respuesta ya decidida para un fragmento
#[derive(Debug, Clone)]
pub struct Routed {
    pub response: Response,
    pub disposition: Disposition,
}

impl Routed {
    fn keep_open(response: Response) -> Self {
        Self {
            response,
            disposition: Disposition::KeepOpen,
        }
    }

    fn close(status: StatusCode) -> Self {
        Self {
            response: Response::empty(status),
            disposition: Disposition::Close,
        }
    }
}

/// Router de archivos estáticos
#[derive(Debug, Clone)]
pub struct Router {
    files: StaticFiles,
    max_request_bytes: usize,
}

impl Router {
    pub fn new(files: StaticFiles, max_request_bytes: usize) -> Self {
        Self {
            files,
            max_request_bytes,
        }
    }

    /// Despacha un fragmento recibido
    ///
    /// # Ejemplo
    /// ```
    /// use static_http_server::files::StaticFiles;
    /// use static_http_server::http::StatusCode;
    /// use static_http_server::router::{Disposition, Router};
    ///
    /// let router = Router::new(StaticFiles::new("."), 1024);
    ///
    /// let routed = router.route(b"GET / HTTP/1.1\r\n\r\n");
    /// assert_eq!(routed.response.status(), StatusCode::SeeOther);
    /// assert_eq!(routed.disposition, Disposition::KeepOpen);
    ///
    /// let routed = router.route(b"POST /x HTTP/1.1\r\n\r\n");
    /// assert_eq!(routed.response.status(), StatusCode::BadRequest);
    /// assert_eq!(routed.disposition, Disposition::Close);
    /// ```
    pub fn route(&self, fragment: &[u8]) -> Routed {
        if fragment.starts_with(ROOT_REDIRECT_PREFIX) {
            debug!("Root requested, redirecting to {}", INDEX_LOCATION);
            return Routed::keep_open(Response::redirect(INDEX_LOCATION));
        }

        let request = match Request::parse_with_limit(fragment, self.max_request_bytes) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Bad request");
                return Routed::close(StatusCode::BadRequest);
            }
        };

        let resolved = match self.files.resolve(request.path()) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(error = %e, "Rejected path outside root directory");
                return Routed::close(StatusCode::BadRequest);
            }
        };

        match self.files.read(&resolved) {
            Some(content) => {
                info!(
                    query = ?request.query(),
                    "{} {} -> {} bytes",
                    request.method().as_str(),
                    request.path(),
                    content.len()
                );
                Routed::keep_open(Response::html(content))
            }
            None => {
                info!(
                    "{} {} -> {}",
                    request.method().as_str(),
                    request.path(),
                    StatusCode::NotFound
                );
                Routed::close(StatusCode::NotFound)
            }
        }
    }
}
