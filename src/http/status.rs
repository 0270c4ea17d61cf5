//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! El servidor de archivos solo emite cuatro códigos:
//!
//! - **2xx**: 200 OK (archivo servido)
//! - **3xx**: 303 See Other (redirección de `/` a `/index.html`)
//! - **4xx**: 400 Bad Request, 404 Not Found

/// Códigos de estado que puede emitir el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - Archivo encontrado y enviado
    Ok = 200,

    /// 303 See Other - Redirección de la raíz
    SeeOther = 303,

    /// 400 Bad Request - Request line ilegible o método distinto de GET
    BadRequest = 400,

    /// 404 Not Found - El archivo no existe o no se pudo abrir
    NotFound = 404,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use static_http_server::http::StatusCode;
    /// assert_eq!(StatusCode::SeeOther.as_u16(), 303);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use static_http_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::SeeOther => "See Other",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
