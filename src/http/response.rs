//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Las respuestas se serializan en un buffer que crece con el body, así que
//! un archivo grande nunca se trunca.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>hola</h1>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_http_server::http::{Response, StatusCode};
//!
//! let response = Response::redirect("/index.html");
//! assert_eq!(response.status(), StatusCode::SeeOther);
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 303 See Other\r\n"));
//! ```

use super::StatusCode;

/// Respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// Headers en el orden en que se agregaron (sin duplicados)
    headers: Vec<(String, String)>,

    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin body. `Content-Length: 0` ya viene puesto.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
        .with_body_bytes(Vec::new())
    }

    /// Alias de `new` para las respuestas de error, que nunca llevan body
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status)
    }

    /// 303 See Other con `Location`
    pub fn redirect(location: &str) -> Self {
        Self::new(StatusCode::SeeOther).with_header("Location", location)
    }

    /// 200 OK con `Content-Type: text/html` y el contenido del archivo
    ///
    /// # Ejemplo
    /// ```
    /// use static_http_server::http::Response;
    ///
    /// let response = Response::html(b"<p>hola</p>".to_vec());
    /// assert_eq!(response.header("Content-Length"), Some("11"));
    /// ```
    pub fn html(content: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html")
            .with_body_bytes(content)
    }

    /// Agrega un header. Si ya existe, se sobrescribe en su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el body y recalcula `Content-Length`
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        let length = body.len().to_string();
        self.body = body;
        self.add_header("Content-Length", &length);
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {}\r\n", self.status);
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Busca un header sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response_has_zero_length() {
        let response = Response::new(StatusCode::NotFound);
        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.header("Content-Length"), Some("0"));
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_redirect() {
        let response = Response::redirect("/index.html");
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert_eq!(
            text,
            "HTTP/1.1 303 See Other\r\nContent-Length: 0\r\nLocation: /index.html\r\n\r\n"
        );
    }

    #[test]
    fn test_html_response() {
        let response = Response::html(b"<h1>hola</h1>".to_vec());
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/html\r\n"));
        assert!(text.contains("Content-Length: 13\r\n"));
        assert!(text.ends_with("\r\n\r\n<h1>hola</h1>"));
    }

    #[test]
    fn test_header_overwrite_keeps_single_entry() {
        let response = Response::new(StatusCode::Ok)
            .with_header("X-Test", "a")
            .with_header("x-test", "b");

        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert_eq!(response.header("X-Test"), Some("b"));
        assert_eq!(text.to_ascii_lowercase().matches("x-test:").count(), 1);
        assert!(text.contains("X-Test: b\r\n"));
    }

    #[test]
    fn test_body_larger_than_receive_buffer_is_not_truncated() {
        let content = vec![b'x'; 64 * 1024];
        let response = Response::html(content.clone());
        let bytes = response.to_bytes();

        assert_eq!(response.header("Content-Length"), Some("65536"));
        assert!(bytes.ends_with(&content));
    }

    #[test]
    fn test_binary_body() {
        let data = vec![0x00, 0x01, 0x02, 0xFF];
        let response = Response::html(data.clone());

        assert_eq!(response.body(), &data[..]);
        assert_eq!(response.header("Content-Length"), Some("4"));
    }
}
