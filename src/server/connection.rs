//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Máquina de estados por conexión:
//!
//! ```text
//! AwaitingRequest --bytes--> Dispatching --303/200--> AwaitingRequest
//!                                        --400/404--> Closed
//! AwaitingRequest --0 bytes / error de lectura--> Closed
//! ```
//!
//! Cada `read` es un fragmento y cada fragmento es un request. Si un
//! fragmento servido llenó el buffer sin llegar al fin de los headers, el
//! resto de esos headers se descarta (`SkippingHeaders`) en vez de
//! interpretarse como otro request. El fin de los headers es la primera
//! línea vacía, con CRLF o con LF suelto, igual que en el parser.
//!
//! Los errores de I/O cierran solo esta conexión; nunca llegan al listener.

use crate::http::StatusCode;
use crate::router::{Disposition, Router};
use std::io::{ErrorKind, Read, Write};
use tracing::{debug, info, warn};

/// Largo máximo de un separador de fin de headers que empieza en `\n`
/// (`\n\r\n`); lo que hay que arrastrar entre lecturas es uno menos.
const MAX_BLANK_LINE: usize = 3;

/// Por qué terminó una conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// El cliente cerró (lectura de 0 bytes)
    PeerClosed,
    /// Se respondió con un status que cierra la conexión (400, 404)
    Responded(StatusCode),
    /// El cliente no envió nada dentro del timeout de lectura
    IdleTimeout,
    /// Falló `read`
    ReadFailed,
    /// Falló `write`
    WriteFailed,
}

/// Estado de la conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    AwaitingRequest,
    /// Hay `len` bytes al inicio del buffer listos para despachar
    Dispatching { len: usize },
    /// Descartando headers que no cupieron en el fragmento anterior
    SkippingHeaders,
    Closed(CloseReason),
}

/// Resumen de una conexión terminada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSummary {
    /// Respuestas enviadas
    pub responses: usize,
    pub reason: CloseReason,
}

/// Conexión aceptada. Genérica sobre el stream para poder probarla sin sockets.
pub struct Connection<'a, S> {
    stream: S,
    router: &'a Router,
    buffer: Vec<u8>,
    /// Últimos bytes vistos mientras se descartan headers (la línea vacía
    /// puede quedar partida entre dos lecturas)
    carry: Vec<u8>,
    responses: usize,
}

impl<'a, S: Read + Write> Connection<'a, S> {
    /// `buffer_size` es la capacidad de cada lectura
    pub fn new(stream: S, router: &'a Router, buffer_size: usize) -> Self {
        Self {
            stream,
            router,
            buffer: vec![0u8; buffer_size],
            carry: Vec::new(),
            responses: 0,
        }
    }

    /// Atiende requests hasta que la conexión se cierra. El stream se suelta
    /// (y se cierra) al retornar.
    pub fn serve(mut self) -> ConnectionSummary {
        let mut state = ConnectionState::AwaitingRequest;

        loop {
            state = match state {
                ConnectionState::AwaitingRequest => self.receive(),
                ConnectionState::Dispatching { len } => self.dispatch(len),
                ConnectionState::SkippingHeaders => self.skip_headers(),
                ConnectionState::Closed(reason) => {
                    return ConnectionSummary {
                        responses: self.responses,
                        reason,
                    }
                }
            };
        }
    }

    /// Una lectura al buffer. `Err` trae el estado al que hay que pasar.
    fn read_fragment(&mut self) -> Result<usize, ConnectionState> {
        loop {
            match self.stream.read(&mut self.buffer) {
                Ok(0) => {
                    info!("No data received, closing connection");
                    return Err(ConnectionState::Closed(CloseReason::PeerClosed));
                }
                Ok(len) => return Ok(len),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    info!("Read timeout, closing idle connection");
                    return Err(ConnectionState::Closed(CloseReason::IdleTimeout));
                }
                Err(e) => {
                    warn!(error = %e, "Receive failed");
                    return Err(ConnectionState::Closed(CloseReason::ReadFailed));
                }
            }
        }
    }

    fn receive(&mut self) -> ConnectionState {
        match self.read_fragment() {
            Ok(len) => {
                debug!(
                    "Received request:\n{}",
                    String::from_utf8_lossy(&self.buffer[..len])
                );
                ConnectionState::Dispatching { len }
            }
            Err(state) => state,
        }
    }

    fn dispatch(&mut self, len: usize) -> ConnectionState {
        let routed = self.router.route(&self.buffer[..len]);
        let status = routed.response.status();

        let sent = self
            .stream
            .write_all(&routed.response.to_bytes())
            .and_then(|_| self.stream.flush());
        if let Err(e) = sent {
            warn!(error = %e, %status, "Send failed");
            return ConnectionState::Closed(CloseReason::WriteFailed);
        }
        self.responses += 1;

        match routed.disposition {
            Disposition::Close => ConnectionState::Closed(CloseReason::Responded(status)),
            Disposition::KeepOpen if self.headers_overflowed(len) => {
                debug!("Request headers exceed the receive buffer, discarding the rest");
                self.carry = tail(&self.buffer[..len]).to_vec();
                ConnectionState::SkippingHeaders
            }
            Disposition::KeepOpen => ConnectionState::AwaitingRequest,
        }
    }

    /// El fragmento llenó el buffer, trae la request line completa y no
    /// llegó al final de los headers
    fn headers_overflowed(&self, len: usize) -> bool {
        let fragment = &self.buffer[..len];
        len == self.buffer.len()
            && fragment.contains(&b'\n')
            && end_of_headers(fragment).is_none()
    }

    fn skip_headers(&mut self) -> ConnectionState {
        let len = match self.read_fragment() {
            Ok(len) => len,
            Err(state) => return state,
        };

        let mut window = std::mem::take(&mut self.carry);
        window.extend_from_slice(&self.buffer[..len]);

        match end_of_headers(&window) {
            Some(end) => {
                let rest = &window[end..];
                if rest.is_empty() {
                    ConnectionState::AwaitingRequest
                } else {
                    // lo que sigue a los headers es el próximo request
                    self.buffer[..rest.len()].copy_from_slice(rest);
                    ConnectionState::Dispatching { len: rest.len() }
                }
            }
            None => {
                self.carry = tail(&window).to_vec();
                ConnectionState::SkippingHeaders
            }
        }
    }
}

/// Índice justo después de la primera línea vacía: `\n\n`, `\n\r\n`
/// (cubre `\r\n\r\n` y `\r\n\n`)
fn end_of_headers(bytes: &[u8]) -> Option<usize> {
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'\n')
        .find_map(|(i, _)| match bytes.get(i + 1..) {
            Some([b'\n', ..]) => Some(i + 2),
            Some([b'\r', b'\n', ..]) => Some(i + 3),
            _ => None,
        })
}

/// Los bytes que pueden ser el comienzo de una línea vacía partida
fn tail(bytes: &[u8]) -> &[u8] {
    &bytes[bytes.len().saturating_sub(MAX_BLANK_LINE - 1)..]
}
