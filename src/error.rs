//! # Errores del Servidor
//! src/error.rs
//!
//! Solo los errores de arranque llegan hasta `main`. Los errores de una
//! conexión se registran y cierran esa conexión, nada más.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuración inválida
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No se pudo abrir el socket en la dirección pedida
    #[error("Bind failed on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// El listener no pudo reportar su dirección local
    #[error("Could not read listener address: {0}")]
    LocalAddr(#[source] std::io::Error),

    /// No se pudo registrar el manejador de señales
    #[error("Could not install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_message() {
        let err = ServerError::Bind {
            address: "0.0.0.0:80".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("Bind failed on 0.0.0.0:80"));
    }

    #[test]
    fn test_config_error_message() {
        let err = ServerError::Config("Root directory must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Root directory must not be empty"
        );
    }
}
