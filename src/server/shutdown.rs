//! # Coordinador de Apagado
//! src/server/shutdown.rs
//!
//! El loop de accept está bloqueado en `accept()`, así que no basta con
//! levantar una bandera: `trigger()` además abre una conexión contra el
//! propio listener para despertarlo. El loop ve la bandera, suelta el
//! listener y `Server::run` retorna. Si la conexión de despertar falla,
//! `trigger()` lo informa y quien lo llamó decide cómo terminar.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Estado de apagado compartido por el listener y quien lo detiene
#[derive(Debug)]
pub struct Shutdown {
    handle: ShutdownHandle,
}

/// Referencia clonable para pedir el apagado desde otro thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl Shutdown {
    /// `listen_addr` es la dirección real del listener (con el puerto ya asignado)
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            handle: ShutdownHandle {
                requested: Arc::new(AtomicBool::new(false)),
                wake_addr: wake_address(listen_addr),
            },
        }
    }

    pub fn handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    pub fn is_requested(&self) -> bool {
        self.handle.is_requested()
    }
}

impl ShutdownHandle {
    /// Pide el apagado y despierta al listener. Llamarlo más de una vez no hace nada.
    ///
    /// Devuelve `false` solo si el listener no pudo despertarse; en ese caso
    /// `accept()` puede seguir bloqueado hasta la próxima conexión.
    pub fn trigger(&self) -> bool {
        if self.requested.swap(true, Ordering::SeqCst) {
            return true;
        }

        match TcpStream::connect_timeout(&self.wake_addr, WAKE_TIMEOUT) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, addr = %self.wake_addr, "Could not wake listener");
                false
            }
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Un listener en 0.0.0.0 / [::] se despierta por loopback
fn wake_address(listen_addr: SocketAddr) -> SocketAddr {
    let ip = match listen_addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, listen_addr.port())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_wake_address_unspecified_goes_to_loopback() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        assert_eq!(wake_address(addr), "127.0.0.1:8080".parse().unwrap());

        let addr: SocketAddr = "[::]:8080".parse().unwrap();
        assert_eq!(wake_address(addr), "[::1]:8080".parse().unwrap());
    }

    #[test]
    fn test_wake_address_specific_ip_is_kept() {
        let addr: SocketAddr = "192.168.1.10:80".parse().unwrap();
        assert_eq!(wake_address(addr), addr);
    }

    #[test]
    fn test_trigger_sets_flag_and_wakes_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let shutdown = Shutdown::new(listener.local_addr().unwrap());
        let handle = shutdown.handle();

        assert!(!shutdown.is_requested());
        assert!(handle.trigger());
        assert!(shutdown.is_requested());

        // la conexión de despertar quedó en el backlog
        let (_stream, _) = listener.accept().unwrap();
    }

    #[test]
    fn test_trigger_twice_is_harmless() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let shutdown = Shutdown::new(listener.local_addr().unwrap());

        assert!(shutdown.handle().trigger());
        assert!(shutdown.handle().trigger());
        assert!(shutdown.is_requested());
    }

    #[test]
    fn test_trigger_reports_unreachable_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let shutdown = Shutdown::new(addr);

        assert!(!shutdown.handle().trigger());
        assert!(shutdown.is_requested());
        // el segundo pedido no reintenta
        assert!(shutdown.handle().trigger());
    }
}
