//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! 1. `tcp`: abre el puerto y acepta conexiones
//! 2. `connection`: lee, despacha y responde requests de una conexión
//! 3. `shutdown`: apagado pedido desde otro thread
//! 4. `signals`: traduce SIGINT/SIGTERM a un apagado

pub mod connection;
pub mod shutdown;
pub mod signals;
pub mod tcp;

pub use shutdown::ShutdownHandle;
pub use tcp::Server;
