//! # Señales del Proceso
//! src/server/signals.rs
//!
//! SIGINT y SIGTERM piden el apagado ordenado: se cierra el listener y
//! `main` termina con estado de éxito. Si el listener no se puede
//! despertar, el proceso sale directamente con estado 0.

use super::shutdown::ShutdownHandle;
use crate::error::ServerError;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// Registra las señales y lanza el thread que las espera
pub fn install(handle: ShutdownHandle) -> Result<JoinHandle<()>, ServerError> {
    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(ServerError::Signal)?;

    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!(signal, "Server shutting down...");
                if !handle.trigger() {
                    warn!("Listener still blocked, exiting now");
                    std::process::exit(0);
                }
            }
        })
        .map_err(ServerError::Signal)
}
