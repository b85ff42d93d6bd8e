//! # Errores del Servidor
//! src/error.rs
//!
//! Solo las condiciones que terminan el servidor se modelan como errores.
//! Las fallas propias de una sesión (recv, apertura del archivo, lectura,
//! escritura) se registran en el log y quedan en el `SessionReport`.

use std::io;

/// Condiciones que una sesión escala fuera de sí misma
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No se pudo enlazar la fuente de señales UDP
    #[error("cannot bind signal source on UDP port {port}: {source}")]
    SignalBind {
        port: u16,
        #[source]
        source: io::Error,
    },
}

/// Errores fatales para el ciclo de accept
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("cannot bind/listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),

    #[error("cannot read local address: {0}")]
    LocalAddr(#[source] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}
