//! # Sesión de Transferencia
//! src/session/mod.rs
//!
//! Atiende una conexión aceptada de principio a fin:
//! 1. Lee el primer bloque del request
//! 2. Verifica el prefijo `GET /`
//! 3. Escribe la cabecera y transmite el archivo en chunks, consultando la
//!    fuente de señales UDP entre chunk y chunk
//! 4. Cierra la conexión

pub mod report;
pub mod state;
pub mod transfer;

use crate::config::Config;
use std::path::PathBuf;

pub use report::{SessionOutcome, SessionReport};
pub use state::SessionState;
pub use transfer::TransferSession;

/// Parámetros compartidos por todas las sesiones de un servidor
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// El único archivo servido
    pub resource: PathBuf,
    pub chunk_size: usize,
    /// Puerto UDP que cada sesión enlaza (0 = efímero)
    pub signal_port: u16,
    pub content_type: String,
    /// Abrir el archivo antes de comprometer la línea de estado
    pub strict_open: bool,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            resource: PathBuf::from(&config.file),
            chunk_size: config.chunk_size,
            signal_port: config.signal_port,
            content_type: config.content_type.clone(),
            strict_open: config.strict_open,
        }
    }
}
