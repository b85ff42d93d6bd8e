//! Resumen de lo que hizo una sesión, para logs y métricas.

use serde::Serialize;

/// Cómo terminó una sesión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// El archivo se transmitió completo (incluye el archivo vacío)
    Served,
    /// El request no empezaba con `GET /`
    Rejected,
    /// Falló el recv inicial
    ReceiveFailed,
    /// No se pudo abrir el archivo servido
    FileUnavailable,
    /// Falló una lectura del archivo a mitad de la transmisión
    ReadFailed,
    /// Falló una escritura hacia el cliente
    WriteFailed,
    /// No se pudo enlazar la fuente de señales (detiene el servidor)
    SignalUnavailable,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Served => "served",
            SessionOutcome::Rejected => "rejected",
            SessionOutcome::ReceiveFailed => "receive_failed",
            SessionOutcome::FileUnavailable => "file_unavailable",
            SessionOutcome::ReadFailed => "read_failed",
            SessionOutcome::WriteFailed => "write_failed",
            SessionOutcome::SignalUnavailable => "signal_unavailable",
        }
    }
}

impl std::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resultado de una `TransferSession`
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub peer: String,
    pub outcome: SessionOutcome,
    /// Código de la línea de estado escrita, si se escribió alguna
    pub status: Option<u16>,
    pub body_bytes: u64,
    pub chunks: u64,
    /// Conmutaciones aplicadas del control de congestión
    pub toggles: u64,
    pub initial_congestion_control: bool,
    pub final_congestion_control: bool,
    /// Puerto UDP de la fuente de señales de esta sesión
    pub signal_port: Option<u16>,
    pub duration_us: u64,
}

impl SessionReport {
    pub fn new(peer: String, congestion_control: bool) -> Self {
        Self {
            peer,
            outcome: SessionOutcome::Served,
            status: None,
            body_bytes: 0,
            chunks: 0,
            toggles: 0,
            initial_congestion_control: congestion_control,
            final_congestion_control: congestion_control,
            signal_port: None,
            duration_us: 0,
        }
    }

    pub fn header_written(&self) -> bool {
        self.status.is_some()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
