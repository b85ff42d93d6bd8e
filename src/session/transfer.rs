//! # Transfer Session
//! src/session/transfer.rs
//!
//! El loop de transmisión es un productor síncrono (archivo -> conexión)
//! con un poll no bloqueante de la fuente de señales en cada iteración:
//!
//! ```text
//! loop {
//!     leer chunk del archivo      (EOF o error -> salir)
//!     escribir chunk completo     (error -> salir)
//!     poll de señales             (cada señal invierte el flag)
//! }
//! ```
//!
//! Una señal observada en el poll que precede a la escritura k ya está
//! aplicada cuando se escribe k. Cada datagrama invierte el estado actual
//! (edge-triggered), nunca lo fija a un valor absoluto.

use super::{SessionOutcome, SessionReport, SessionSettings, SessionState};
use crate::error::SessionError;
use crate::http::request::{self, REQUEST_BUFFER_SIZE};
use crate::http::{Response, StatusCode};
use crate::metrics::MetricsCollector;
use crate::net::{Connection, SignalBinder, SignalSource};
use std::fs::File;
use std::io::{self, Read};
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

/// Atiende una conexión aceptada hasta cerrarla
pub struct TransferSession<'a, C: Connection, B: SignalBinder> {
    conn: C,
    binder: &'a B,
    settings: &'a SessionSettings,
    metrics: Option<&'a MetricsCollector>,
    /// Primer bloque recibido; se libera al cerrar
    request: Vec<u8>,
    state: SessionState,
    report: SessionReport,
    started: Instant,
}

impl<'a, C: Connection, B: SignalBinder> TransferSession<'a, C, B> {
    pub fn new(conn: C, binder: &'a B, settings: &'a SessionSettings) -> Self {
        let report = SessionReport::new(conn.peer(), conn.congestion_control_enabled());
        Self {
            conn,
            binder,
            settings,
            metrics: None,
            request: Vec::new(),
            state: SessionState::AwaitingRequest,
            report,
            started: Instant::now(),
        }
    }

    /// Registra el reporte final en `metrics`, también si la sesión aborta
    pub fn with_metrics(mut self, metrics: &'a MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ejecuta la sesión completa.
    ///
    /// Las fallas de la sesión quedan en el reporte. Solo la falla al enlazar
    /// la fuente de señales se retorna como error; la conexión se cierra
    /// igual antes de retornar.
    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        info!(peer = %self.report.peer, "sesión iniciada");

        while !self.state.is_terminal() {
            let next = match self.state {
                SessionState::AwaitingRequest => self.await_request(),
                SessionState::Validating => self.validate(),
                SessionState::Streaming => match self.stream() {
                    Ok(next) => next,
                    Err(fatal) => {
                        self.report.outcome = SessionOutcome::SignalUnavailable;
                        self.close();
                        self.finish();
                        return Err(fatal);
                    }
                },
                SessionState::Closing => self.close(),
                SessionState::Done => SessionState::Done,
            };
            debug_assert!(self.state.can_transition_to(next), "{} -> {}", self.state, next);
            trace!(from = %self.state, to = %next, "transición");
            self.state = next;
        }

        self.finish();
        Ok(self.report)
    }

    /// Completa el reporte, lo registra en el log y en las métricas
    fn finish(&mut self) {
        self.report.final_congestion_control = self.conn.congestion_control_enabled();
        self.report.duration_us = self.started.elapsed().as_micros() as u64;

        info!(
            peer = %self.report.peer,
            outcome = %self.report.outcome,
            body_bytes = self.report.body_bytes,
            chunks = self.report.chunks,
            toggles = self.report.toggles,
            "sesión terminada"
        );
        debug!(report = %self.report.to_json(), "reporte de sesión");

        if let Some(metrics) = self.metrics {
            metrics.record_session(&self.report);
        }
    }

    fn await_request(&mut self) -> SessionState {
        let mut buffer = vec![0u8; REQUEST_BUFFER_SIZE];

        match self.conn.recv(&mut buffer) {
            Ok(n) => {
                buffer.truncate(n);
                self.request = buffer;
                SessionState::Validating
            }
            Err(e) => {
                warn!(peer = %self.report.peer, error = %e, "fallo al recibir el request");
                self.report.outcome = SessionOutcome::ReceiveFailed;
                SessionState::Closing
            }
        }
    }

    fn validate(&mut self) -> SessionState {
        let line = request::preview(&self.request);

        if request::is_get_root(&self.request) {
            debug!(peer = %self.report.peer, request = %line, "request reconocido");
            SessionState::Streaming
        } else {
            info!(peer = %self.report.peer, request = %line, bytes = self.request.len(), "request no reconocido, cerrando");
            self.report.outcome = SessionOutcome::Rejected;
            SessionState::Closing
        }
    }

    fn stream(&mut self) -> Result<SessionState, SessionError> {
        let Some(file) = self.open_resource() else {
            return Ok(SessionState::Closing);
        };

        let port = self.settings.signal_port;
        let signals = self.binder.bind(port).map_err(|source| {
            error!(port, error = %source, "no se pudo enlazar la fuente de señales");
            SessionError::SignalBind { port, source }
        })?;
        self.report.signal_port = Some(signals.local_port());
        debug!(signal_port = signals.local_port(), "fuente de señales enlazada");

        self.pump(file, signals);
        Ok(SessionState::Closing)
    }

    /// Escribe la cabecera y abre el archivo, en el orden que indique el modo.
    ///
    /// En modo de referencia la línea `200 OK` se escribe antes de abrir, así
    /// que un archivo inexistente produce un 200 sin cuerpo. Con
    /// `strict_open` se abre primero y una falla produce 404/500.
    fn open_resource(&mut self) -> Option<File> {
        let content_type = self.settings.content_type.clone();

        if !self.settings.strict_open && !self.write_head(Response::streaming(&content_type)) {
            return None;
        }

        match File::open(&self.settings.resource) {
            Ok(file) => {
                if self.settings.strict_open && !self.write_head(Response::streaming(&content_type)) {
                    return None;
                }
                Some(file)
            }
            Err(e) => {
                warn!(
                    file = %self.settings.resource.display(),
                    error = %e,
                    "no se pudo abrir el archivo"
                );
                self.report.outcome = SessionOutcome::FileUnavailable;
                if self.settings.strict_open {
                    self.write_head(Response::error(StatusCode::for_open_error(&e)));
                }
                None
            }
        }
    }

    /// Retorna `false` si la escritura falló
    fn write_head(&mut self, response: Response) -> bool {
        match self.conn.write_all(&response.to_bytes()) {
            Ok(()) => {
                let status = response.status();
                if !status.is_success() {
                    info!(peer = %self.report.peer, status = %status, "respuesta de error enviada");
                }
                self.report.status = Some(status.as_u16());
                true
            }
            Err(e) => {
                warn!(peer = %self.report.peer, error = %e, "fallo al escribir la cabecera");
                self.report.outcome = SessionOutcome::WriteFailed;
                false
            }
        }
    }

    /// Loop de transmisión. El archivo y la fuente de señales se liberan al
    /// salir, en cualquier caso.
    fn pump(&mut self, mut file: File, mut signals: B::Source) {
        let mut chunk = vec![0u8; self.settings.chunk_size];

        loop {
            let n = match read_chunk(&mut file, &mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    warn!(error = %e, "fallo al leer el archivo");
                    self.report.outcome = SessionOutcome::ReadFailed;
                    break;
                }
            };

            if let Err(e) = self.conn.write_all(&chunk[..n]) {
                warn!(peer = %self.report.peer, error = %e, "fallo al escribir un chunk");
                self.report.outcome = SessionOutcome::WriteFailed;
                break;
            }
            self.report.chunks += 1;
            self.report.body_bytes += n as u64;
            trace!(chunk = self.report.chunks, bytes = n, "chunk enviado");

            match signals.poll() {
                Ok(count) => {
                    for _ in 0..count {
                        self.toggle_congestion_control();
                    }
                }
                Err(e) => warn!(error = %e, "fallo al consultar la fuente de señales"),
            }
        }

        drop(signals);
        drop(file);
        debug!(body_bytes = self.report.body_bytes, outcome = %self.report.outcome, "archivo terminado");
    }

    fn toggle_congestion_control(&mut self) {
        let enabled = self.conn.congestion_control_enabled();

        match self.conn.set_congestion_control(!enabled) {
            Ok(()) => {
                self.report.toggles += 1;
                info!(
                    peer = %self.report.peer,
                    after_chunk = self.report.chunks,
                    "control de congestión {}",
                    if enabled { "deshabilitado" } else { "habilitado" }
                );
            }
            Err(e) => warn!(peer = %self.report.peer, error = %e, "no se pudo conmutar el control de congestión"),
        }
    }

    fn close(&mut self) -> SessionState {
        if let Err(e) = self.conn.close() {
            debug!(peer = %self.report.peer, error = %e, "error al cerrar la conexión");
        }
        self.request = Vec::new();
        SessionState::Done
    }
}

/// Un `read` que reintenta ante `Interrupted`
fn read_chunk(file: &mut File, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match file.read(chunk) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}
