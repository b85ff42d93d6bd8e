//! # Servidor de Conexiones Secuencial
//! src/server/accept_loop.rs
//!
//! Un único loop bloqueante: cada conexión aceptada se atiende hasta el final
//! antes de aceptar la siguiente. Un accept fallido termina el loop (no hay
//! reintentos) y el listener se cierra al retornar.

use crate::config::Config;
use crate::error::ServerError;
use crate::metrics::MetricsCollector;
use crate::net::{Listener, SignalBinder, TcpAcceptor, UdpSignalBinder};
use crate::session::{SessionSettings, TransferSession};
use std::net::SocketAddr;
use tracing::{error, info};

/// Servidor HTTP/1.0 de un solo archivo
pub struct Server<L: Listener = TcpAcceptor, B: SignalBinder = UdpSignalBinder> {
    listener: L,
    binder: B,
    settings: SessionSettings,
    metrics: MetricsCollector,
    max_connections: Option<u64>,
    served: u64,
}

impl Server {
    /// Crea el listener TCP (bind + listen) según la configuración.
    ///
    /// Una falla acá es fatal: no hay reintentos.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let address = config.address();
        info!(address = %address, "iniciando servidor");

        let listener = TcpAcceptor::bind(&address)
            .map_err(|source| ServerError::Bind { address, source })?;

        Ok(Server::with_parts(
            listener,
            UdpSignalBinder::new(config.host.clone()),
            SessionSettings::from_config(config),
        )
        .with_connection_limit(config.connection_limit()))
    }
}

impl<L: Listener, B: SignalBinder> Server<L, B> {
    pub fn with_parts(listener: L, binder: B, settings: SessionSettings) -> Self {
        Self {
            listener,
            binder,
            settings,
            metrics: MetricsCollector::new(),
            max_connections: None,
            served: 0,
        }
    }

    /// Detener el loop limpiamente tras `limit` conexiones
    pub fn with_connection_limit(mut self, limit: Option<u64>) -> Self {
        self.max_connections = limit;
        self
    }

    /// Handle a las métricas (sigue válido después de `run`)
    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::LocalAddr)
    }

    /// Corre el loop de accept hasta el límite de conexiones o un error
    /// fatal. El listener se cierra al retornar.
    pub fn run(mut self) -> Result<(), ServerError> {
        let address = self.local_addr()?;
        info!(
            address = %address,
            signal_port = self.settings.signal_port,
            file = %self.settings.resource.display(),
            "servidor escuchando (una conexión a la vez)"
        );

        let result = self.accept_loop();
        info!(served = self.served, metrics = %self.metrics.to_json(), "servidor detenido");
        result
    }

    fn accept_loop(&mut self) -> Result<(), ServerError> {
        loop {
            if let Some(limit) = self.max_connections {
                if self.served >= limit {
                    info!(limit, "límite de conexiones alcanzado");
                    return Ok(());
                }
            }

            let conn = self.listener.accept().map_err(|e| {
                error!(error = %e, "accept falló, deteniendo el servidor");
                ServerError::Accept(e)
            })?;
            self.served += 1;

            // La sesión registra su reporte en las métricas, también al abortar
            TransferSession::new(conn, &self.binder, &self.settings)
                .with_metrics(&self.metrics)
                .run()
                .map_err(|e| {
                    error!(error = %e, "error fatal en la sesión, deteniendo el servidor");
                    ServerError::from(e)
                })?;
        }
    }
}
