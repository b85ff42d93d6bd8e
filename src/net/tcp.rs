//! # Sustrato TCP sobre `std::net`
//! src/net/tcp.rs
//!
//! El stack TCP del sistema no permite apagar el control de congestión, pero
//! sí el algoritmo de Nagle (RFC 896, "Congestion Control in IP/TCP
//! Internetworks"), que es el único freno del emisor conmutable por conexión:
//!
//! - control de congestión habilitado  => `TCP_NODELAY` apagado
//! - control de congestión deshabilitado => `TCP_NODELAY` encendido

use super::{Connection, Listener};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::time::{Duration, Instant};
use tracing::debug;

/// Espera máxima por cada lectura del cierre diferido
const LINGER_READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Tiempo total que se drena la entrada antes de soltar el socket
const LINGER_DEADLINE: Duration = Duration::from_secs(2);

/// Listener TCP (bind + listen en un solo paso)
pub struct TcpAcceptor {
    listener: TcpListener,
}

impl TcpAcceptor {
    pub fn bind(address: &str) -> io::Result<Self> {
        let listener = TcpListener::bind(address)?;
        Ok(Self { listener })
    }
}

impl Listener for TcpAcceptor {
    type Conn = TcpConnection;

    fn accept(&mut self) -> io::Result<TcpConnection> {
        let (stream, _) = self.listener.accept()?;
        TcpConnection::new(stream)
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Conexión TCP aceptada
pub struct TcpConnection {
    stream: TcpStream,
    peer: String,
    congestion_control: bool,
}

impl TcpConnection {
    /// Envuelve un stream aceptado. Toda conexión arranca con el control de
    /// congestión habilitado.
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_nodelay(false)?;
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Ok(Self {
            stream,
            peer,
            congestion_control: true,
        })
    }
}

impl TcpConnection {
    /// Cierre diferido: descarta lo que el cliente haya enviado y no se leyó.
    ///
    /// Soltar un socket con bytes pendientes en el buffer de recepción hace
    /// que el kernel mande RST y descarte la respuesta que aún no salió.
    /// Se lee hasta EOF, error o `LINGER_DEADLINE`.
    fn drain_input(&mut self) {
        if self.stream.set_read_timeout(Some(LINGER_READ_TIMEOUT)).is_err() {
            return;
        }

        let deadline = Instant::now() + LINGER_DEADLINE;
        let mut discard = [0u8; 4096];
        let mut drained = 0usize;

        while Instant::now() < deadline {
            match self.stream.read(&mut discard) {
                Ok(0) => break,
                Ok(n) => drained += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }

        if drained > 0 {
            debug!(peer = %self.peer, drained, "entrada no leída descartada al cerrar");
        }
    }
}

impl Connection for TcpConnection {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.stream.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.stream.write_all(data)?;
        self.stream.flush()
    }

    fn congestion_control_enabled(&self) -> bool {
        self.congestion_control
    }

    fn set_congestion_control(&mut self, enabled: bool) -> io::Result<()> {
        self.stream.set_nodelay(!enabled)?;
        self.congestion_control = enabled;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        // Solo FIN: lo ya escrito llega al cliente antes del cierre del fd
        match self.stream.shutdown(Shutdown::Write) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => return Ok(()),
            other => other?,
        }
        self.drain_input();
        Ok(())
    }

    fn peer(&self) -> String {
        self.peer.clone()
    }
}
