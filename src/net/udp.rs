//! # Fuente de Señales UDP
//! src/net/udp.rs
//!
//! Cada datagrama que llega es una señal; su contenido se ignora. El socket
//! es no bloqueante, así que `poll()` retorna de inmediato.
//!
//! `send_toggles` es el lado emisor (lo usa el binario `cc_signal`).

use super::{SignalBinder, SignalSource};
use std::io;
use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

/// Los datagramas se leen en este buffer y se descartan
const DATAGRAM_SCRATCH: usize = 64;

/// Payload que envía `send_toggles` (el servidor no lo interpreta)
pub const TOGGLE_PAYLOAD: &[u8] = b"1";

/// Socket UDP no bloqueante de una sesión; se libera al hacer drop
pub struct UdpSignalSource {
    socket: UdpSocket,
    port: u16,
}

impl UdpSignalSource {
    pub fn bind(host: &str, port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind((host, port))?;
        socket.set_nonblocking(true)?;
        let port = socket.local_addr()?.port();
        Ok(Self { socket, port })
    }
}

impl SignalSource for UdpSignalSource {
    fn poll(&mut self) -> io::Result<usize> {
        let mut scratch = [0u8; DATAGRAM_SCRATCH];
        let mut received = 0;

        loop {
            match self.socket.recv_from(&mut scratch) {
                Ok(_) => received += 1,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // Lo ya drenado cuenta; el error se verá en el próximo poll
                Err(_) if received > 0 => break,
                Err(e) => return Err(e),
            }
        }

        Ok(received)
    }

    fn local_port(&self) -> u16 {
        self.port
    }
}

/// Enlaza fuentes de señales en un host fijo
#[derive(Debug, Clone)]
pub struct UdpSignalBinder {
    host: String,
}

impl UdpSignalBinder {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl SignalBinder for UdpSignalBinder {
    type Source = UdpSignalSource;

    fn bind(&self, port: u16) -> io::Result<UdpSignalSource> {
        UdpSignalSource::bind(&self.host, port)
    }
}

/// Envía `count` señales a `target`, esperando `interval` entre cada una.
///
/// Retorna cuántos datagramas se enviaron.
pub fn send_toggles(target: &str, count: u32, interval: Duration) -> io::Result<u32> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    let mut sent = 0;

    for i in 0..count {
        if i > 0 && !interval.is_zero() {
            thread::sleep(interval);
        }
        socket.send_to(TOGGLE_PAYLOAD, target)?;
        sent += 1;
        tracing::debug!(to = %target, n = sent, "señal enviada");
    }

    Ok(sent)
}
