//! # Sustrato de Red
//! src/net/mod.rs
//!
//! Las capacidades que el núcleo usa del stack TCP/IP, expresadas como traits
//! para que la sesión y el servidor no dependan de `std::net` directamente:
//!
//! - [`Listener`]: endpoint en escucha que entrega conexiones
//! - [`Connection`]: stream confiable hacia un cliente, con su flag de
//!   control de congestión
//! - [`SignalBinder`] / [`SignalSource`]: canal UDP no bloqueante de señales
//!
//! Las implementaciones sobre `std::net` viven en `tcp` y `udp`.

use std::io;
use std::net::SocketAddr;

pub mod tcp;
pub mod udp;

#[cfg(test)]
pub(crate) mod mock;

pub use tcp::{TcpAcceptor, TcpConnection};
pub use udp::{send_toggles, UdpSignalBinder, UdpSignalSource};

/// Stream ordenado y confiable hacia un cliente
pub trait Connection {
    /// Un recv bloqueante; `Ok(0)` significa que el peer cerró
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Escribe el buffer completo (las escrituras parciales se reintentan acá)
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Estado actual del control de congestión de esta conexión
    fn congestion_control_enabled(&self) -> bool;

    fn set_congestion_control(&mut self, enabled: bool) -> io::Result<()>;

    /// Cierre iniciado por el servidor
    fn close(&mut self) -> io::Result<()>;

    /// Identificación del peer para logs
    fn peer(&self) -> String;
}

/// Endpoint en estado LISTEN
pub trait Listener {
    type Conn: Connection;

    fn accept(&mut self) -> io::Result<Self::Conn>;

    fn local_addr(&self) -> io::Result<SocketAddr>;
}

/// Canal de señales de una sesión. Nunca bloquea.
pub trait SignalSource {
    /// Drena las señales pendientes y retorna cuántas llegaron (0 = nada)
    fn poll(&mut self) -> io::Result<usize>;

    fn local_port(&self) -> u16;
}

/// Crea una fuente de señales por sesión
pub trait SignalBinder {
    type Source: SignalSource;

    /// Enlaza en `port`; con 0 el sistema elige un puerto efímero
    fn bind(&self, port: u16) -> io::Result<Self::Source>;
}
