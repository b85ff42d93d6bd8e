//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! El servidor de conexiones:
//! 1. Escucha en el puerto TCP
//! 2. Acepta una conexión
//! 3. La atiende completa con una `TransferSession`
//! 4. Vuelve a aceptar
//!
//! Las sesiones nunca se solapan: el protocolo de conmutación es por
//! conexión y no necesita sesiones concurrentes.

pub mod accept_loop;

// Re-exportar para facilitar el uso
pub use accept_loop::Server;
