//! # toggle_httpd
//! src/lib.rs
//!
//! Servidor HTTP/1.0 mínimo para bancos de prueba de stacks de red: acepta
//! conexiones TCP, reconoce `GET /` y transmite un único archivo fijo como
//! cuerpo de la respuesta. Mientras transmite, un canal UDP por sesión recibe
//! señales que conmutan el control de congestión de la conexión activa.
//!
//! ## Arquitectura
//!
//! - `config`: Flags CLI y variables de entorno
//! - `http`: Prefijo `GET /`, cabecera de respuesta y códigos de estado
//! - `net`: Sustrato de red (traits + implementación sobre `std::net`)
//! - `session`: La sesión de transferencia y su máquina de estados
//! - `server`: Loop de accept secuencial
//! - `metrics`: Totales a partir de los reportes de sesión
//! - `logging` / `error`: Infraestructura
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use toggle_httpd::config::Config;
//! use toggle_httpd::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("Error al iniciar servidor");
//! server.run().expect("Error fatal");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod metrics;
pub mod net;
pub mod server;
pub mod session;
