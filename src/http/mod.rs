//! # Módulo HTTP
//!
//! Lo mínimo de HTTP/1.0 que necesita el servidor:
//!
//! - Reconocer el prefijo `GET /` del primer bloque recibido
//! - Construir la cabecera de respuesta
//! - Códigos de estado
//!
//! No hay parsing de headers, métodos ni rutas: cualquier `GET /...` recibe
//! el mismo archivo.

pub mod request;   // Reconocimiento del prefijo `GET /`
pub mod response;  // Cabecera de respuesta
pub mod status;    // Códigos de estado HTTP

pub use request::{is_get_root, GET_ROOT_PREFIX};
pub use response::Response;
pub use status::StatusCode;
