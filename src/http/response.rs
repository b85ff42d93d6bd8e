//! # Cabecera de Respuesta HTTP
//!
//! El cuerpo no se construye en memoria: se transmite chunk por chunk desde
//! el archivo. Este módulo solo arma la cabecera (línea de estado, headers y
//! línea vacía). No hay `Content-Length`: el cierre de la conexión marca el
//! fin del cuerpo, como en HTTP/1.0.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: image/jpg\r\n
//! \r\n
//! <bytes del archivo hasta el cierre>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use toggle_httpd::http::{Response, StatusCode};
//!
//! let head = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "image/jpg")
//!     .to_bytes();
//! assert_eq!(head, b"HTTP/1.0 200 OK\r\nContent-Type: image/jpg\r\n\r\n");
//! ```

use super::StatusCode;

/// Cabecera de una respuesta HTTP/1.0
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en orden de inserción (la salida debe ser byte a byte estable)
    headers: Vec<(String, String)>,
}

impl Response {
    /// Crea una respuesta sin headers
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// Cabecera de éxito que precede al archivo transmitido
    pub fn streaming(content_type: &str) -> Self {
        Self::new(StatusCode::Ok).with_header("Content-Type", content_type)
    }

    /// Cabecera de error sin cuerpo (modo `--strict-open`)
    pub fn error(status: StatusCode) -> Self {
        Self::new(status).with_header("Content-Type", "text/plain")
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe (sin distinguir mayúsculas), se sobrescribe
    /// conservando su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Convierte la cabecera a bytes listos para enviar por el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = format!("HTTP/1.0 {}\r\n", self.status).into_bytes();

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        // Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");
        result
    }
}
