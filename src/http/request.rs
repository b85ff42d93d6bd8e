//! # Reconocimiento de Requests
//! src/http/request.rs
//!
//! No hay parser: el servidor solo compara los primeros 5 bytes del primer
//! bloque recibido contra el literal `GET /`. Cualquier otra cosa (otro
//! método, un bloque más corto, bytes binarios) se trata como no reconocida.
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n   -> reconocido
//! GET /\r\n                      -> reconocido
//! POST /\r\n                     -> no reconocido
//! GET                            -> no reconocido (menos de 5 bytes)
//! ```

/// Prefijo literal que habilita la transmisión del archivo
pub const GET_ROOT_PREFIX: &[u8; 5] = b"GET /";

/// Tamaño del buffer para el primer bloque del request
pub const REQUEST_BUFFER_SIZE: usize = 8192;

/// Largo máximo de la vista previa que se escribe en el log
const PREVIEW_LIMIT: usize = 80;

/// Verifica si el bloque recibido empieza exactamente con `GET /`
///
/// # Ejemplo
/// ```
/// use toggle_httpd::http::request::is_get_root;
///
/// assert!(is_get_root(b"GET /index.html HTTP/1.1\r\n"));
/// assert!(!is_get_root(b"POST / HTTP/1.0\r\n"));
/// assert!(!is_get_root(b"GET"));
/// ```
pub fn is_get_root(block: &[u8]) -> bool {
    block.starts_with(GET_ROOT_PREFIX)
}

/// Primera línea del bloque, con bytes no UTF-8 reemplazados, para logs
pub fn preview(block: &[u8]) -> String {
    let line_end = block
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(block.len());
    let line = &block[..line_end.min(PREVIEW_LIMIT)];
    String::from_utf8_lossy(line).into_owned()
}
