//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno. Sin flags, los valores por defecto
//! reproducen el comportamiento de referencia: TCP 8080, UDP 9092, archivo
//! `testfile`, chunks de 8096 bytes.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./toggle_httpd --port 8080 \
//!   --signal-port 9092 \
//!   --file ./testfile \
//!   --chunk-size 8096
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 SIGNAL_PORT=9092 SERVED_FILE=./testfile ./toggle_httpd
//! ```

use clap::Parser;

/// Tamaño máximo aceptado para un chunk (1 MiB)
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Configuración del servidor HTTP/1.0
#[derive(Debug, Clone, Parser)]
#[command(name = "toggle_httpd")]
#[command(about = "Servidor HTTP/1.0 de un solo archivo con conmutación de control de congestión por UDP")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto TCP en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escuchan el listener TCP y la fuente de señales UDP
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    // === Canal de control ===

    /// Puerto UDP de las señales de conmutación (0 = efímero por sesión)
    #[arg(long = "signal-port", default_value = "9092", env = "SIGNAL_PORT")]
    pub signal_port: u16,

    // === Recurso servido ===

    /// Archivo servido en cada `GET /`
    #[arg(long, default_value = "testfile", env = "SERVED_FILE")]
    pub file: String,

    /// Tamaño máximo de cada chunk (lectura del archivo y escritura al socket)
    #[arg(long = "chunk-size", default_value = "8096", env = "CHUNK_SIZE")]
    pub chunk_size: usize,

    /// Content-Type de la cabecera de respuesta
    #[arg(long = "content-type", default_value = "image/jpg", env = "CONTENT_TYPE")]
    pub content_type: String,

    /// Abrir el archivo antes de escribir la línea de estado.
    /// Sin este flag se escribe `200 OK` aunque el archivo no exista.
    #[arg(long = "strict-open", env = "STRICT_OPEN")]
    pub strict_open: bool,

    // === Ciclo de vida ===

    /// Detener el servidor tras N conexiones (0 = sin límite)
    #[arg(long = "max-connections", default_value = "0", env = "MAX_CONNECTIONS")]
    pub max_connections: u64,

    /// Verbosidad del log (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(short, long, default_value = "2", env = "LOG_VERBOSITY")]
    pub verbosity: u8,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind TCP (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use toggle_httpd::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Dirección de la fuente de señales UDP (host:signal_port)
    pub fn signal_address(&self) -> String {
        format!("{}:{}", self.host, self.signal_port)
    }

    /// Límite de conexiones, `None` si el servidor corre indefinidamente
    pub fn connection_limit(&self) -> Option<u64> {
        (self.max_connections > 0).then_some(self.max_connections)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos. Los puertos TCP y UDP viven
    /// en espacios separados, así que `signal_port == port` es válido.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("Chunk size must be >= 1".to_string());
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(format!("Chunk size must be <= {}", MAX_CHUNK_SIZE));
        }

        if self.file.trim().is_empty() {
            return Err("Served file path must not be empty".to_string());
        }
        if self.content_type.trim().is_empty() {
            return Err("Content type must not be empty".to_string());
        }

        if self.verbosity > 4 {
            return Err("Verbosity must be 0-4".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║            toggle_httpd Server Configuration                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   HTTP (TCP):   {}", self.address());
        if self.signal_port == 0 {
            println!("   Signal (UDP): {}:<ephemeral per session>", self.host);
        } else {
            println!("   Signal (UDP): {}", self.signal_address());
        }
        println!();
        println!("📄 Resource:");
        println!("   File:         {}", self.file);
        println!("   Content-Type: {}", self.content_type);
        println!("   Chunk size:   {} bytes", self.chunk_size);
        println!(
            "   Open mode:    {}",
            if self.strict_open { "strict (open before status line)" } else { "reference (status line first)" }
        );
        println!();
        println!("🔁 Lifecycle:");
        match self.connection_limit() {
            Some(limit) => println!("   Stop after:   {} connections", limit),
            None => println!("   Stop after:   never"),
        }
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto (comportamiento de referencia)
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            signal_port: 9092,
            file: "testfile".to_string(),
            chunk_size: 8096,
            content_type: "image/jpg".to_string(),
            strict_open: false,
            max_connections: 0,
            verbosity: 2,
        }
    }
}
