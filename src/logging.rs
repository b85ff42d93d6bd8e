//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing-subscriber` con un `EnvFilter`. `RUST_LOG` tiene
//! prioridad sobre la verbosidad de la configuración.

use tracing_subscriber::EnvFilter;

/// Traduce la verbosidad numérica (0..=4) a un nivel de `tracing`
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Instala el subscriber global. Llamadas repetidas no tienen efecto.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("toggle_httpd={},cc_signal={}", level, level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(level_for(0), "error");
        assert_eq!(level_for(2), "info");
        assert_eq!(level_for(3), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(2);
        init_logging(3);
    }
}
