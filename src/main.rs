//! # toggle_httpd - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor. Códigos de salida:
//! - 0: se alcanzó `--max-connections`
//! - 1: error fatal del servidor (bind, accept, fuente de señales)
//! - 2: configuración inválida

use std::process::ExitCode;
use toggle_httpd::config::Config;
use toggle_httpd::logging;
use toggle_httpd::server::Server;

fn main() -> ExitCode {
    let config = Config::new();
    logging::init_logging(config.verbosity);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "configuración inválida");
        return ExitCode::from(2);
    }

    config.print_summary();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "iniciando toggle_httpd");

    let result = Server::bind(&config).and_then(Server::run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "error fatal");
            ExitCode::from(1)
        }
    }
}
