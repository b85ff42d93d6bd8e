//! # cc_signal
//! src/bin/cc_signal.rs
//!
//! Envía señales de conmutación al servidor. Cada datagrama invierte el
//! control de congestión de la transferencia en curso.
//!
//! ```bash
//! cc_signal --count 2 --interval-ms 10000
//! ```

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use toggle_httpd::{logging, net};

#[derive(Debug, Parser)]
#[command(name = "cc_signal")]
#[command(about = "Envía señales UDP que conmutan el control de congestión de toggle_httpd")]
#[command(version = "0.1.0")]
struct Args {
    /// Host del servidor
    #[arg(long, default_value = "127.0.0.1", env = "SIGNAL_HOST")]
    host: String,

    /// Puerto UDP de señales
    #[arg(short, long, default_value = "9092", env = "SIGNAL_PORT")]
    port: u16,

    /// Cantidad de señales a enviar
    #[arg(short, long, default_value = "1")]
    count: u32,

    /// Espera entre señales en milisegundos
    #[arg(long = "interval-ms", default_value = "0")]
    interval_ms: u64,

    /// Verbosidad del log (0-4)
    #[arg(short, long, default_value = "2")]
    verbosity: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbosity);

    let target = format!("{}:{}", args.host, args.port);
    match net::send_toggles(&target, args.count, Duration::from_millis(args.interval_ms)) {
        Ok(sent) => {
            tracing::info!(to = %target, sent, "señales enviadas");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(to = %target, error = %e, "no se pudieron enviar las señales");
            ExitCode::from(1)
        }
    }
}
