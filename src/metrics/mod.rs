//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Totales del servidor a partir de los reportes de sesión:
//! - Sesiones por resultado
//! - Bytes y chunks transmitidos
//! - Conmutaciones del control de congestión
//! - Duración de las sesiones

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
