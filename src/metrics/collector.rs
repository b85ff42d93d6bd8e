//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Agrega los reportes de sesión del servidor.

use crate::session::{SessionOutcome, SessionReport};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Collector de métricas; los clones comparten los mismos datos
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

/// Datos internos de métricas
#[derive(Default)]
struct MetricsData {
    /// Sesiones atendidas (cualquier resultado)
    sessions: u64,

    /// Sesiones por resultado
    outcomes: BTreeMap<&'static str, u64>,

    body_bytes: u64,
    chunks: u64,
    toggles: u64,

    /// Suma y máximo de la duración de las sesiones (microsegundos)
    total_duration_us: u64,
    max_duration_us: u64,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData::default())),
            start_time: Instant::now(),
        }
    }

    fn data(&self) -> MutexGuard<'_, MetricsData> {
        // Un panic con el lock tomado no invalida contadores
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registra una sesión terminada
    pub fn record_session(&self, report: &SessionReport) {
        let mut data = self.data();

        data.sessions += 1;
        *data.outcomes.entry(report.outcome.as_str()).or_insert(0) += 1;
        data.body_bytes += report.body_bytes;
        data.chunks += report.chunks;
        data.toggles += report.toggles;
        data.total_duration_us += report.duration_us;
        data.max_duration_us = data.max_duration_us.max(report.duration_us);
    }

    /// Sesiones que terminaron con `outcome`
    pub fn count(&self, outcome: SessionOutcome) -> u64 {
        self.data().outcomes.get(outcome.as_str()).copied().unwrap_or(0)
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.data();
        let avg_duration_us = if data.sessions == 0 {
            0
        } else {
            data.total_duration_us / data.sessions
        };

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            sessions: data.sessions,
            outcomes: data
                .outcomes
                .iter()
                .map(|(outcome, count)| (outcome.to_string(), *count))
                .collect(),
            body_bytes: data.body_bytes,
            chunks: data.chunks,
            toggles: data.toggles,
            avg_duration_us,
            max_duration_us: data.max_duration_us,
        }
    }

    /// Obtiene las métricas actuales en formato JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot de métricas (para uso externo)
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub sessions: u64,
    pub outcomes: BTreeMap<String, u64>,
    pub body_bytes: u64,
    pub chunks: u64,
    pub toggles: u64,
    pub avg_duration_us: u64,
    pub max_duration_us: u64,
}
