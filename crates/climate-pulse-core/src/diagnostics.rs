//! Diagnostics emitted while an analysis runs.
//!
//! Stages report progress and recovered failures to a [`DiagnosticsSink`].
//! The default [`TracingSink`] forwards to `tracing`; [`MemorySink`] keeps
//! events in memory so tests can assert on them.

use std::sync::Mutex;

/// Something worth recording during analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// A stage began.
    StageStarted {
        /// Stage name.
        stage: &'static str,
    },
    /// A stage finished.
    StageCompleted {
        /// Stage name.
        stage: &'static str,
    },
    /// The scorer failed on one message; a neutral score was used instead.
    ScoringFailed {
        /// Record whose message failed.
        record_id: String,
        /// Scorer error text.
        error: String,
    },
}

/// Receiver for [`DiagnosticEvent`]s.
///
/// Write-only from the analysis point of view: nothing a sink does can
/// change a report.
pub trait DiagnosticsSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: DiagnosticEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::StageStarted { stage } => tracing::info!(stage, "stage started"),
            DiagnosticEvent::StageCompleted { stage } => tracing::info!(stage, "stage completed"),
            DiagnosticEvent::ScoringFailed { record_id, error } => {
                tracing::warn!(%record_id, %error, "scoring failed, using neutral score");
            }
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.record(DiagnosticEvent::StageStarted { stage: "a" });
        sink.record(DiagnosticEvent::StageCompleted { stage: "a" });
        assert_eq!(
            sink.events(),
            vec![
                DiagnosticEvent::StageStarted { stage: "a" },
                DiagnosticEvent::StageCompleted { stage: "a" },
            ]
        );
    }

    #[test]
    fn tracing_sink_accepts_events() {
        TracingSink.record(DiagnosticEvent::ScoringFailed {
            record_id: "1".to_string(),
            error: "boom".to_string(),
        });
    }
}
