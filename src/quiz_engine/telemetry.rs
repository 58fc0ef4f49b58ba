//! Analytics events emitted at session lifecycle points.
//!
//! The engine never depends on a particular analytics provider. It talks to a
//! [`TelemetrySink`] through [`Telemetry`], which is fire-and-forget: a missing
//! sink is a no-op, and a failing or panicking sink is logged and ignored so a
//! quiz transition is never blocked or rolled back by analytics.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::quiz_engine::{
    error::TelemetryError,
    models::{QuizMode, SessionConfig},
};

/// Parameters attached to an event. Values are JSON primitives.
pub type EventParams = Map<String, Value>;

/// Receives named analytics events.
pub trait TelemetrySink: Send + Sync {
    fn log_event(&self, name: &str, params: &EventParams) -> Result<(), TelemetryError>;
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    /// One per selected topic at session start.
    TopicSelected { topic_id: String },
    PracticeStarted { topics: String, shuffle: bool },
    ExamStarted { topics: String, shuffle: bool, question_count: Option<u32> },
    ExamSubmitted { score: usize, total_questions: usize, topics: String },
    PracticeFinished { topics: String, questions_viewed: usize },
}

impl TelemetryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::TopicSelected { .. }    => "select_content",
            TelemetryEvent::PracticeStarted { .. }  => "user_in_practice",
            TelemetryEvent::ExamStarted { .. }      => "user_in_test",
            TelemetryEvent::ExamSubmitted { .. }    => "user_done_test",
            TelemetryEvent::PracticeFinished { .. } => "user_done_practice",
        }
    }

    pub fn params(&self) -> EventParams {
        let value = match self {
            TelemetryEvent::TopicSelected { topic_id } => json!({
                "content_type": "quiz_topic",
                "item_id": topic_id,
            }),
            TelemetryEvent::PracticeStarted { topics, shuffle } => json!({
                "topics": topics,
                "shuffle": shuffle.to_string(),
            }),
            TelemetryEvent::ExamStarted { topics, shuffle, question_count } => {
                let mut v = json!({
                    "topics": topics,
                    "shuffle": shuffle.to_string(),
                });
                if let Some(n) = question_count {
                    v["question_count"] = json!(n);
                }
                v
            }
            TelemetryEvent::ExamSubmitted { score, total_questions, topics } => json!({
                "score": score,
                "total_questions": total_questions,
                "topics": topics,
            }),
            TelemetryEvent::PracticeFinished { topics, questions_viewed } => json!({
                "topics": topics,
                "questions_viewed": questions_viewed,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// Events for a session start: one per topic, then the mode event.
    pub fn session_started(config: &SessionConfig) -> Vec<TelemetryEvent> {
        let mut events: Vec<TelemetryEvent> = config
            .selected_topic_ids
            .iter()
            .map(|id| TelemetryEvent::TopicSelected { topic_id: id.clone() })
            .collect();
        let topics = config.topics_joined();
        events.push(match config.mode {
            QuizMode::Practice => TelemetryEvent::PracticeStarted {
                topics,
                shuffle: config.shuffle,
            },
            QuizMode::Exam => TelemetryEvent::ExamStarted {
                topics,
                shuffle: config.shuffle,
                question_count: config.question_count,
            },
        });
        events
    }
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Best-effort wrapper around an optional sink.
#[derive(Clone, Default)]
pub struct Telemetry {
    sink: Option<Arc<dyn TelemetrySink>>,
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.sink.is_some())
            .finish()
    }
}

impl Telemetry {
    pub fn disabled() -> Self {
        Telemetry { sink: None }
    }

    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Telemetry { sink: Some(sink) }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Send one event. Never fails and never panics.
    pub fn emit(&self, event: &TelemetryEvent) {
        let Some(sink) = &self.sink else { return };
        let name = event.name();
        let params = event.params();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.log_event(name, &params)));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(event = name, error = %e, "telemetry event dropped"),
            Err(_) => warn!(event = name, "telemetry sink panicked; event dropped"),
        }
    }

    pub fn emit_all(&self, events: &[TelemetryEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Sink that keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, EventParams)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<(String, EventParams)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }
}

impl TelemetrySink for RecordingSink {
    fn log_event(&self, name: &str, params: &EventParams) -> Result<(), TelemetryError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| TelemetryError("recording sink poisoned".into()))?;
        events.push((name.to_string(), params.clone()));
        Ok(())
    }
}
