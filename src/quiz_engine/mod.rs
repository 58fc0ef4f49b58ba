//! Core quiz engine — question banks, assembly, scoring and the session controller.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: questions, topics, config, session state, verdicts |
//! | `catalog`     | Bundled question banks, JSON loading and validation |
//! | `assembler`   | Builds a session's question list: filter, Fisher-Yates shuffle, truncate |
//! | `scoring`     | Tally, per-question verdicts, percentage summary |
//! | `telemetry`   | Analytics events and the fire-and-forget emitter |
//! | `session`     | `QuizSession` state machine and `Intent` dispatch |
//! | `client_view` | JSON snapshot of a session for a presentation layer |
//! | `error`       | Error enums |

pub mod assembler;
pub mod catalog;
pub mod client_view;
pub mod error;
pub mod models;
pub mod scoring;
pub mod session;
pub mod telemetry;

// Types and entry points used outside the engine.
pub use assembler::assemble;
pub use catalog::Catalog;
pub use client_view::to_client_state;
pub use error::{CatalogError, QuizError, TelemetryError};
pub use models::{
    Question, QuizMode, ScoreSummary, SessionConfig, SessionState, Step, Topic, Verdict,
    DEFAULT_QUESTION_COUNT, QUESTION_COUNT_CHOICES,
};
pub use session::{Intent, QuizSession};
pub use telemetry::{EventParams, RecordingSink, Telemetry, TelemetryEvent, TelemetrySink};
