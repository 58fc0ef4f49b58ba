//! # web_quiz
//!
//! An offline multiple-choice quiz engine for web-development question banks.
//!
//! The library holds everything a quiz front end needs except the rendering:
//! a catalog of topic banks (HTML, CSS, JavaScript, PHP, MySQL, jQuery,
//! Bootstrap 3/4/5, XML), the session state machine, scoring, and a telemetry
//! seam for analytics.
//!
//! ## How it works
//!
//! 1. Load a [`Catalog`] (the bundled banks via [`Catalog::builtin`], or your
//!    own JSON via [`Catalog::from_json`]) and create a [`QuizSession`].
//! 2. Fill in the setup form: tick topics, pick [`QuizMode::Practice`] or
//!    [`QuizMode::Exam`], optionally shuffle and (exam only) cap the count.
//! 3. Call [`QuizSession::start_session`] — the engine concatenates the
//!    selected banks in catalog order, shuffles with Fisher-Yates if asked, and
//!    truncates exams to the requested count.
//! 4. Answer, navigate, submit, reset. [`to_client_state`] renders the whole
//!    session as JSON for any UI.
//!
//! ## Modes
//!
//! - **Practice**: one question at a time; answering reveals correctness
//!   immediately, moving on hides it again.
//! - **Exam**: all questions at once; [`QuizSession::submit`] scores and
//!   reveals everything. Submitting again after changing answers re-scores.
//!
//! ## Quick start
//!
//! ```rust
//! use web_quiz::{Catalog, QuizMode, QuizSession};
//!
//! let catalog = Catalog::builtin().expect("bundled banks are valid").shared();
//! let mut session = QuizSession::new(catalog).with_rng_seed(42);
//!
//! session.toggle_topic("html", true).unwrap();
//! session.toggle_topic("css", true).unwrap();
//! session.set_mode(QuizMode::Exam).unwrap();
//! session.set_question_count(Some(5)).unwrap();
//! session.set_shuffle(true).unwrap();
//! session.start_session().unwrap();
//!
//! session.select_answer(0, 1).unwrap();
//! let summary = session.submit().unwrap();
//! println!("Score: {summary}");
//!
//! session.reset();
//! ```

pub mod quiz_engine;

// Flat API: everything a front end touches lives at the crate root.
pub use quiz_engine::{
    assemble, to_client_state, Catalog, CatalogError, EventParams, Intent, Question, QuizError,
    QuizMode, QuizSession, RecordingSink, ScoreSummary, SessionConfig, SessionState, Step,
    Telemetry, TelemetryError, TelemetryEvent, TelemetrySink, Topic, Verdict,
    DEFAULT_QUESTION_COUNT, QUESTION_COUNT_CHOICES,
};

#[cfg(test)]
mod tests;
