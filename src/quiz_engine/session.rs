//! The quiz session controller.
//!
//! [`QuizSession`] owns the setup form ([`SessionConfig`]) and, once a quiz is
//! running, the live [`SessionState`]. Every user action is a method here (or
//! an [`Intent`] passed to [`QuizSession::dispatch`]) and runs synchronously.
//!
//! ```text
//!   Setup ──start_session──▶ InProgress ──reset──▶ Setup
//!     ▲ toggle_topic / set_*      │ select_answer
//!     │                           │ advance / retreat   (practice)
//!     └───────────────────────────┘ submit              (exam)
//! ```

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::quiz_engine::{
    assembler,
    catalog::Catalog,
    error::QuizError,
    models::{Question, QuizMode, ScoreSummary, SessionConfig, SessionState, Step, Verdict},
    scoring,
    telemetry::{Telemetry, TelemetryEvent, TelemetrySink},
};

/// One user action, as dispatched by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    ToggleTopic { topic_id: String, checked: bool },
    SetShuffle { shuffle: bool },
    SetMode { mode: QuizMode },
    SetQuestionCount { count: Option<u32> },
    Start,
    /// Answer a specific question (exam screen).
    SelectAnswer { question: usize, answer: usize },
    /// Answer whichever question is showing (practice screen).
    SelectCurrentAnswer { answer: usize },
    Advance,
    Retreat,
    Submit,
    Reset,
}

pub struct QuizSession {
    catalog: Arc<Catalog>,
    config: SessionConfig,
    /// `Some` exactly while the quiz is in progress.
    state: Option<SessionState>,
    telemetry: Telemetry,
    rng: StdRng,
}

impl std::fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("telemetry", &self.telemetry)
            .finish_non_exhaustive()
    }
}

impl QuizSession {
    /// New session at the setup step, shuffling from OS entropy and with
    /// telemetry disabled.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        QuizSession {
            catalog,
            config: SessionConfig::default(),
            state: None,
            telemetry: Telemetry::disabled(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Make shuffles reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Telemetry::new(sink);
        self
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn step(&self) -> Step {
        if self.state.is_some() { Step::InProgress } else { Step::Setup }
    }

    pub fn mode(&self) -> QuizMode {
        self.config.mode
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// Whether the start action should be enabled.
    pub fn can_start(&self) -> bool {
        self.step() == Step::Setup && !self.config.selected_topic_ids.is_empty()
    }

    /// The question the practice screen is showing.
    pub fn current_question(&self) -> Option<&Question> {
        let state = self.state.as_ref()?;
        state.questions.get(state.current_index).map(Arc::as_ref)
    }

    pub fn is_last_question(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.current_index + 1 == s.questions.len())
    }

    pub fn answered_count(&self) -> usize {
        self.state
            .as_ref()
            .map_or(0, |s| s.answers.iter().filter(|a| a.is_some()).count())
    }

    pub fn verdict(&self, question_index: usize) -> Option<Verdict> {
        let state = self.state.as_ref()?;
        let question = state.questions.get(question_index)?;
        let answer = state.answers.get(question_index).copied().flatten();
        Some(scoring::verdict(question, answer))
    }

    /// Score summary once an exam has been submitted.
    pub fn summary(&self) -> Option<ScoreSummary> {
        let state = self.state.as_ref()?;
        state.score.map(|score| scoring::summarize(score, state.questions.len()))
    }

    fn describe(&self) -> String {
        match self.step() {
            Step::Setup => Step::Setup.to_string(),
            Step::InProgress => format!("{} ({})", Step::InProgress, self.config.mode),
        }
    }

    // -----------------------------------------------------------------------
    // Setup form
    // -----------------------------------------------------------------------

    fn require_setup(&self, action: &'static str) -> Result<(), QuizError> {
        if self.step() == Step::Setup {
            Ok(())
        } else {
            Err(QuizError::transition(action, self.describe()))
        }
    }

    pub fn toggle_topic(&mut self, topic_id: &str, checked: bool) -> Result<(), QuizError> {
        self.require_setup("change topics")?;
        if !self.catalog.contains(topic_id) {
            return Err(QuizError::InvalidConfiguration(format!("unknown topic '{topic_id}'")));
        }
        if checked {
            self.config.select_topic(topic_id);
        } else {
            self.config.deselect_topic(topic_id);
        }
        Ok(())
    }

    pub fn set_shuffle(&mut self, shuffle: bool) -> Result<(), QuizError> {
        self.require_setup("change shuffle")?;
        self.config.shuffle = shuffle;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: QuizMode) -> Result<(), QuizError> {
        self.require_setup("change mode")?;
        self.config.mode = mode;
        Ok(())
    }

    pub fn set_question_count(&mut self, count: Option<u32>) -> Result<(), QuizError> {
        self.require_setup("change question count")?;
        if count == Some(0) {
            return Err(QuizError::InvalidConfiguration("question count must be positive".into()));
        }
        self.config.question_count = count;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Assemble the questions and move to the in-progress step.
    ///
    /// Telemetry is only sent once assembly has succeeded.
    pub fn start_session(&mut self) -> Result<(), QuizError> {
        self.require_setup("start a session")?;
        let questions = assembler::assemble(&self.config, &self.catalog, &mut self.rng)?;
        info!(
            mode = %self.config.mode,
            topics = %self.config.topics_joined(),
            shuffle = self.config.shuffle,
            questions = questions.len(),
            "quiz session started"
        );
        self.state = Some(SessionState::new(questions));
        self.telemetry.emit_all(&TelemetryEvent::session_started(&self.config));
        Ok(())
    }

    /// Record an answer. Re-answering overwrites.
    ///
    /// In practice mode an answer to the current question reveals it at once.
    /// In exam mode an answer changed after a submit marks the score stale
    /// until the next [`submit`](Self::submit).
    pub fn select_answer(&mut self, question_index: usize, answer_index: usize) -> Result<(), QuizError> {
        let mode = self.config.mode;
        let Some(state) = self.state.as_mut() else {
            return Err(QuizError::transition("answer", Step::Setup.to_string()));
        };
        let question = state.questions.get(question_index).ok_or(QuizError::OutOfRangeIndex {
            what: "question",
            index: question_index,
            len: state.questions.len(),
        })?;
        if answer_index >= question.options.len() {
            return Err(QuizError::OutOfRangeIndex {
                what: "answer",
                index: answer_index,
                len: question.options.len(),
            });
        }
        state.answers[question_index] = Some(answer_index);
        match mode {
            QuizMode::Practice if question_index == state.current_index => state.revealed = true,
            QuizMode::Exam if state.score.is_some() => state.changed_since_submit = true,
            _ => {}
        }
        debug!(question = question_index, answer = answer_index, "answer selected");
        Ok(())
    }

    pub fn select_current_answer(&mut self, answer_index: usize) -> Result<(), QuizError> {
        let current = self
            .state
            .as_ref()
            .map(|s| s.current_index)
            .ok_or_else(|| QuizError::transition("answer", self.describe()))?;
        self.select_answer(current, answer_index)
    }

    fn practice_state(&mut self, action: &'static str) -> Result<&mut SessionState, QuizError> {
        let description = self.describe();
        match (self.config.mode, self.state.as_mut()) {
            (QuizMode::Practice, Some(state)) => Ok(state),
            _ => Err(QuizError::transition(action, description)),
        }
    }

    /// Next question; a no-op on the last one. Always hides the reveal.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        let state = self.practice_state("advance")?;
        if state.current_index + 1 < state.questions.len() {
            state.current_index += 1;
        }
        state.revealed = false;
        debug!(current = state.current_index, "advanced");
        Ok(())
    }

    /// Previous question; a no-op on the first one. Always hides the reveal.
    pub fn retreat(&mut self) -> Result<(), QuizError> {
        let state = self.practice_state("retreat")?;
        state.current_index = state.current_index.saturating_sub(1);
        state.revealed = false;
        debug!(current = state.current_index, "retreated");
        Ok(())
    }

    /// Score the exam and reveal every answer. Safe to call again after
    /// changing answers; the score is recomputed each time.
    pub fn submit(&mut self) -> Result<ScoreSummary, QuizError> {
        let description = self.describe();
        let state = match (self.config.mode, self.state.as_mut()) {
            (QuizMode::Exam, Some(state)) => state,
            _ => return Err(QuizError::transition("submit", description)),
        };
        let score = scoring::score(&state.questions, &state.answers)?;
        state.score = Some(score);
        state.revealed = true;
        state.changed_since_submit = false;
        let summary = scoring::summarize(score, state.questions.len());
        info!(%summary, "exam submitted");
        self.telemetry.emit(&TelemetryEvent::ExamSubmitted {
            score,
            total_questions: summary.total,
            topics: self.config.topics_joined(),
        });
        Ok(summary)
    }

    /// Back to a blank setup form from any step.
    pub fn reset(&mut self) {
        if let (QuizMode::Practice, Some(state)) = (self.config.mode, self.state.as_ref()) {
            self.telemetry.emit(&TelemetryEvent::PracticeFinished {
                topics: self.config.topics_joined(),
                questions_viewed: state.current_index + 1,
            });
        }
        if self.state.is_some() {
            info!("quiz session reset");
        }
        self.state = None;
        self.config = SessionConfig::default();
    }

    /// Apply one intent.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), QuizError> {
        match intent {
            Intent::ToggleTopic { topic_id, checked } => self.toggle_topic(&topic_id, checked),
            Intent::SetShuffle { shuffle }            => self.set_shuffle(shuffle),
            Intent::SetMode { mode }                  => self.set_mode(mode),
            Intent::SetQuestionCount { count }        => self.set_question_count(count),
            Intent::Start                             => self.start_session(),
            Intent::SelectAnswer { question, answer } => self.select_answer(question, answer),
            Intent::SelectCurrentAnswer { answer }    => self.select_current_answer(answer),
            Intent::Advance                           => self.advance(),
            Intent::Retreat                           => self.retreat(),
            Intent::Submit                            => self.submit().map(|_| ()),
            Intent::Reset => {
                self.reset();
                Ok(())
            }
        }
    }
}
