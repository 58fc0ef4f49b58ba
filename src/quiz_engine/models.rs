use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Question bank records
// ---------------------------------------------------------------------------

/// One multiple-choice question as stored in a bank.
///
/// The serialized field names follow the bundled bank files
/// (`{"question", "option", "correct"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    #[serde(rename = "option")]
    pub options: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_index: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        Question { text: text.into(), options, correct_index }
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }

    /// Text of the correct option, if the record is well formed.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

impl AsRef<Question> for Question {
    fn as_ref(&self) -> &Question {
        self
    }
}

/// A named question bank. Questions are shared with sessions via `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub label: String,
    pub questions: Vec<Arc<Question>>,
}

impl Topic {
    pub fn new(id: impl Into<String>, label: impl Into<String>, questions: Vec<Question>) -> Self {
        Topic {
            id: id.into(),
            label: label.into(),
            questions: questions.into_iter().map(Arc::new).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// One question at a time, correctness shown right after answering.
    #[default]
    Practice,
    /// All questions at once, correctness shown after submission.
    Exam,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Practice => write!(f, "practice"),
            QuizMode::Exam     => write!(f, "exam"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Setup,
    InProgress,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Setup      => write!(f, "setup"),
            Step::InProgress => write!(f, "in progress"),
        }
    }
}

/// Question counts offered by the exam form.
pub const QUESTION_COUNT_CHOICES: [u32; 5] = [5, 10, 15, 20, 30];

/// Count the exam form displays while no count has been picked.
/// Only a display hint: an unset count still means "use every question".
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// What the user picked on the setup screen.
///
/// `selected_topic_ids` behaves as a set (no duplicates) but keeps the order
/// topics were ticked in, which is the order telemetry reports them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub selected_topic_ids: Vec<String>,
    pub shuffle: bool,
    pub mode: QuizMode,
    /// Exam mode only; ignored in practice mode.
    pub question_count: Option<u32>,
}

impl SessionConfig {
    /// Config with the given topics selected and everything else at defaults.
    pub fn with_topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = SessionConfig::default();
        for id in topics {
            config.select_topic(id);
        }
        config
    }

    pub fn is_selected(&self, topic_id: &str) -> bool {
        self.selected_topic_ids.iter().any(|t| t == topic_id)
    }

    /// Add a topic id; already-selected ids are left alone.
    pub fn select_topic(&mut self, topic_id: impl Into<String>) {
        let topic_id = topic_id.into();
        if !self.is_selected(&topic_id) {
            self.selected_topic_ids.push(topic_id);
        }
    }

    pub fn deselect_topic(&mut self, topic_id: &str) {
        self.selected_topic_ids.retain(|t| t != topic_id);
    }

    /// Selected ids joined the way telemetry reports them ("html, css").
    pub fn topics_joined(&self) -> String {
        self.selected_topic_ids.join(", ")
    }

    /// The truncation limit that actually applies, given the mode.
    pub fn effective_limit(&self) -> Option<usize> {
        match self.mode {
            QuizMode::Exam     => self.question_count.map(|n| n as usize),
            QuizMode::Practice => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session state / scoring results
// ---------------------------------------------------------------------------

/// Live state of one quiz run, created at session start and dropped on reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub questions: Vec<Arc<Question>>,
    /// One entry per question; `None` means unanswered.
    pub answers: Vec<Option<usize>>,
    /// Practice mode only.
    pub current_index: usize,
    pub revealed: bool,
    pub score: Option<usize>,
    /// Exam only: an answer changed after the last submit, so `score` is stale.
    pub changed_since_submit: bool,
}

impl SessionState {
    pub fn new(questions: Vec<Arc<Question>>) -> Self {
        let answers = vec![None; questions.len()];
        SessionState {
            questions,
            answers,
            current_index: 0,
            revealed: false,
            score: None,
            changed_since_submit: false,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Correctness annotation for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct    => write!(f, "Correct"),
            Verdict::Incorrect  => write!(f, "Incorrect"),
            Verdict::Unanswered => write!(f, "Unanswered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percent: u32,
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.score, self.total, self.percent)
    }
}
