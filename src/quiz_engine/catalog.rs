//! Question bank catalog.
//!
//! The ten bundled banks live in `data/*.json` and are compiled into the
//! binary. Each file is a JSON array of `{"question", "option", "correct"}`
//! records. Callers shipping their own banks can use [`Catalog::from_json`],
//! which takes an array of `{"id", "label", "questions"}` objects.
//!
//! Every constructor validates the banks, so the rest of the engine can rely
//! on: unique topic ids, no empty topics, at least two options per question,
//! and an in-range correct index.

use std::collections::HashSet;
use std::sync::Arc;

use crate::quiz_engine::{
    error::CatalogError,
    models::{Question, Topic},
};

/// (id, label, bank JSON) in the order the setup screen lists them.
const BUILTIN_BANKS: [(&str, &str, &str); 10] = [
    ("html",       "HTML",        include_str!("../../data/html.json")),
    ("css",        "CSS",         include_str!("../../data/css.json")),
    ("js",         "JavaScript",  include_str!("../../data/js.json")),
    ("php",        "PHP",         include_str!("../../data/php.json")),
    ("mysql",      "MySQL",       include_str!("../../data/mysql.json")),
    ("jquery",     "jQuery",      include_str!("../../data/jquery.json")),
    ("bootstrap",  "Bootstrap 3", include_str!("../../data/bootstrap.json")),
    ("bootstrap4", "Bootstrap 4", include_str!("../../data/bootstrap4.json")),
    ("bootstrap5", "Bootstrap 5", include_str!("../../data/bootstrap5.json")),
    ("xml",        "XML",         include_str!("../../data/xml.json")),
];

/// Read-only, ordered collection of topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    topics: Vec<Topic>,
}

impl Catalog {
    /// Build a catalog from already-parsed topics, validating them.
    pub fn new(topics: Vec<Topic>) -> Result<Self, CatalogError> {
        validate(&topics)?;
        Ok(Catalog { topics })
    }

    /// Parse an array of `{"id", "label", "questions": [...]}` objects.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let topics: Vec<Topic> = serde_json::from_str(json)?;
        Catalog::new(topics)
    }

    /// The bundled web-development banks.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut topics = Vec::with_capacity(BUILTIN_BANKS.len());
        for (id, label, bank) in BUILTIN_BANKS {
            let questions: Vec<Question> = serde_json::from_str(bank)?;
            topics.push(Topic::new(id, label, questions));
        }
        Catalog::new(topics)
    }

    /// Wrap in an `Arc` for sharing with sessions.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.topic(id).is_some()
    }

    pub fn total_questions(&self) -> usize {
        self.topics.iter().map(|t| t.questions.len()).sum()
    }
}

fn validate(topics: &[Topic]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for topic in topics {
        if !seen.insert(topic.id.as_str()) {
            return Err(CatalogError::DuplicateTopic(topic.id.clone()));
        }
        if topic.questions.is_empty() {
            return Err(CatalogError::EmptyTopic(topic.id.clone()));
        }
        for (index, q) in topic.questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(CatalogError::TooFewOptions { topic: topic.id.clone(), index });
            }
            if q.correct_index >= q.options.len() {
                return Err(CatalogError::CorrectOutOfRange {
                    topic: topic.id.clone(),
                    index,
                    correct: q.correct_index,
                    options: q.options.len(),
                });
            }
        }
    }
    Ok(())
}
