use std::sync::Arc;

use rand::Rng;

use crate::quiz_engine::{
    catalog::Catalog,
    error::QuizError,
    models::{Question, SessionConfig},
};

/// Build the question sequence for one session.
///
/// Selected topics are concatenated in catalog order, not selection order.
/// Shuffling (if enabled) happens before exam truncation, so a truncated exam
/// draws from the whole pool. Selected ids missing from the catalog are
/// skipped.
pub fn assemble<R: Rng>(
    config: &SessionConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<Arc<Question>>, QuizError> {
    if config.selected_topic_ids.is_empty() {
        return Err(QuizError::InvalidConfiguration("no topics selected".into()));
    }

    let mut questions: Vec<Arc<Question>> = catalog
        .topics()
        .iter()
        .filter(|t| config.is_selected(&t.id))
        .flat_map(|t| t.questions.iter().cloned())
        .collect();

    if config.shuffle {
        shuffle(&mut questions, rng);
    }

    if let Some(limit) = config.effective_limit() {
        questions.truncate(limit);
    }

    if questions.is_empty() {
        return Err(QuizError::InvalidConfiguration(format!(
            "topics [{}] produced no questions",
            config.topics_joined()
        )));
    }
    Ok(questions)
}

/// Uniform in-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
