//! Scoring: tally, per-question verdicts and the percentage summary.

use crate::quiz_engine::{
    error::QuizError,
    models::{Question, ScoreSummary, Verdict},
};

/// Count answers that match their question's correct option.
///
/// `questions` and `answers` must be the same length. Unanswered entries
/// never count.
pub fn score<Q: AsRef<Question>>(questions: &[Q], answers: &[Option<usize>]) -> Result<usize, QuizError> {
    if questions.len() != answers.len() {
        return Err(QuizError::LengthMismatch {
            questions: questions.len(),
            answers: answers.len(),
        });
    }
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|&(q, a)| match a {
            Some(i) => q.as_ref().is_correct(*i),
            None => false,
        })
        .count();
    Ok(correct)
}

pub fn verdict(question: &Question, answer: Option<usize>) -> Verdict {
    match answer {
        None => Verdict::Unanswered,
        Some(i) if question.is_correct(i) => Verdict::Correct,
        Some(_) => Verdict::Incorrect,
    }
}

/// Score plus rounded percentage; an empty quiz is 0%.
pub fn summarize(score: usize, total: usize) -> ScoreSummary {
    let percent = if total == 0 {
        0
    } else {
        ((score as f64 / total as f64) * 100.0).round() as u32
    };
    ScoreSummary { score, total, percent }
}
