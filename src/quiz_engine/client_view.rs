use serde_json::{json, Value};

use crate::quiz_engine::{
    models::{Question, QuizMode, Verdict, DEFAULT_QUESTION_COUNT, QUESTION_COUNT_CHOICES},
    scoring,
    session::QuizSession,
};

/// Build one option entry. Highlighting is only filled in once revealed.
fn option_entry(question: &Question, index: usize, text: &str, selected: Option<usize>, revealed: bool) -> Value {
    let highlight = if !revealed {
        Value::Null
    } else if index == question.correct_index {
        json!("correct")
    } else if Some(index) == selected {
        json!("wrong")
    } else {
        Value::Null
    };
    json!({
        "index": index,
        "text": text,
        "selected": Some(index) == selected,
        "highlight": highlight,
    })
}

/// Build one question entry as shown on the practice or exam screen.
///
/// Correctness fields are `null` until the question is revealed, so a client
/// cannot read answers off the payload early.
fn question_entry(question: &Question, number: usize, selected: Option<usize>, revealed: bool) -> Value {
    let options: Vec<Value> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, text)| option_entry(question, i, text, selected, revealed))
        .collect();

    let (verdict, correct_option) = if revealed {
        (json!(scoring::verdict(question, selected)), json!(question.correct_option()))
    } else {
        (Value::Null, Value::Null)
    };

    json!({
        "number": number,
        "text": question.text,
        "options": options,
        "selected": selected,
        "answered": selected.is_some(),
        "verdict": verdict,
        "correct_option": correct_option,
    })
}

/// Setup screen: every topic with its question count, plus the form values.
fn setup_view(session: &QuizSession) -> Value {
    let config = session.config();
    let topics: Vec<Value> = session
        .catalog()
        .topics()
        .iter()
        .map(|t| json!({
            "id": t.id,
            "label": t.label,
            "question_count": t.questions.len(),
            "checked": config.is_selected(&t.id),
        }))
        .collect();

    json!({
        "topics": topics,
        "mode": config.mode,
        "shuffle": config.shuffle,
        "question_count": config.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
        "question_count_choices": QUESTION_COUNT_CHOICES,
        "can_start": session.can_start(),
    })
}

/// Map a [`QuizSession`] to the JSON object a presentation layer renders.
pub fn to_client_state(session: &QuizSession) -> Value {
    let step = session.step();
    let Some(state) = session.state() else {
        return json!({ "step": step, "setup": setup_view(session) });
    };
    let total = state.questions.len();

    let body = match session.mode() {
        QuizMode::Practice => {
            let i = state.current_index;
            let current = state
                .questions
                .get(i)
                .map(|q| question_entry(q, i + 1, state.answers[i], state.revealed))
                .unwrap_or(Value::Null);
            let verdict_label = match session.verdict(i) {
                Some(Verdict::Correct) if state.revealed => json!("correct"),
                Some(_) if state.revealed => json!("wrong"),
                _ => Value::Null,
            };
            json!({
                "position": format!("{} / {}", i + 1, total),
                "question": current,
                "feedback": verdict_label,
                "can_retreat": i > 0,
                "can_advance": state.revealed && !session.is_last_question(),
            })
        }
        QuizMode::Exam => {
            let questions: Vec<Value> = state
                .questions
                .iter()
                .zip(&state.answers)
                .enumerate()
                .map(|(i, (q, a))| question_entry(q, i + 1, *a, state.revealed))
                .collect();
            json!({
                "questions": questions,
                "answered": session.answered_count(),
                "total": total,
                "score": session.summary(),
                "score_stale": state.changed_since_submit,
                "can_submit": !state.revealed || state.changed_since_submit,
            })
        }
    };

    json!({
        "step": step,
        "mode": session.mode(),
        "topics": session.config().topics_joined(),
        "quiz": body,
    })
}
