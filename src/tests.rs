//! End-to-end tests for the `web_quiz` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Assembly | Length and contents match the selected banks for every topic subset; catalog order; exam truncation |
//! | Scoring | Zero / full / +1 monotonicity over whole sessions |
//! | Scenarios | Practice wrong answer; exam truncation; exam all correct; exam nothing answered |
//! | Lifecycle | Submit idempotence; re-answer after submit; reset from every state |
//! | Telemetry | Event sequence for practice and exam runs; a broken sink never blocks a transition |
//! | Bundled banks | Every bundled topic can run a full practice and exam session |

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::quiz_engine::{
    assemble, scoring, Catalog, EventParams, Intent, Question, QuizError, QuizMode, QuizSession,
    RecordingSink, SessionConfig, Step, TelemetryError, TelemetrySink, Topic, Verdict,
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Fixture catalog: html (3 questions), css (2 questions).
fn fixture() -> Arc<Catalog> {
    let q = |text: &str, correct: usize| {
        Question::new(
            text,
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct,
        )
    };
    Catalog::new(vec![
        Topic::new("html", "HTML", vec![q("html-1", 0), q("html-2", 2), q("html-3", 1)]),
        Topic::new("css", "CSS", vec![q("css-1", 3), q("css-2", 0)]),
    ])
    .expect("fixture catalog is valid")
    .shared()
}

fn texts(session: &QuizSession) -> Vec<String> {
    session
        .state()
        .map(|s| s.questions.iter().map(|q| q.text.clone()).collect())
        .unwrap_or_default()
}

/// Start a session with the given setup.
fn started(topics: &[&str], mode: QuizMode, count: Option<u32>, shuffle: bool) -> QuizSession {
    let mut s = QuizSession::new(fixture()).with_rng_seed(42);
    for t in topics {
        s.toggle_topic(t, true).unwrap();
    }
    s.set_mode(mode).unwrap();
    s.set_question_count(count).unwrap();
    s.set_shuffle(shuffle).unwrap();
    s.start_session().unwrap();
    s
}

/// Answer every question correctly.
fn answer_all_correctly(s: &mut QuizSession) {
    let correct: Vec<usize> = s
        .state()
        .unwrap()
        .questions
        .iter()
        .map(|q| q.correct_index)
        .collect();
    for (i, c) in correct.into_iter().enumerate() {
        s.select_answer(i, c).unwrap();
    }
}

struct BrokenSink;

impl TelemetrySink for BrokenSink {
    fn log_event(&self, _: &str, _: &EventParams) -> Result<(), TelemetryError> {
        Err(TelemetryError("analytics unavailable".into()))
    }
}

// ── assembly properties ──────────────────────────────────────────────────────

#[test]
fn assembly_matches_selected_banks_for_every_subset() {
    let catalog = Catalog::builtin().unwrap();
    let ids: Vec<&str> = catalog.topics().iter().map(|t| t.id.as_str()).collect();
    let mut rng = StdRng::seed_from_u64(7);

    for mask in 1u32..(1 << ids.len()) {
        let chosen: Vec<&str> = ids
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, id)| *id)
            .collect();
        let mut config = SessionConfig::with_topics(chosen.iter().copied());
        config.shuffle = mask % 2 == 0;

        let qs = assemble(&config, &catalog, &mut rng).unwrap();
        let expected: usize = chosen
            .iter()
            .map(|id| catalog.topic(id).unwrap().questions.len())
            .sum();
        assert_eq!(qs.len(), expected, "wrong length for {chosen:?}");

        let mut got: Vec<&str> = qs.iter().map(|q| q.text.as_str()).collect();
        let mut want: Vec<&str> = chosen
            .iter()
            .flat_map(|id| catalog.topic(id).unwrap().questions.iter().map(|q| q.text.as_str()))
            .collect();
        got.sort_unstable();
        want.sort_unstable();
        assert_eq!(got, want, "question multiset differs for {chosen:?}");
    }
}

#[test]
fn unshuffled_assembly_follows_catalog_order() {
    let s = started(&["css", "html"], QuizMode::Practice, None, false);
    assert_eq!(texts(&s), ["html-1", "html-2", "html-3", "css-1", "css-2"]);
}

#[test]
fn exam_truncation_takes_a_prefix_of_the_shuffled_pool() {
    let full = started(&["html", "css"], QuizMode::Exam, None, true);
    let capped = started(&["html", "css"], QuizMode::Exam, Some(3), true);
    // Same seed, same pool, so the capped run is a prefix of the full run.
    assert_eq!(texts(&capped), texts(&full)[..3]);

    let over = started(&["css"], QuizMode::Exam, Some(20), true);
    assert_eq!(over.state().unwrap().questions.len(), 2);
}

// ── scoring over sessions ────────────────────────────────────────────────────

#[test]
fn scoring_is_zero_full_and_monotonic() {
    let mut s = started(&["html", "css"], QuizMode::Exam, None, false);
    assert_eq!(s.submit().unwrap().score, 0);

    for i in 0..5 {
        let q = s.state().unwrap().questions[i].clone();
        s.select_answer(i, (q.correct_index + 1) % 4).unwrap();
    }
    assert_eq!(s.submit().unwrap().score, 0);

    for i in 0..5 {
        let before = s.submit().unwrap().score;
        let correct = s.state().unwrap().questions[i].correct_index;
        s.select_answer(i, correct).unwrap();
        assert_eq!(s.submit().unwrap().score, before + 1);
    }
    assert_eq!(s.submit().unwrap().score, 5);

    let state = s.state().unwrap();
    assert_eq!(scoring::score(&state.questions, &state.answers), Ok(5));
}

// ── end-to-end scenarios ─────────────────────────────────────────────────────

#[test]
fn scenario_a_practice_wrong_answer_is_revealed() {
    let mut s = started(&["html"], QuizMode::Practice, None, false);
    assert_eq!(s.state().unwrap().questions.len(), 3);
    assert_eq!(s.state().unwrap().current_index, 0);

    // html-1 expects option 0.
    s.select_answer(0, 2).unwrap();
    assert!(s.state().unwrap().revealed);
    assert_eq!(s.verdict(0), Some(Verdict::Incorrect));
    assert_eq!(s.state().unwrap().score, None);
}

#[test]
fn scenario_b_exam_truncates_after_concatenation() {
    let s = started(&["html", "css"], QuizMode::Exam, Some(4), false);
    assert_eq!(texts(&s), ["html-1", "html-2", "html-3", "css-1"]);
}

#[test]
fn scenario_c_exam_all_correct() {
    let mut s = started(&["html", "css"], QuizMode::Exam, None, false);
    answer_all_correctly(&mut s);
    let summary = s.submit().unwrap();
    assert_eq!(summary.score, 5);
    assert_eq!(summary.percent, 100);
    assert!(s.state().unwrap().revealed);
    assert!((0..5).all(|i| s.verdict(i) == Some(Verdict::Correct)));
}

#[test]
fn scenario_d_exam_nothing_answered() {
    let mut s = started(&["html", "css"], QuizMode::Exam, None, false);
    let summary = s.submit().unwrap();
    assert_eq!(summary.score, 0);
    assert!(s.state().unwrap().revealed);
    for i in 0..5 {
        assert_eq!(s.verdict(i), Some(Verdict::Unanswered));
        assert!(s.state().unwrap().questions[i].correct_option().is_some());
    }
    let view = crate::to_client_state(&s);
    assert_eq!(view["quiz"]["questions"][4]["correct_option"], "A");
}

// ── lifecycle ────────────────────────────────────────────────────────────────

#[test]
fn submit_twice_gives_the_same_score() {
    let mut s = started(&["html"], QuizMode::Exam, None, false);
    s.select_answer(1, 2).unwrap();
    let first = s.submit().unwrap();
    let second = s.submit().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.score, 1);
}

#[test]
fn reanswering_after_submit_waits_for_the_next_submit() {
    let mut s = started(&["html"], QuizMode::Exam, None, false);
    s.submit().unwrap();
    s.select_answer(0, 0).unwrap();
    assert_eq!(s.state().unwrap().score, Some(0));
    assert!(s.state().unwrap().changed_since_submit);
    assert_eq!(crate::to_client_state(&s)["quiz"]["can_submit"], true);
    assert_eq!(s.submit().unwrap().score, 1);
    assert!(!s.state().unwrap().changed_since_submit);
}

#[test]
fn reset_restores_default_config_from_every_state() {
    let mut setup = QuizSession::new(fixture());
    setup.toggle_topic("css", true).unwrap();
    setup.set_mode(QuizMode::Exam).unwrap();
    setup.set_question_count(Some(5)).unwrap();

    let practice = started(&["html"], QuizMode::Practice, None, true);
    let exam = started(&["html", "css"], QuizMode::Exam, Some(2), false);
    let mut submitted = started(&["css"], QuizMode::Exam, None, false);
    submitted.submit().unwrap();

    for mut s in [setup, practice, exam, submitted] {
        s.reset();
        assert_eq!(s.step(), Step::Setup);
        assert!(s.state().is_none());
        assert_eq!(s.config(), &SessionConfig::default());
    }
}

#[test]
fn answers_stay_aligned_with_questions() {
    let mut s = started(&["html", "css"], QuizMode::Practice, None, true);
    for _ in 0..6 {
        s.select_current_answer(1).unwrap();
        s.advance().unwrap();
        let state = s.state().unwrap();
        assert_eq!(state.answers.len(), state.questions.len());
        assert!(state.current_index < state.questions.len());
    }
    assert!(s.is_last_question());
}

#[test]
fn mode_specific_transitions_are_rejected() {
    let mut practice = started(&["html"], QuizMode::Practice, None, false);
    assert!(matches!(practice.submit(), Err(QuizError::InvalidTransition { .. })));

    let mut exam = started(&["html"], QuizMode::Exam, None, false);
    assert!(matches!(exam.advance(), Err(QuizError::InvalidTransition { .. })));
    assert!(matches!(exam.retreat(), Err(QuizError::InvalidTransition { .. })));
}

// ── telemetry ────────────────────────────────────────────────────────────────

#[test]
fn exam_run_emits_start_and_done_events() {
    let sink = Arc::new(RecordingSink::new());
    let mut s = QuizSession::new(fixture()).with_rng_seed(1).with_telemetry(sink.clone());
    for intent in [
        Intent::ToggleTopic { topic_id: "html".into(), checked: true },
        Intent::ToggleTopic { topic_id: "css".into(), checked: true },
        Intent::SetMode { mode: QuizMode::Exam },
        Intent::SetQuestionCount { count: Some(4) },
        Intent::Start,
        Intent::SelectAnswer { question: 0, answer: 0 },
        Intent::Submit,
        Intent::Reset,
    ] {
        s.dispatch(intent).unwrap();
    }

    let events = sink.events();
    let names: Vec<&str> = events.iter().map(|(n, _)| n.as_str()).collect();
    // Reset from an exam sends nothing.
    assert_eq!(names, ["select_content", "select_content", "user_in_test", "user_done_test"]);

    assert_eq!(events[1].1["item_id"], "css");
    assert_eq!(events[2].1["topics"], "html, css");
    assert_eq!(events[2].1["shuffle"], "false");
    assert_eq!(events[2].1["question_count"], 4);
    assert_eq!(events[3].1["score"], 1);
    assert_eq!(events[3].1["total_questions"], 4);
    assert_eq!(events[3].1["topics"], "html, css");
}

#[test]
fn practice_reset_reports_questions_viewed() {
    let sink = Arc::new(RecordingSink::new());
    let mut s = QuizSession::new(fixture()).with_telemetry(sink.clone());
    s.toggle_topic("html", true).unwrap();
    s.set_shuffle(true).unwrap();
    s.start_session().unwrap();
    s.advance().unwrap();
    s.advance().unwrap();
    s.reset();

    let (name, params) = sink.events().pop().unwrap();
    assert_eq!(name, "user_done_practice");
    assert_eq!(params["questions_viewed"], 3);
    assert_eq!(params["topics"], "html");
}

#[test]
fn broken_sink_never_blocks_the_quiz() {
    let mut s = QuizSession::new(fixture()).with_telemetry(Arc::new(BrokenSink));
    s.toggle_topic("css", true).unwrap();
    s.set_mode(QuizMode::Exam).unwrap();
    s.start_session().unwrap();
    assert_eq!(s.step(), Step::InProgress);
    answer_all_correctly(&mut s);
    assert_eq!(s.submit().unwrap().score, 2);
    s.reset();
    assert_eq!(s.step(), Step::Setup);
}

#[test]
fn failed_start_sends_no_events() {
    let sink = Arc::new(RecordingSink::new());
    let mut s = QuizSession::new(fixture()).with_telemetry(sink.clone());
    assert!(s.start_session().is_err());
    assert!(sink.events().is_empty());
}

// ── bundled banks ────────────────────────────────────────────────────────────

#[test]
fn every_bundled_topic_runs_practice_and_exam() {
    let catalog = Catalog::builtin().unwrap().shared();
    let ids: Vec<String> = catalog.topics().iter().map(|t| t.id.clone()).collect();
    for id in ids {
        let mut practice = QuizSession::new(catalog.clone()).with_rng_seed(9);
        practice.toggle_topic(&id, true).unwrap();
        practice.start_session().unwrap();
        let n = practice.state().unwrap().questions.len();
        for _ in 0..n {
            practice.select_current_answer(0).unwrap();
            practice.advance().unwrap();
        }
        assert_eq!(practice.answered_count(), n, "practice run incomplete for {id}");

        let mut exam = QuizSession::new(catalog.clone()).with_rng_seed(9);
        exam.toggle_topic(&id, true).unwrap();
        exam.set_mode(QuizMode::Exam).unwrap();
        exam.set_shuffle(true).unwrap();
        exam.start_session().unwrap();
        answer_all_correctly(&mut exam);
        let summary = exam.submit().unwrap();
        assert_eq!(summary.score, summary.total, "exam score wrong for {id}");
    }
}
