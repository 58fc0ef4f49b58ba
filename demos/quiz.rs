//! Console walkthrough of a practice run and an exam run.
//!
//! Run with: `cargo run --example quiz`
//! Set `RUST_LOG=web_quiz=debug` to see every transition.
//!
//! 1. **Practice** — two XML questions answered one at a time; each answer is
//!    revealed immediately, moving on hides the reveal again.
//! 2. **Exam** — five shuffled HTML + CSS questions (fixed seed), a few
//!    answered, then submitted and scored.
//!
//! Telemetry goes to a `RecordingSink` and is printed at the end, so the
//! analytics calls a real front end would make are visible.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use web_quiz::{to_client_state, Catalog, Intent, QuizMode, QuizSession, RecordingSink, Verdict};

fn divider(ch: char, n: usize) { println!("{}", ch.to_string().repeat(n)); }

/// Print the question the practice screen shows, with the reveal if any.
fn print_practice(session: &QuizSession) {
    let (Some(state), Some(q)) = (session.state(), session.current_question()) else { return };
    println!("  Question {} / {}", state.current_index + 1, state.questions.len());
    println!("  Q: {}", q.text);
    let selected = state.answers[state.current_index];
    for (i, opt) in q.options.iter().enumerate() {
        let marker = match (state.revealed, i == q.correct_index, Some(i) == selected) {
            (true, true, _) => "✓",
            (true, false, true) => "✗",
            (false, _, true) => "•",
            _ => " ",
        };
        println!("    [{i}] {marker} {opt}");
    }
    if state.revealed {
        let verdict = session.verdict(state.current_index).unwrap_or(Verdict::Unanswered);
        println!("  → {verdict}. Correct answer: {}", q.correct_option().unwrap_or("?"));
    }
    println!();
}

fn print_exam(session: &QuizSession) {
    let Some(state) = session.state() else { return };
    println!("  Exam — {} questions, answered {}/{}",
        state.questions.len(), session.answered_count(), state.questions.len());
    if let Some(summary) = session.summary() {
        println!("  Score: {summary}");
    }
    println!();
    for (i, q) in state.questions.iter().enumerate() {
        let status = match (state.revealed, session.verdict(i)) {
            (true, Some(v)) => v.to_string(),
            (false, _) if state.answers[i].is_some() => "answered".into(),
            _ => String::new(),
        };
        println!("  {}. {}  {}", i + 1, q.text, status);
        if state.revealed {
            println!("       correct: {}", q.correct_option().unwrap_or("?"));
        }
    }
    println!();
}

fn run(session: &mut QuizSession, intent: Intent) {
    if let Err(e) = session.dispatch(intent) {
        println!("  ! {e}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = match Catalog::builtin() {
        Ok(c) => c.shared(),
        Err(e) => {
            eprintln!("bundled question banks are invalid: {e}");
            return;
        }
    };
    let sink = Arc::new(RecordingSink::new());
    let mut session = QuizSession::new(catalog.clone())
        .with_rng_seed(2024)
        .with_telemetry(sink.clone());

    println!();
    println!("  WEB QUIZ — {} topics, {} questions", catalog.topics().len(), catalog.total_questions());
    for t in catalog.topics() {
        println!("    {:<11} {} ({} questions)", t.id, t.label, t.questions.len());
    }
    println!();

    // ── practice ──
    divider('═', 60);
    println!("  PRACTICE");
    divider('─', 60);
    run(&mut session, Intent::ToggleTopic { topic_id: "xml".into(), checked: true });
    run(&mut session, Intent::Start);
    print_practice(&session);
    run(&mut session, Intent::SelectCurrentAnswer { answer: 0 });
    print_practice(&session);
    run(&mut session, Intent::Advance);
    run(&mut session, Intent::SelectCurrentAnswer { answer: 2 });
    print_practice(&session);
    run(&mut session, Intent::Submit); // refused in practice mode
    run(&mut session, Intent::Reset);

    // ── exam ──
    divider('═', 60);
    println!("  EXAM");
    divider('─', 60);
    for intent in [
        Intent::ToggleTopic { topic_id: "html".into(), checked: true },
        Intent::ToggleTopic { topic_id: "css".into(), checked: true },
        Intent::SetMode { mode: QuizMode::Exam },
        Intent::SetQuestionCount { count: Some(5) },
        Intent::SetShuffle { shuffle: true },
        Intent::Start,
        Intent::SelectAnswer { question: 0, answer: 0 },
        Intent::SelectAnswer { question: 1, answer: 1 },
        Intent::SelectAnswer { question: 3, answer: 2 },
    ] {
        run(&mut session, intent);
    }
    print_exam(&session);
    run(&mut session, Intent::Submit);
    print_exam(&session);

    println!("  Client state (what a UI would render):");
    let view = to_client_state(&session);
    match serde_json::to_string_pretty(&view["quiz"]["score"]) {
        Ok(s) => println!("{s}"),
        Err(e) => println!("  ! {e}"),
    }
    run(&mut session, Intent::Reset);

    // ── telemetry ──
    divider('═', 60);
    println!("  TELEMETRY");
    divider('─', 60);
    for (name, params) in sink.events() {
        println!("  {name:<20} {}", serde_json::Value::Object(params));
    }
    divider('═', 60);
    println!();
}
