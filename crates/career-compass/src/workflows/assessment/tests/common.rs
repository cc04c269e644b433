use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::workflows::assessment::analysis::AnalysisEngine;
use crate::workflows::assessment::domain::{AnswerRecord, AssessmentKind, Question, QuestionFormat};
use crate::workflows::assessment::orchestrator::AssessmentOrchestrator;
use crate::workflows::assessment::question_bank::QuestionBank;
use crate::workflows::assessment::selector::QuestionSelector;

pub(super) const ACTIVITY_PROMPT: &str = "Which activity excites you the most during free time?";
pub(super) const PROBLEM_PROMPT: &str =
    "Describe a challenging problem you recently solved and explain your approach:";
pub(super) const NUMBERS_PROMPT: &str =
    "How much do you enjoy working with numbers, data, and mathematical concepts?";
pub(super) const SUBJECT_PROMPT: &str = "Which subject area has always fascinated you the most?";

pub(super) const TECHNICAL_STORY: &str = "I rebuilt the technical wiring of our robotics kit by testing each circuit one at a time until the motor ran again.";

pub(super) fn activity_question() -> Question {
    Question::multiple(
        ACTIVITY_PROMPT,
        &[
            "Solving math puzzles and logical problems",
            "Reading about historical events and literature",
            "Conducting experiments and research",
            "Creating art, music, or designing things",
        ],
    )
}

pub(super) fn problem_question() -> Question {
    Question::text(PROBLEM_PROMPT, "Tell us about a time...")
}

pub(super) fn numbers_question() -> Question {
    Question::scale(NUMBERS_PROMPT, 1, 10)
}

pub(super) fn subject_question() -> Question {
    Question::multiple(
        SUBJECT_PROMPT,
        &[
            "Mathematics and Physics",
            "Economics and Business Studies",
            "Literature and Social Sciences",
            "Biology and Environmental Science",
        ],
    )
}

pub(super) fn record(index: usize, question: Question, answer: &str) -> AnswerRecord {
    AnswerRecord {
        question_index: index,
        question,
        answer: answer.to_string(),
        timestamp: Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, index as u32)
            .single()
            .expect("valid timestamp"),
    }
}

/// Math-leaning stream run: science wins with score 88 and confidence 78.
pub(super) fn science_stream_answers() -> Vec<AnswerRecord> {
    vec![
        record(
            0,
            activity_question(),
            "Solving math puzzles and logical problems",
        ),
        record(1, problem_question(), TECHNICAL_STORY),
        record(2, numbers_question(), "9"),
        record(3, subject_question(), "Mathematics and Physics"),
    ]
}

/// Answer the stream scenario question with the matching scripted response.
pub(super) fn science_answer_for(question: &Question) -> &'static str {
    match question.prompt.as_str() {
        ACTIVITY_PROMPT => "Solving math puzzles and logical problems",
        PROBLEM_PROMPT => TECHNICAL_STORY,
        NUMBERS_PROMPT => "9",
        SUBJECT_PROMPT => "Mathematics and Physics",
        other => panic!("unexpected prompt {other}"),
    }
}

/// Generic answer that every question format accepts.
pub(super) fn plausible_answer(question: &Question) -> String {
    match question.format {
        QuestionFormat::Multiple => question
            .options
            .first()
            .cloned()
            .unwrap_or_else(|| "First option".to_string()),
        QuestionFormat::Text => TECHNICAL_STORY.to_string(),
        QuestionFormat::Scale => "8".to_string(),
    }
}

pub(super) fn science_bank() -> QuestionBank {
    let mut pools = BTreeMap::new();
    pools.insert(
        AssessmentKind::Stream,
        vec![
            activity_question(),
            problem_question(),
            numbers_question(),
            subject_question(),
        ],
    );
    QuestionBank::new(pools, Vec::new())
}

pub(super) fn orchestrator_with(bank: QuestionBank, per_run: usize) -> AssessmentOrchestrator {
    AssessmentOrchestrator::new(
        QuestionSelector::with_size(Arc::new(bank), per_run),
        Arc::new(AnalysisEngine::standard()),
        StdRng::seed_from_u64(42),
    )
}

/// Answer every remaining question of the active run with `answer_for`.
pub(super) fn finish_run<F>(orchestrator: &mut AssessmentOrchestrator, answer_for: F)
where
    F: Fn(&Question) -> String,
{
    while let Some(question) = orchestrator.current_question().cloned() {
        orchestrator
            .submit(&answer_for(&question))
            .expect("answer accepted");
    }
}

pub(super) async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json body")
}
