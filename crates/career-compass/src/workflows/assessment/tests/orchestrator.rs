use super::common::*;
use std::cell::Cell;
use std::collections::BTreeMap;

use crate::workflows::assessment::domain::{AssessmentKind, AssessmentState, Question};
use crate::workflows::assessment::error::AssessmentError;
use crate::workflows::assessment::orchestrator::{AssessmentOrchestrator, SubmitOutcome};
use crate::workflows::assessment::question_bank::{AdaptiveRule, QuestionBank};

#[test]
fn scripted_stream_run_completes_with_science() {
    let mut orchestrator = orchestrator_with(science_bank(), 4);
    assert_eq!(orchestrator.state(), AssessmentState::Idle);

    let questions = orchestrator
        .start(AssessmentKind::Stream)
        .expect("start")
        .to_vec();
    assert_eq!(questions.len(), 4);

    let mut outcome = None;
    for (index, question) in questions.iter().enumerate() {
        assert_eq!(orchestrator.current_question(), Some(question));
        let step = orchestrator
            .submit(science_answer_for(question))
            .expect("answer accepted");
        if index < 3 {
            match &step {
                SubmitOutcome::Advanced(progress) => {
                    assert_eq!(progress.question_index, index + 1);
                    assert_eq!(progress.total_questions, 4);
                }
                other => panic!("expected advance, got {other:?}"),
            }
        }
        outcome = Some(step);
    }

    let result = match outcome {
        Some(SubmitOutcome::Completed(result)) => result,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(result.primary, "Science Stream (PCM)");
    assert_eq!(result.score, 88);
    assert_eq!(result.confidence, 78);
    assert_eq!(result.answers.len(), 4);
    assert!(result
        .answers
        .iter()
        .enumerate()
        .all(|(index, answer)| answer.question_index == index));

    assert_eq!(
        orchestrator.state(),
        AssessmentState::Completed(AssessmentKind::Stream)
    );
    assert!(orchestrator.session().is_none());
    assert_eq!(orchestrator.result(AssessmentKind::Stream), Some(&result));
}

#[test]
fn blank_submission_keeps_the_current_question() {
    let mut orchestrator = AssessmentOrchestrator::seeded(9);
    orchestrator.start(AssessmentKind::Degree).expect("start");
    let question = orchestrator.current_question().cloned();

    for blank in ["", "   ", "\n\t"] {
        assert_eq!(
            orchestrator.submit(blank),
            Err(AssessmentError::EmptyAnswer)
        );
    }

    assert_eq!(
        orchestrator.state(),
        AssessmentState::InProgress(AssessmentKind::Degree)
    );
    let session = orchestrator.session().expect("session");
    assert_eq!(session.question_index(), 0);
    assert!(session.pending_answers().is_empty());
    assert_eq!(orchestrator.current_question().cloned(), question);
}

#[test]
fn failed_final_analysis_leaves_the_run_in_place() {
    let mut pools = BTreeMap::new();
    pools.insert(AssessmentKind::Stream, vec![numbers_question()]);
    let mut orchestrator = orchestrator_with(QuestionBank::new(pools, Vec::new()), 1);
    orchestrator.start(AssessmentKind::Stream).expect("start");

    match orchestrator.submit("11") {
        Err(AssessmentError::MalformedAnswer { question_index, .. }) => {
            assert_eq!(question_index, 0)
        }
        other => panic!("expected malformed answer, got {other:?}"),
    }
    assert_eq!(
        orchestrator.state(),
        AssessmentState::InProgress(AssessmentKind::Stream)
    );
    assert!(orchestrator.result(AssessmentKind::Stream).is_none());

    let outcome = orchestrator.submit("10").expect("valid retry");
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
}

#[test]
fn invalid_scale_answer_mid_run_is_rejected_before_recording() {
    let mut pools = BTreeMap::new();
    pools.insert(
        AssessmentKind::Stream,
        vec![numbers_question(), Question::scale("How much do you enjoy debating?", 1, 10)],
    );
    let mut orchestrator = orchestrator_with(QuestionBank::new(pools, Vec::new()), 2);
    orchestrator.start(AssessmentKind::Stream).expect("start");

    for bad in ["abc", "11"] {
        match orchestrator.submit(bad) {
            Err(AssessmentError::MalformedAnswer { question_index, .. }) => {
                assert_eq!(question_index, 0)
            }
            other => panic!("expected malformed answer for {bad:?}, got {other:?}"),
        }
        let session = orchestrator.session().expect("run still active");
        assert_eq!(session.question_index(), 0);
        assert!(session.pending_answers().is_empty());
    }

    assert!(matches!(
        orchestrator.submit("6"),
        Ok(SubmitOutcome::Advanced(_))
    ));
    let outcome = orchestrator.submit("9").expect("last answer");
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    assert_eq!(
        orchestrator.state(),
        AssessmentState::Completed(AssessmentKind::Stream)
    );
    assert!(orchestrator.result(AssessmentKind::Stream).is_some());
}

#[test]
fn submit_without_a_run_is_rejected() {
    let mut orchestrator = AssessmentOrchestrator::seeded(1);
    assert_eq!(
        orchestrator.submit("anything"),
        Err(AssessmentError::NoActiveAssessment)
    );
    assert_eq!(orchestrator.state(), AssessmentState::Idle);
}

#[test]
fn results_for_every_kind_are_held_together() {
    let mut orchestrator = AssessmentOrchestrator::seeded(2024);

    for kind in AssessmentKind::ALL {
        orchestrator.start(kind).expect("start");
        finish_run(&mut orchestrator, plausible_answer);
        assert_eq!(orchestrator.state(), AssessmentState::Completed(kind));
    }

    assert_eq!(orchestrator.results().len(), 3);
    for kind in AssessmentKind::ALL {
        let result = orchestrator.result(kind).expect("stored result");
        assert_eq!(result.assessment_kind, kind);
        assert!(!result.primary.is_empty());
    }

    let profile = orchestrator.profile();
    assert!(profile.is_complete());
    assert_eq!(profile.total_answers, 12);
    assert_eq!(
        profile.primary_for(AssessmentKind::Degree),
        orchestrator
            .result(AssessmentKind::Degree)
            .map(|result| result.primary.as_str())
    );
}

#[test]
fn reading_a_result_is_idempotent() {
    let mut orchestrator = AssessmentOrchestrator::seeded(5);
    assert!(orchestrator.result(AssessmentKind::Stream).is_none());

    orchestrator.start(AssessmentKind::Stream).expect("start");
    finish_run(&mut orchestrator, plausible_answer);

    let first = orchestrator.result(AssessmentKind::Stream).cloned();
    let second = orchestrator.result(AssessmentKind::Stream).cloned();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn rerunning_a_kind_overwrites_only_that_result() {
    let mut orchestrator = orchestrator_with(science_bank(), 4);
    orchestrator.start(AssessmentKind::Stream).expect("start");
    finish_run(&mut orchestrator, |question| {
        science_answer_for(question).to_string()
    });
    let first = orchestrator
        .result(AssessmentKind::Stream)
        .cloned()
        .expect("first result");

    orchestrator.start(AssessmentKind::Stream).expect("restart");
    assert_eq!(
        orchestrator.result(AssessmentKind::Stream),
        Some(&first),
        "result survives until the rerun completes"
    );
    finish_run(&mut orchestrator, plausible_answer);

    let second = orchestrator
        .result(AssessmentKind::Stream)
        .expect("second result");
    assert_ne!(second.answers, first.answers);
    assert_eq!(orchestrator.results().len(), 1);
}

#[test]
fn restarting_mid_run_discards_partial_answers() {
    let mut orchestrator = AssessmentOrchestrator::seeded(13);
    orchestrator.start(AssessmentKind::Stream).expect("start");
    let question = orchestrator.current_question().cloned().expect("question");
    orchestrator
        .submit(&plausible_answer(&question))
        .expect("first answer");

    orchestrator
        .start(AssessmentKind::Specialization)
        .expect("restart");
    let session = orchestrator.session().expect("session");
    assert_eq!(session.kind(), AssessmentKind::Specialization);
    assert_eq!(session.question_index(), 0);
    assert!(session.pending_answers().is_empty());
}

#[test]
fn reset_returns_to_idle_and_keeps_results() {
    let mut orchestrator = AssessmentOrchestrator::seeded(21);
    orchestrator.start(AssessmentKind::Degree).expect("start");
    finish_run(&mut orchestrator, plausible_answer);
    orchestrator.start(AssessmentKind::Stream).expect("start");

    orchestrator.reset();

    assert_eq!(orchestrator.state(), AssessmentState::Idle);
    assert!(orchestrator.session().is_none());
    assert!(orchestrator.result(AssessmentKind::Degree).is_some());

    orchestrator.clear_all();
    assert!(orchestrator.results().is_empty());
    assert_eq!(orchestrator.profile().total_answers, 0);
}

#[test]
fn draft_input_is_submitted_and_cleared() {
    let mut orchestrator = orchestrator_with(science_bank(), 4);
    orchestrator.start(AssessmentKind::Stream).expect("start");
    let question = orchestrator.current_question().cloned().expect("question");

    orchestrator.set_draft_input(science_answer_for(&question));
    assert_eq!(orchestrator.draft_input(), science_answer_for(&question));

    let outcome = orchestrator.submit_draft().expect("draft accepted");
    assert!(matches!(outcome, SubmitOutcome::Advanced(_)));
    assert_eq!(orchestrator.draft_input(), "");

    assert_eq!(
        orchestrator.submit_draft(),
        Err(AssessmentError::EmptyAnswer)
    );
}

#[test]
fn completion_callback_fires_once_with_the_finished_kind() {
    let mut pools = BTreeMap::new();
    pools.insert(
        AssessmentKind::Degree,
        vec![Question::text("Why?", ""), Question::text("How?", "")],
    );
    let mut orchestrator = orchestrator_with(QuestionBank::new(pools, Vec::new()), 2);
    orchestrator.start(AssessmentKind::Degree).expect("start");

    let fired = Cell::new(None);
    orchestrator
        .submit_with("first", |kind| fired.set(Some(kind)))
        .expect("first");
    assert_eq!(fired.get(), None);

    orchestrator
        .submit_with("second", |kind| fired.set(Some(kind)))
        .expect("second");
    assert_eq!(fired.get(), Some(AssessmentKind::Degree));
}

#[test]
fn previous_run_answers_unlock_the_adaptive_follow_up() {
    let follow_up = Question::multiple("Which technical area appeals to you?", &["Software"]);
    let mut pools = BTreeMap::new();
    pools.insert(
        AssessmentKind::Stream,
        vec![Question::text("Why?", ""), Question::text("How?", "")],
    );
    pools.insert(AssessmentKind::Degree, vec![Question::text("What?", "")]);
    let rules = vec![AdaptiveRule {
        kind: AssessmentKind::Degree,
        trigger: "technical",
        question: follow_up.clone(),
    }];
    let mut orchestrator = orchestrator_with(QuestionBank::new(pools, rules), 2);

    assert_eq!(
        orchestrator.start(AssessmentKind::Degree).err(),
        Some(AssessmentError::InsufficientQuestions {
            required: 2,
            available: 1,
        })
    );
    assert_eq!(orchestrator.state(), AssessmentState::Idle);

    orchestrator.start(AssessmentKind::Stream).expect("start");
    finish_run(&mut orchestrator, |_| "Something technical".to_string());

    let questions = orchestrator
        .start(AssessmentKind::Degree)
        .expect("adaptive start");
    assert!(questions.contains(&follow_up));
}
