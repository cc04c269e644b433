use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use super::analysis::AnalysisEngine;
use super::domain::{
    AnswerRecord, AssessmentKind, AssessmentProfile, AssessmentResult, AssessmentState, Question,
};
use super::error::AssessmentError;
use super::question_bank::QuestionBank;
use super::recorder::AnswerRecorder;
use super::selector::QuestionSelector;

/// Transient state of a run in progress. Discarded on completion, reset, or restart.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    kind: AssessmentKind,
    question_index: usize,
    questions: Vec<Question>,
    recorder: AnswerRecorder,
    draft_input: String,
}

impl AssessmentSession {
    pub fn kind(&self) -> AssessmentKind {
        self.kind
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.question_index)
    }

    pub fn pending_answers(&self) -> &[AnswerRecord] {
        self.recorder.records()
    }

    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    pub fn progress(&self) -> Progress {
        Progress {
            question_index: self.question_index,
            total_questions: self.questions.len(),
        }
    }
}

/// Position within the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub question_index: usize,
    pub total_questions: usize,
}

/// What happened after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Advanced(Progress),
    Completed(AssessmentResult),
}

/// Drives select → collect → analyze → expose for each assessment kind.
pub struct AssessmentOrchestrator<R = StdRng> {
    selector: QuestionSelector,
    engine: Arc<AnalysisEngine>,
    rng: R,
    session: Option<AssessmentSession>,
    results: BTreeMap<AssessmentKind, AssessmentResult>,
    completed: Option<AssessmentKind>,
    last_run: Option<AssessmentKind>,
}

impl AssessmentOrchestrator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::standard(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::standard(StdRng::from_entropy())
    }
}

impl<R: Rng> AssessmentOrchestrator<R> {
    pub fn standard(rng: R) -> Self {
        Self::new(
            QuestionSelector::new(Arc::new(QuestionBank::standard())),
            Arc::new(AnalysisEngine::standard()),
            rng,
        )
    }

    pub fn new(selector: QuestionSelector, engine: Arc<AnalysisEngine>, rng: R) -> Self {
        Self {
            selector,
            engine,
            rng,
            session: None,
            results: BTreeMap::new(),
            completed: None,
            last_run: None,
        }
    }

    pub fn state(&self) -> AssessmentState {
        match (&self.session, self.completed) {
            (Some(session), _) => AssessmentState::InProgress(session.kind),
            (None, Some(kind)) => AssessmentState::Completed(kind),
            (None, None) => AssessmentState::Idle,
        }
    }

    pub fn session(&self) -> Option<&AssessmentSession> {
        self.session.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref()?.current_question()
    }

    /// Begin (or restart) a run. Answers from the most recent completed run feed the
    /// adaptive follow-up rule.
    pub fn start(&mut self, kind: AssessmentKind) -> Result<&[Question], AssessmentError> {
        let prior: &[AnswerRecord] = self
            .last_run
            .and_then(|previous| self.results.get(&previous))
            .map(|result| result.answers.as_slice())
            .unwrap_or(&[]);
        let questions = self.selector.select(kind, prior, &mut self.rng)?;

        if let Some(abandoned) = self.session.take() {
            debug!(
                kind = %abandoned.kind,
                answered = abandoned.recorder.len(),
                "discarding unfinished run"
            );
        }
        info!(%kind, questions = questions.len(), "assessment started");

        self.completed = None;
        let session = self.session.insert(AssessmentSession {
            kind,
            question_index: 0,
            questions,
            recorder: AnswerRecorder::new(),
            draft_input: String::new(),
        });
        Ok(&session.questions)
    }

    pub fn set_draft_input(&mut self, input: impl Into<String>) {
        if let Some(session) = self.session.as_mut() {
            session.draft_input = input.into();
        }
    }

    pub fn draft_input(&self) -> &str {
        self.session
            .as_ref()
            .map(|session| session.draft_input.as_str())
            .unwrap_or("")
    }

    /// Submit the buffered draft input.
    pub fn submit_draft(&mut self) -> Result<SubmitOutcome, AssessmentError> {
        let draft = self.draft_input().to_string();
        self.submit(&draft)
    }

    pub fn submit(&mut self, raw_input: &str) -> Result<SubmitOutcome, AssessmentError> {
        self.submit_with(raw_input, |_| {})
    }

    /// Record an answer for the current question. On the final question the run is
    /// analyzed and `on_complete` receives the finished kind. Any error leaves the
    /// orchestrator exactly as it was.
    pub fn submit_with<F>(
        &mut self,
        raw_input: &str,
        on_complete: F,
    ) -> Result<SubmitOutcome, AssessmentError>
    where
        F: FnOnce(AssessmentKind),
    {
        let session = self
            .session
            .as_ref()
            .ok_or(AssessmentError::NoActiveAssessment)?;
        let kind = session.kind;
        let index = session.question_index;
        let question = session
            .current_question()
            .ok_or(AssessmentError::NoActiveAssessment)?;

        let mut staged = session.recorder.clone();
        if let Err(err) = staged.record(index, question, raw_input) {
            debug!(%kind, question_index = index, error = %err, "answer rejected");
            return Err(err);
        }

        if index + 1 < session.questions.len() {
            let total_questions = session.questions.len();
            if let Some(session) = self.session.as_mut() {
                session.recorder = staged;
                session.question_index = index + 1;
                session.draft_input.clear();
            }
            debug!(%kind, question_index = index, "answer recorded");
            return Ok(SubmitOutcome::Advanced(Progress {
                question_index: index + 1,
                total_questions,
            }));
        }

        let result = self.engine.analyze(kind, staged.records(), &mut self.rng)?;
        info!(
            %kind,
            primary = %result.primary,
            score = result.score,
            confidence = result.confidence,
            "assessment completed"
        );

        self.results.insert(kind, result.clone());
        self.session = None;
        self.completed = Some(kind);
        self.last_run = Some(kind);
        on_complete(kind);

        Ok(SubmitOutcome::Completed(result))
    }

    /// Abandon any run in progress. Stored results are kept.
    pub fn reset(&mut self) {
        self.session = None;
        self.completed = None;
    }

    /// Forget every stored result as well as the current run.
    pub fn clear_all(&mut self) {
        self.reset();
        self.results.clear();
        self.last_run = None;
    }

    pub fn result(&self, kind: AssessmentKind) -> Option<&AssessmentResult> {
        self.results.get(&kind)
    }

    pub fn results(&self) -> &BTreeMap<AssessmentKind, AssessmentResult> {
        &self.results
    }

    pub fn profile(&self) -> AssessmentProfile {
        AssessmentProfile {
            results: self.results.clone(),
            completed_at: Utc::now(),
            total_answers: self.results.values().map(|result| result.answers.len()).sum(),
        }
    }
}
