use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::domain::{AnswerRecord, AssessmentKind, Question};
use super::error::AssessmentError;
use super::question_bank::QuestionBank;

/// Number of questions presented in a single run.
pub const QUESTIONS_PER_RUN: usize = 4;

/// Draws the ordered question list for a run.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    bank: Arc<QuestionBank>,
    per_run: usize,
}

impl QuestionSelector {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self::with_size(bank, QUESTIONS_PER_RUN)
    }

    pub fn with_size(bank: Arc<QuestionBank>, per_run: usize) -> Self {
        Self { bank, per_run }
    }

    pub fn per_run(&self) -> usize {
        self.per_run
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Shuffle the kind's pool (plus any adaptive follow-up) and keep the first `per_run`.
    pub fn select<R: Rng + ?Sized>(
        &self,
        kind: AssessmentKind,
        prior_answers: &[AnswerRecord],
        rng: &mut R,
    ) -> Result<Vec<Question>, AssessmentError> {
        let mut candidates: Vec<Question> = Vec::with_capacity(self.bank.pool(kind).len() + 1);
        if let Some(follow_up) = self.bank.adaptive_question(kind, prior_answers) {
            candidates.push(follow_up.clone());
        }
        candidates.extend(self.bank.pool(kind).iter().cloned());

        if self.per_run == 0 || self.per_run > candidates.len() {
            return Err(AssessmentError::InsufficientQuestions {
                required: self.per_run,
                available: candidates.len(),
            });
        }

        candidates.shuffle(rng);
        candidates.truncate(self.per_run);
        Ok(candidates)
    }
}
