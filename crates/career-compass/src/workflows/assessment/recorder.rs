use chrono::{DateTime, Utc};

use super::domain::{AnswerRecord, Question, QuestionFormat};
use super::error::AssessmentError;

/// Append-only log of the answers given during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecorder {
    records: Vec<AnswerRecord>,
}

impl AnswerRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `raw_input` against `question` and append it, stamped with the current time.
    pub fn record(
        &mut self,
        question_index: usize,
        question: &Question,
        raw_input: &str,
    ) -> Result<&AnswerRecord, AssessmentError> {
        self.record_at(question_index, question, raw_input, Utc::now())
    }

    pub fn record_at(
        &mut self,
        question_index: usize,
        question: &Question,
        raw_input: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<&AnswerRecord, AssessmentError> {
        // An unselected scale arrives as an empty string, so the rule is the same for every format.
        if raw_input.trim().is_empty() {
            return Err(AssessmentError::EmptyAnswer);
        }

        let record = AnswerRecord {
            question_index,
            question: question.clone(),
            answer: raw_input.to_string(),
            timestamp,
        };
        // a stored scale value must stay analyzable for the rest of the run
        if question.format == QuestionFormat::Scale {
            record.scale_value()?;
        }

        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
