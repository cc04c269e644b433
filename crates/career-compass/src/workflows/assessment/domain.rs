use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AssessmentError;

/// The three sequential quiz stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Stream,
    Degree,
    Specialization,
}

impl AssessmentKind {
    pub const ALL: [AssessmentKind; 3] = [Self::Stream, Self::Degree, Self::Specialization];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Degree => "degree",
            Self::Specialization => "specialization",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Stream => "Stream Selection",
            Self::Degree => "Degree Selection",
            Self::Specialization => "Specialization",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentKind {
    type Err = AssessmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stream" => Ok(Self::Stream),
            "degree" => Ok(Self::Degree),
            "specialization" => Ok(Self::Specialization),
            _ => Err(AssessmentError::UnknownAssessmentKind(value.to_string())),
        }
    }
}

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFormat {
    Multiple,
    Text,
    Scale,
}

impl QuestionFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Multiple => "Multiple choice",
            Self::Text => "Free text",
            Self::Scale => "Scale",
        }
    }
}

/// Lower and upper bound applied to scale questions that omit their own range.
pub const DEFAULT_SCALE_RANGE: (u8, u8) = (1, 10);

/// A question as presented to the student. Immutable once drawn from a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub format: QuestionFormat,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u8>,
}

impl Question {
    pub fn multiple(prompt: impl Into<String>, options: &[&str]) -> Self {
        Self {
            format: QuestionFormat::Multiple,
            prompt: prompt.into(),
            options: options.iter().map(|option| option.to_string()).collect(),
            placeholder: None,
            min: None,
            max: None,
        }
    }

    pub fn text(prompt: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            format: QuestionFormat::Text,
            prompt: prompt.into(),
            options: Vec::new(),
            placeholder: Some(placeholder.into()),
            min: None,
            max: None,
        }
    }

    pub fn scale(prompt: impl Into<String>, min: u8, max: u8) -> Self {
        Self {
            format: QuestionFormat::Scale,
            prompt: prompt.into(),
            options: Vec::new(),
            placeholder: None,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Inclusive range a scale answer must fall within.
    pub fn scale_range(&self) -> (u8, u8) {
        (
            self.min.unwrap_or(DEFAULT_SCALE_RANGE.0),
            self.max.unwrap_or(DEFAULT_SCALE_RANGE.1),
        )
    }
}

/// One answered question. Created once per presented question and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub question: Question,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn format(&self) -> QuestionFormat {
        self.question.format
    }

    /// Parsed value of a scale answer, validated against the question range.
    pub fn scale_value(&self) -> Result<u8, AssessmentError> {
        let raw = self.answer.trim();
        let value = raw.parse::<u8>().map_err(|_| {
            AssessmentError::malformed(
                self.question_index,
                format!("scale answer '{raw}' is not a whole number"),
            )
        })?;

        let (min, max) = self.question.scale_range();
        if value < min || value > max {
            return Err(AssessmentError::malformed(
                self.question_index,
                format!("scale answer {value} outside {min}-{max}"),
            ));
        }

        Ok(value)
    }
}

/// Outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub assessment_kind: AssessmentKind,
    pub primary: String,
    pub alternatives: Vec<String>,
    pub reasoning: String,
    pub confidence: u8,
    pub score: u8,
    pub answers: Vec<AnswerRecord>,
}

/// Snapshot of every stored result, mirroring what the profile screens persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentProfile {
    pub results: BTreeMap<AssessmentKind, AssessmentResult>,
    pub completed_at: DateTime<Utc>,
    pub total_answers: usize,
}

impl AssessmentProfile {
    pub fn primary_for(&self, kind: AssessmentKind) -> Option<&str> {
        self.results.get(&kind).map(|result| result.primary.as_str())
    }

    pub fn is_complete(&self) -> bool {
        AssessmentKind::ALL
            .iter()
            .all(|kind| self.results.contains_key(kind))
    }
}

/// Lifecycle of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "kind", rename_all = "snake_case")]
pub enum AssessmentState {
    Idle,
    InProgress(AssessmentKind),
    Completed(AssessmentKind),
}

impl AssessmentState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InProgress(_) => "in_progress",
            Self::Completed(_) => "completed",
        }
    }
}
