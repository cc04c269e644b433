/// Validation failures raised by the assessment core.
///
/// None of these are fatal: callers re-prompt and the orchestrator state is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("unknown assessment kind '{0}'")]
    UnknownAssessmentKind(String),
    #[error("need {required} questions but only {available} are available")]
    InsufficientQuestions { required: usize, available: usize },
    #[error("please provide an answer before continuing")]
    EmptyAnswer,
    #[error("no answers to analyze")]
    NoAnswersToAnalyze,
    #[error("malformed answer at question {question_index}: {reason}")]
    MalformedAnswer {
        question_index: usize,
        reason: String,
    },
    #[error("no assessment in progress")]
    NoActiveAssessment,
}

impl AssessmentError {
    pub(crate) fn malformed(question_index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedAnswer {
            question_index,
            reason: reason.into(),
        }
    }

    /// Whether the failure is the student's input rather than caller misuse.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyAnswer | Self::MalformedAnswer { .. } | Self::NoAnswersToAnalyze
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_input_failures_are_validation_errors() {
        assert!(AssessmentError::EmptyAnswer.is_validation());
        assert!(AssessmentError::malformed(1, "not a whole number").is_validation());
        assert!(AssessmentError::NoAnswersToAnalyze.is_validation());

        assert!(!AssessmentError::NoActiveAssessment.is_validation());
        assert!(!AssessmentError::UnknownAssessmentKind("career".to_string()).is_validation());
        assert!(!AssessmentError::InsufficientQuestions {
            required: 4,
            available: 1
        }
        .is_validation());
    }
}
