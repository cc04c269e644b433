//! Adaptive career assessments: question selection, answer capture, rule-based analysis,
//! and the orchestrator that sequences stream, degree, and specialization runs.

pub mod analysis;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod question_bank;
pub mod recorder;
pub mod router;
pub mod selector;
pub mod service;

#[cfg(test)]
mod tests;

pub use analysis::{AnalysisConfig, AnalysisEngine};
pub use domain::{
    AnswerRecord, AssessmentKind, AssessmentProfile, AssessmentResult, AssessmentState, Question,
    QuestionFormat, DEFAULT_SCALE_RANGE,
};
pub use error::AssessmentError;
pub use orchestrator::{AssessmentOrchestrator, AssessmentSession, Progress, SubmitOutcome};
pub use question_bank::{AdaptiveRule, QuestionBank};
pub use recorder::AnswerRecorder;
pub use router::{assessment_router, SESSION_HEADER};
pub use selector::{QuestionSelector, QUESTIONS_PER_RUN};
pub use service::{
    AssessmentService, AssessmentServiceError, SessionId, SessionView, DEFAULT_MAX_SESSIONS,
};
