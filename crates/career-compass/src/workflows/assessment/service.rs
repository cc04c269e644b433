use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::analysis::AnalysisEngine;
use super::domain::{
    AnswerRecord, AssessmentKind, AssessmentProfile, AssessmentResult, AssessmentState, Question,
};
use super::error::AssessmentError;
use super::orchestrator::{AssessmentOrchestrator, Progress, SubmitOutcome};
use super::question_bank::QuestionBank;
use super::selector::QuestionSelector;
use crate::config::AssessmentSettings;

/// Identifier a client presents (via `X-Session-ID`) to resume its orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Snapshot of a session returned to HTTP clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub state: AssessmentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AssessmentResult>,
    pub completed_kinds: Vec<AssessmentKind>,
}

impl SessionView {
    fn capture(id: &SessionId, orchestrator: &AssessmentOrchestrator) -> Self {
        let session = orchestrator.session();
        Self {
            session_id: id.clone(),
            state: orchestrator.state(),
            progress: session.map(|session| session.progress()),
            question: session.and_then(|session| session.current_question().cloned()),
            result: None,
            completed_kinds: orchestrator.results().keys().copied().collect(),
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error("session '{0}' not found")]
    SessionNotFound(String),
}

/// Live sessions kept before the oldest is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

struct SessionSlot {
    opened: u64,
    orchestrator: AssessmentOrchestrator,
}

fn evict_oldest(sessions: &mut HashMap<SessionId, SessionSlot>, max_sessions: usize) {
    while sessions.len() >= max_sessions {
        let Some(oldest) = sessions
            .iter()
            .min_by_key(|(_, slot)| slot.opened)
            .map(|(id, _)| id.clone())
        else {
            return;
        };
        sessions.remove(&oldest);
        info!(session = %oldest.0, "assessment session evicted");
    }
}

/// Registry of per-client orchestrators sharing one question bank and analysis engine.
pub struct AssessmentService {
    sessions: Mutex<HashMap<SessionId, SessionSlot>>,
    max_sessions: usize,
    bank: Arc<QuestionBank>,
    engine: Arc<AnalysisEngine>,
    seed: Option<u64>,
    sequence: AtomicU64,
    analysis_rng: Mutex<StdRng>,
}

impl AssessmentService {
    pub fn new(settings: &AssessmentSettings) -> Self {
        Self::with_parts(
            Arc::new(QuestionBank::standard()),
            Arc::new(AnalysisEngine::standard()),
            settings.seed,
        )
        .with_max_sessions(settings.max_sessions)
    }

    pub fn with_parts(
        bank: Arc<QuestionBank>,
        engine: Arc<AnalysisEngine>,
        seed: Option<u64>,
    ) -> Self {
        let analysis_rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            sessions: Mutex::new(HashMap::new()),
            max_sessions: DEFAULT_MAX_SESSIONS,
            bank,
            engine,
            seed,
            sequence: AtomicU64::new(1),
            analysis_rng: Mutex::new(analysis_rng),
        }
    }

    /// Cap the number of live sessions. Values below one are treated as one.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, SessionSlot>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_session_id(&self) -> (SessionId, u64) {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        (SessionId(format!("session-{sequence:06}")), sequence)
    }

    fn new_orchestrator(&self, sequence: u64) -> AssessmentOrchestrator {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(sequence)),
            None => StdRng::from_entropy(),
        };
        AssessmentOrchestrator::new(
            QuestionSelector::new(self.bank.clone()),
            self.engine.clone(),
            rng,
        )
    }

    /// Start a run, creating the session when the id is absent or unknown.
    ///
    /// Opening a session while the registry is full evicts the least recently opened one.
    pub fn start(
        &self,
        session_id: Option<SessionId>,
        kind: AssessmentKind,
    ) -> Result<SessionView, AssessmentServiceError> {
        let mut sessions = self.sessions();
        let (session_id, sequence) = match session_id {
            Some(id) => {
                let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
                (id, sequence)
            }
            None => self.next_session_id(),
        };

        if !sessions.contains_key(&session_id) {
            evict_oldest(&mut sessions, self.max_sessions);
            info!(session = %session_id.0, "assessment session opened");
            sessions.insert(
                session_id.clone(),
                SessionSlot {
                    opened: sequence,
                    orchestrator: self.new_orchestrator(sequence),
                },
            );
        }

        let slot = sessions
            .get_mut(&session_id)
            .ok_or_else(|| AssessmentServiceError::SessionNotFound(session_id.0.clone()))?;
        slot.orchestrator.start(kind)?;

        Ok(SessionView::capture(&session_id, &slot.orchestrator))
    }

    fn with_session<T>(
        &self,
        session_id: &SessionId,
        action: impl FnOnce(&mut AssessmentOrchestrator) -> Result<T, AssessmentError>,
    ) -> Result<T, AssessmentServiceError> {
        let mut sessions = self.sessions();
        let slot = sessions
            .get_mut(session_id)
            .ok_or_else(|| AssessmentServiceError::SessionNotFound(session_id.0.clone()))?;
        Ok(action(&mut slot.orchestrator)?)
    }

    pub fn submit(
        &self,
        session_id: &SessionId,
        answer: &str,
    ) -> Result<SessionView, AssessmentServiceError> {
        self.with_session(session_id, |orchestrator| {
            let outcome = orchestrator.submit(answer)?;
            let mut view = SessionView::capture(session_id, orchestrator);
            if let SubmitOutcome::Completed(result) = outcome {
                view.result = Some(result);
            }
            Ok(view)
        })
    }

    pub fn current(&self, session_id: &SessionId) -> Result<SessionView, AssessmentServiceError> {
        self.with_session(session_id, |orchestrator| {
            Ok(SessionView::capture(session_id, orchestrator))
        })
    }

    pub fn reset(&self, session_id: &SessionId) -> Result<SessionView, AssessmentServiceError> {
        self.with_session(session_id, |orchestrator| {
            orchestrator.reset();
            Ok(SessionView::capture(session_id, orchestrator))
        })
    }

    /// Drop the session and every result it holds.
    pub fn end(&self, session_id: &SessionId) -> Result<(), AssessmentServiceError> {
        match self.sessions().remove(session_id) {
            Some(_) => {
                info!(session = %session_id.0, "assessment session closed");
                Ok(())
            }
            None => Err(AssessmentServiceError::SessionNotFound(session_id.0.clone())),
        }
    }

    /// Stored result for `kind`; `None` when the session never completed that kind.
    pub fn result(
        &self,
        session_id: &SessionId,
        kind: AssessmentKind,
    ) -> Result<Option<AssessmentResult>, AssessmentServiceError> {
        self.with_session(session_id, |orchestrator| Ok(orchestrator.result(kind).cloned()))
    }

    pub fn profile(
        &self,
        session_id: &SessionId,
    ) -> Result<AssessmentProfile, AssessmentServiceError> {
        self.with_session(session_id, |orchestrator| Ok(orchestrator.profile()))
    }

    /// Analyze answers held by the client without touching any session.
    pub fn analyze(
        &self,
        kind: AssessmentKind,
        answers: &[AnswerRecord],
    ) -> Result<AssessmentResult, AssessmentError> {
        let mut rng = self
            .analysis_rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.engine.analyze(kind, answers, &mut *rng)
    }

    pub fn session_count(&self) -> usize {
        self.sessions().len()
    }
}
