use career_compass::config::AssessmentSettings;
use career_compass::error::AppError;
use career_compass::workflows::assessment::AssessmentService;
use career_compass::workflows::colleges::CollegeCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<CollegeCatalog>,
    pub(crate) assessments: Arc<AssessmentService>,
}

/// Shared services every front end needs: the session registry and the college catalog.
pub(crate) struct GuidanceServices {
    pub(crate) assessments: Arc<AssessmentService>,
    pub(crate) catalog: Arc<CollegeCatalog>,
}

impl GuidanceServices {
    pub(crate) fn build(settings: &AssessmentSettings) -> Result<Self, AppError> {
        Ok(Self {
            assessments: Arc::new(AssessmentService::new(settings)),
            catalog: Arc::new(CollegeCatalog::standard()?),
        })
    }
}

pub(crate) fn parse_kind(
    raw: &str,
) -> Result<career_compass::workflows::assessment::AssessmentKind, String> {
    raw.parse().map_err(|err| format!("{err}"))
}
