mod config;
mod metrics;
mod rules;

pub use config::{
    AnalysisConfig, CategoryRule, KeywordCounting, KindAnalysis, MetricWeights, PrimaryStrategy,
    ReasoningTemplate, ScaleBonus,
};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::domain::{AnswerRecord, AssessmentKind, AssessmentResult, QuestionFormat};
use super::error::AssessmentError;

/// An answer whose scale value, if any, has already been validated.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParsedAnswer<'a> {
    pub record: &'a AnswerRecord,
    pub scale: Option<u8>,
}

fn parse_answers(answers: &[AnswerRecord]) -> Result<Vec<ParsedAnswer<'_>>, AssessmentError> {
    answers
        .iter()
        .map(|record| {
            let scale = match record.format() {
                QuestionFormat::Scale => Some(record.scale_value()?),
                QuestionFormat::Multiple | QuestionFormat::Text => None,
            };
            Ok(ParsedAnswer { record, scale })
        })
        .collect()
}

/// Stateless evaluator turning a completed answer set into a recommendation.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::new(AnalysisConfig::standard())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze every answer of a run. Any malformed record aborts the whole analysis.
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        kind: AssessmentKind,
        answers: &[AnswerRecord],
        rng: &mut R,
    ) -> Result<AssessmentResult, AssessmentError> {
        if answers.is_empty() {
            return Err(AssessmentError::NoAnswersToAnalyze);
        }

        let rubric = self
            .config
            .for_kind(kind)
            .ok_or_else(|| AssessmentError::UnknownAssessmentKind(kind.to_string()))?;
        let parsed = parse_answers(answers)?;

        let primary = match &rubric.primary {
            PrimaryStrategy::KeywordScoring {
                counting,
                categories,
                scale_bonuses,
            } => {
                let scores = rules::score_categories(categories, scale_bonuses, *counting, &parsed);
                let breakdown: Vec<(&str, u32)> = scores
                    .iter()
                    .map(|entry| (entry.rule.key.as_str(), entry.score))
                    .collect();
                debug!(%kind, ?breakdown, "category scores computed");
                rules::select_winner(&scores)
                    .map(|winner| winner.rule.label.clone())
                    .unwrap_or_default()
            }
            PrimaryStrategy::RandomDraw { labels } => {
                labels.choose(rng).cloned().unwrap_or_default()
            }
        };

        let reasoning = match &rubric.reasoning {
            ReasoningTemplate::Fixed { text } => text.clone(),
            ReasoningTemplate::TextAware {
                with_text,
                without_text,
            } => {
                if rules::has_free_text(&parsed) {
                    with_text.clone()
                } else {
                    without_text.clone()
                }
            }
        };

        Ok(AssessmentResult {
            assessment_kind: kind,
            primary,
            alternatives: rubric.alternatives.clone(),
            reasoning,
            confidence: metrics::confidence(&parsed, &self.config.metrics),
            score: metrics::score(&parsed, &self.config.metrics),
            answers: answers.to_vec(),
        })
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::standard()
    }
}
