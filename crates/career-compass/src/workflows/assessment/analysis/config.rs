use serde::{Deserialize, Serialize};

use crate::workflows::assessment::domain::AssessmentKind;

/// How keyword hits inside a single answer are counted for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCounting {
    /// The category gains its weight once when any keyword appears.
    AnyKeyword,
    /// The category gains its weight for every distinct keyword that appears.
    EachKeyword,
}

/// One scoring bucket. Declaration order is the tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub key: String,
    pub label: String,
    pub weight: u32,
    pub keywords: Vec<String>,
}

/// Bonus granted to a category when a scale answer on a matching topic clears a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleBonus {
    pub prompt_topics: Vec<String>,
    pub category: String,
    pub threshold: u8,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PrimaryStrategy {
    KeywordScoring {
        counting: KeywordCounting,
        categories: Vec<CategoryRule>,
        scale_bonuses: Vec<ScaleBonus>,
    },
    /// Uniform draw over a fixed label set, independent of the answers.
    RandomDraw { labels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum ReasoningTemplate {
    Fixed {
        text: String,
    },
    /// Picks a sentence depending on whether the run contained free-text answers.
    TextAware {
        with_text: String,
        without_text: String,
    },
}

/// Everything the engine needs to analyze one assessment kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindAnalysis {
    pub kind: AssessmentKind,
    pub primary: PrimaryStrategy,
    pub alternatives: Vec<String>,
    pub reasoning: ReasoningTemplate,
}

/// Weights used for the confidence and score metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricWeights {
    pub base_confidence: u8,
    pub max_confidence: u8,
    pub detailed_text_chars: usize,
    pub detailed_text_bonus: u8,
    pub strong_scale_high: u8,
    pub strong_scale_low: u8,
    pub strong_scale_bonus: u8,
    pub multiple_choice_points: u32,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            base_confidence: 70,
            max_confidence: 95,
            detailed_text_chars: 50,
            detailed_text_bonus: 5,
            strong_scale_high: 8,
            strong_scale_low: 2,
            strong_scale_bonus: 3,
            multiple_choice_points: 8,
        }
    }
}

/// Rubric tables for every assessment kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub kinds: Vec<KindAnalysis>,
    pub metrics: MetricWeights,
}

impl AnalysisConfig {
    pub fn standard() -> Self {
        Self {
            kinds: vec![stream_analysis(), degree_analysis(), specialization_analysis()],
            metrics: MetricWeights::default(),
        }
    }

    pub fn for_kind(&self, kind: AssessmentKind) -> Option<&KindAnalysis> {
        self.kinds.iter().find(|entry| entry.kind == kind)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn category(key: &str, label: &str, weight: u32, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        key: key.to_string(),
        label: label.to_string(),
        weight,
        keywords: strings(keywords),
    }
}

fn stream_analysis() -> KindAnalysis {
    KindAnalysis {
        kind: AssessmentKind::Stream,
        primary: PrimaryStrategy::KeywordScoring {
            counting: KeywordCounting::AnyKeyword,
            categories: vec![
                category(
                    "science",
                    "Science Stream (PCM)",
                    3,
                    &["math", "physics", "experiment", "technical", "logic"],
                ),
                category(
                    "commerce",
                    "Commerce Stream",
                    3,
                    &["business", "strategy", "financial", "economics", "manage"],
                ),
                category(
                    "arts",
                    "Arts/Humanities Stream",
                    3,
                    &["creative", "art", "literature", "design", "social"],
                ),
                category(
                    "medical",
                    "Science Stream (PCB)",
                    2,
                    &["biology", "health", "medical", "environmental", "research"],
                ),
            ],
            scale_bonuses: vec![
                ScaleBonus {
                    prompt_topics: strings(&["numbers", "mathematical"]),
                    category: "science".to_string(),
                    threshold: 7,
                    weight: 2,
                },
                ScaleBonus {
                    prompt_topics: strings(&["numbers", "mathematical"]),
                    category: "commerce".to_string(),
                    threshold: 8,
                    weight: 1,
                },
            ],
        },
        alternatives: strings(&["Commerce Stream", "Arts/Humanities Stream"]),
        reasoning: ReasoningTemplate::TextAware {
            with_text: "Based on your responses, particularly your approach to problem-solving and interests, this stream aligns well with your analytical mindset and career aspirations.".to_string(),
            without_text: "Based on your responses to our assessment questions, this stream matches your interests and aptitudes.".to_string(),
        },
    }
}

fn degree_analysis() -> KindAnalysis {
    KindAnalysis {
        kind: AssessmentKind::Degree,
        primary: PrimaryStrategy::KeywordScoring {
            counting: KeywordCounting::EachKeyword,
            categories: vec![
                category(
                    "computer_science",
                    "Computer Science Engineering",
                    1,
                    &[
                        "technical",
                        "technology",
                        "programming",
                        "software",
                        "computer",
                        "digital",
                        "innovation",
                    ],
                ),
                category(
                    "business",
                    "Business Administration",
                    1,
                    &[
                        "business",
                        "management",
                        "strategy",
                        "leadership",
                        "finance",
                        "economics",
                        "corporate",
                    ],
                ),
                category(
                    "mechanical",
                    "Mechanical Engineering",
                    1,
                    &[
                        "engineering",
                        "design",
                        "manufacturing",
                        "automotive",
                        "machines",
                        "mechanical",
                    ],
                ),
                category(
                    "medicine",
                    "Medicine (MBBS)",
                    1,
                    &[
                        "medical",
                        "health",
                        "healing",
                        "biology",
                        "research",
                        "helping people",
                        "healthcare",
                    ],
                ),
                category(
                    "psychology",
                    "Psychology",
                    1,
                    &[
                        "people",
                        "behavior",
                        "social",
                        "communication",
                        "understanding",
                        "counseling",
                    ],
                ),
                category(
                    "fine_arts",
                    "Fine Arts",
                    1,
                    &[
                        "creative",
                        "art",
                        "design",
                        "artistic",
                        "visual",
                        "aesthetic",
                        "expression",
                    ],
                ),
            ],
            scale_bonuses: Vec::new(),
        },
        alternatives: strings(&["Information Technology", "Data Science & Analytics"]),
        reasoning: ReasoningTemplate::Fixed {
            text: "Your responses indicate strong alignment with technical fields that combine analytical thinking with practical problem-solving.".to_string(),
        },
    }
}

fn specialization_analysis() -> KindAnalysis {
    KindAnalysis {
        kind: AssessmentKind::Specialization,
        primary: PrimaryStrategy::RandomDraw {
            labels: strings(&[
                "Artificial Intelligence & Machine Learning",
                "Cybersecurity",
                "Data Science & Big Data",
                "Software Development",
                "Digital Marketing",
                "Financial Technology (FinTech)",
                "Biotechnology",
                "Environmental Engineering",
            ]),
        },
        alternatives: strings(&["Full Stack Development", "Cloud Computing"]),
        reasoning: ReasoningTemplate::Fixed {
            text: "Based on current industry trends and your interest profile, this specialization offers excellent growth opportunities.".to_string(),
        },
    }
}
