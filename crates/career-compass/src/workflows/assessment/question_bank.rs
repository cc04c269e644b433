use std::collections::BTreeMap;

use super::domain::{AnswerRecord, AssessmentKind, Question};

/// A hand-authored follow-up injected when the previous answer mentions `trigger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveRule {
    pub kind: AssessmentKind,
    pub trigger: &'static str,
    pub question: Question,
}

impl AdaptiveRule {
    fn matches(&self, kind: AssessmentKind, answer: &str) -> bool {
        self.kind == kind && answer.to_lowercase().contains(self.trigger)
    }
}

/// Static question pools per assessment kind plus the adaptive rule table.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pools: BTreeMap<AssessmentKind, Vec<Question>>,
    rules: Vec<AdaptiveRule>,
}

impl QuestionBank {
    pub fn standard() -> Self {
        let pools = AssessmentKind::ALL
            .into_iter()
            .map(|kind| (kind, standard_pool(kind)))
            .collect();

        Self {
            pools,
            rules: standard_rules(),
        }
    }

    pub fn new(pools: BTreeMap<AssessmentKind, Vec<Question>>, rules: Vec<AdaptiveRule>) -> Self {
        Self { pools, rules }
    }

    pub fn pool(&self, kind: AssessmentKind) -> &[Question] {
        self.pools.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Follow-up question triggered by the most recent prior answer, if any.
    pub fn adaptive_question(
        &self,
        kind: AssessmentKind,
        prior_answers: &[AnswerRecord],
    ) -> Option<&Question> {
        let last = prior_answers.last()?;
        self.rules
            .iter()
            .find(|rule| rule.matches(kind, &last.answer))
            .map(|rule| &rule.question)
    }
}

fn standard_pool(kind: AssessmentKind) -> Vec<Question> {
    match kind {
        AssessmentKind::Stream => vec![
            Question::multiple(
                "Which activity excites you the most during free time?",
                &[
                    "Solving math puzzles and logical problems",
                    "Reading about historical events and literature",
                    "Conducting experiments and research",
                    "Creating art, music, or designing things",
                ],
            ),
            Question::text(
                "Describe a challenging problem you recently solved and explain your approach:",
                "Tell us about a time when you tackled a difficult challenge...",
            ),
            Question::multiple(
                "In a group project, what role do you naturally take?",
                &[
                    "The organizer who plans and delegates",
                    "The researcher who gathers information",
                    "The creative mind who generates ideas",
                    "The supporter who helps everyone collaborate",
                ],
            ),
            Question::scale(
                "How much do you enjoy working with numbers, data, and mathematical concepts?",
                1,
                10,
            ),
            Question::multiple(
                "Which subject area has always fascinated you the most?",
                &[
                    "Mathematics and Physics",
                    "Economics and Business Studies",
                    "Literature and Social Sciences",
                    "Biology and Environmental Science",
                ],
            ),
        ],
        AssessmentKind::Degree => vec![
            Question::multiple(
                "What kind of work environment do you see yourself thriving in?",
                &[
                    "Corporate offices with structured workflows",
                    "Research labs and innovation centers",
                    "Creative studios and collaborative spaces",
                    "Healthcare facilities helping people",
                ],
            ),
            Question::text(
                "What impact do you want to make in the world through your career?",
                "Describe the difference you want to make in society...",
            ),
            Question::multiple(
                "Which type of work gives you the most satisfaction?",
                &[
                    "Strategic planning and business development",
                    "Technical innovation and problem-solving",
                    "Interpersonal communication and teamwork",
                    "Creative expression and artistic pursuits",
                ],
            ),
            Question::scale(
                "How important is having a high salary versus job satisfaction for you?",
                1,
                10,
            ),
            Question::multiple(
                "What motivates you most in your studies and work?",
                &[
                    "Achieving measurable results and targets",
                    "Discovering new knowledge and insights",
                    "Helping others and making connections",
                    "Creating something unique and meaningful",
                ],
            ),
        ],
        AssessmentKind::Specialization => vec![
            Question::multiple(
                "Which emerging technology or field interests you the most?",
                &[
                    "Artificial Intelligence and Machine Learning",
                    "Biotechnology and Genetic Engineering",
                    "Renewable Energy and Sustainability",
                    "Space Technology and Exploration",
                ],
            ),
            Question::text(
                "Describe your ideal job and work routine in detail:",
                "Paint a picture of your perfect workday and career...",
            ),
            Question::multiple(
                "How do you prefer to approach complex challenges?",
                &[
                    "Work independently with deep focus",
                    "Collaborate in small specialized teams",
                    "Lead diverse groups toward solutions",
                    "Consult with experts and stakeholders",
                ],
            ),
            Question::scale(
                "How comfortable are you with continuous learning and adapting to new technologies?",
                1,
                10,
            ),
            Question::multiple(
                "What aspect of your chosen field excites you most?",
                &[
                    "Cutting-edge research and development",
                    "Practical applications solving real problems",
                    "Teaching and mentoring the next generation",
                    "Entrepreneurship and business innovation",
                ],
            ),
        ],
    }
}

fn standard_rules() -> Vec<AdaptiveRule> {
    vec![
        AdaptiveRule {
            kind: AssessmentKind::Stream,
            trigger: "creative",
            question: Question::multiple(
                "Since you enjoy creative work, which medium feels most natural to you?",
                &[
                    "Visual arts and illustration",
                    "Writing and storytelling",
                    "Music and performance",
                    "Product and interface design",
                ],
            ),
        },
        AdaptiveRule {
            kind: AssessmentKind::Degree,
            trigger: "technical",
            question: Question::multiple(
                "Since you mentioned technical interests, which area appeals to you most?",
                &[
                    "Software Development and Programming",
                    "Hardware Engineering and Electronics",
                    "Data Analysis and Statistics",
                    "System Design and Architecture",
                ],
            ),
        },
        AdaptiveRule {
            kind: AssessmentKind::Specialization,
            trigger: "research",
            question: Question::multiple(
                "You mentioned research. Where would you most like to do it?",
                &[
                    "University laboratories",
                    "Industry R&D centers",
                    "Government and policy institutes",
                    "Startups building new products",
                ],
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn answer(text: &str) -> AnswerRecord {
        AnswerRecord {
            question_index: 0,
            question: Question::text("Anything else?", ""),
            answer: text.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn standard_pools_cover_every_kind() {
        let bank = QuestionBank::standard();
        for kind in AssessmentKind::ALL {
            assert_eq!(bank.pool(kind).len(), 5, "pool for {kind}");
        }
    }

    #[test]
    fn adaptive_question_only_inspects_the_last_answer() {
        let bank = QuestionBank::standard();
        let prior = vec![answer("Very TECHNICAL person"), answer("I like people")];

        assert!(bank
            .adaptive_question(AssessmentKind::Degree, &prior)
            .is_none());
        assert!(bank
            .adaptive_question(AssessmentKind::Degree, &prior[..1])
            .is_some());
    }

    #[test]
    fn adaptive_rules_are_scoped_to_their_kind() {
        let bank = QuestionBank::standard();
        let prior = vec![answer("technical work")];

        assert!(bank
            .adaptive_question(AssessmentKind::Stream, &prior)
            .is_none());
        assert!(bank.adaptive_question(AssessmentKind::Degree, &[]).is_none());
    }
}
