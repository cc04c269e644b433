use super::config::{CategoryRule, KeywordCounting, ScaleBonus};
use super::ParsedAnswer;
use crate::workflows::assessment::domain::QuestionFormat;

/// Running total for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryScore<'a> {
    pub rule: &'a CategoryRule,
    pub score: u32,
}

pub(crate) fn score_categories<'a>(
    categories: &'a [CategoryRule],
    scale_bonuses: &[ScaleBonus],
    counting: KeywordCounting,
    answers: &[ParsedAnswer<'_>],
) -> Vec<CategoryScore<'a>> {
    let mut scores: Vec<CategoryScore<'a>> = categories
        .iter()
        .map(|rule| CategoryScore { rule, score: 0 })
        .collect();

    for answer in answers {
        match answer.scale {
            Some(value) => {
                let prompt = answer.record.question.prompt.to_lowercase();
                for bonus in scale_bonuses {
                    let on_topic = bonus
                        .prompt_topics
                        .iter()
                        .any(|topic| prompt.contains(topic.as_str()));
                    if !on_topic || value < bonus.threshold {
                        continue;
                    }
                    if let Some(entry) = scores
                        .iter_mut()
                        .find(|entry| entry.rule.key == bonus.category)
                    {
                        entry.score += bonus.weight;
                    }
                }
            }
            None => {
                let response = answer.record.answer.to_lowercase();
                for entry in scores.iter_mut() {
                    let hits = keyword_hits(entry.rule, &response);
                    let multiplier = match counting {
                        KeywordCounting::AnyKeyword => u32::from(hits > 0),
                        KeywordCounting::EachKeyword => hits,
                    };
                    entry.score += entry.rule.weight * multiplier;
                }
            }
        }
    }

    scores
}

fn keyword_hits(rule: &CategoryRule, response: &str) -> u32 {
    rule.keywords
        .iter()
        .filter(|keyword| response.contains(keyword.as_str()))
        .count() as u32
}

/// Highest score wins; on ties the category declared first is kept.
pub(crate) fn select_winner<'s, 'a>(
    scores: &'s [CategoryScore<'a>],
) -> Option<&'s CategoryScore<'a>> {
    let mut best: Option<&CategoryScore<'a>> = None;
    for entry in scores {
        match best {
            Some(current) if entry.score <= current.score => {}
            _ => best = Some(entry),
        }
    }
    best
}

pub(crate) fn has_free_text(answers: &[ParsedAnswer<'_>]) -> bool {
    answers
        .iter()
        .any(|answer| answer.record.question.format == QuestionFormat::Text)
}
