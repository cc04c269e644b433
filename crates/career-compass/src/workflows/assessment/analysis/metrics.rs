use super::config::MetricWeights;
use super::ParsedAnswer;
use crate::workflows::assessment::domain::QuestionFormat;

/// Maximum points a single answer can contribute to the score.
pub(crate) const POINTS_PER_ANSWER: u32 = 10;

/// Starts at the base value and only ever adds, so the floor is the base itself.
pub(crate) fn confidence(answers: &[ParsedAnswer<'_>], weights: &MetricWeights) -> u8 {
    let mut confidence = u32::from(weights.base_confidence);

    for answer in answers {
        match answer.record.question.format {
            QuestionFormat::Text
                if answer.record.answer.chars().count() > weights.detailed_text_chars =>
            {
                confidence += u32::from(weights.detailed_text_bonus);
            }
            QuestionFormat::Scale => {
                if let Some(value) = answer.scale {
                    if value >= weights.strong_scale_high || value <= weights.strong_scale_low {
                        confidence += u32::from(weights.strong_scale_bonus);
                    }
                }
            }
            _ => {}
        }
    }

    confidence.min(u32::from(weights.max_confidence)) as u8
}

/// Percentage of the available points earned, rounded half up.
pub(crate) fn score(answers: &[ParsedAnswer<'_>], weights: &MetricWeights) -> u8 {
    if answers.is_empty() {
        return 0;
    }

    let earned: u32 = answers
        .iter()
        .map(|answer| answer_points(answer, weights).min(POINTS_PER_ANSWER))
        .sum();
    let available = POINTS_PER_ANSWER * answers.len() as u32;

    // round(100 * earned / available) without floating point
    let percent = (200 * earned + available) / (2 * available);
    percent.min(100) as u8
}

fn answer_points(answer: &ParsedAnswer<'_>, weights: &MetricWeights) -> u32 {
    match answer.record.question.format {
        QuestionFormat::Scale => answer.scale.map(u32::from).unwrap_or(0),
        QuestionFormat::Multiple => weights.multiple_choice_points,
        QuestionFormat::Text => match answer.record.answer.chars().count() {
            len if len > 100 => 10,
            len if len > 50 => 7,
            len if len > 20 => 5,
            _ => 3,
        },
    }
}
