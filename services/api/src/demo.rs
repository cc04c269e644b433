use crate::infra::GuidanceServices;
use career_compass::config::{AppConfig, AssessmentSettings};
use career_compass::error::AppError;
use career_compass::platform::{ConsolePlatform, PlatformError, PlatformServices};
use career_compass::workflows::assessment::{
    AssessmentKind, AssessmentOrchestrator, AssessmentResult, Question, QuestionFormat,
    SubmitOutcome,
};
use career_compass::workflows::colleges::{CollegeQuery, RecommendationHeadline};
use career_compass::workflows::profile::{ProfileCompletion, StudentProfile};
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for question order and the specialization draw (defaults to APP_ASSESSMENT_SEED).
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// City used for the college search portion of the demo.
    #[arg(long, default_value = "Bangalore")]
    pub(crate) city: String,
    /// Skip the college search and profile portions of the demo.
    #[arg(long)]
    pub(crate) skip_colleges: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TakeArgs {
    /// Assessment to take: stream, degree, or specialization
    #[arg(value_parser = crate::infra::parse_kind)]
    pub(crate) kind: AssessmentKind,
    /// Seed for question order (defaults to APP_ASSESSMENT_SEED, then entropy).
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Read each question aloud through the platform voice before prompting.
    #[arg(long)]
    pub(crate) voice: bool,
}

fn resolve_settings(seed: Option<u64>) -> Result<AssessmentSettings, AppError> {
    let configured = AppConfig::load()?.assessment;
    Ok(AssessmentSettings {
        seed: seed.or(configured.seed),
        ..configured
    })
}

fn orchestrator_for(settings: &AssessmentSettings) -> AssessmentOrchestrator {
    match settings.seed {
        Some(seed) => AssessmentOrchestrator::seeded(seed),
        None => AssessmentOrchestrator::from_entropy(),
    }
}

/// Canned reply per question format, so every run completes without input.
fn scripted_answer(kind: AssessmentKind, question: &Question) -> String {
    match question.format {
        QuestionFormat::Multiple => {
            let pick = match kind {
                AssessmentKind::Stream => 0,
                AssessmentKind::Degree => 1,
                AssessmentKind::Specialization => 0,
            };
            question
                .options
                .get(pick)
                .or_else(|| question.options.first())
                .cloned()
                .unwrap_or_else(|| "Not sure yet".to_string())
        }
        QuestionFormat::Text => match kind {
            AssessmentKind::Stream => "I debugged a physics experiment that kept giving odd readings by checking the math behind each step and testing one variable at a time.".to_string(),
            AssessmentKind::Degree => "I want to build technical tools, mostly software, that make digital services easier for people in small towns to use.".to_string(),
            AssessmentKind::Specialization => "Mornings of focused programming, afternoons reviewing designs with a small team, and time every week to learn something new.".to_string(),
        },
        QuestionFormat::Scale => "8".to_string(),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        city,
        skip_colleges,
    } = args;

    let settings = resolve_settings(seed)?;
    let mut orchestrator = orchestrator_for(&settings);

    println!("Career guidance demo");
    for kind in AssessmentKind::ALL {
        let questions = orchestrator.start(kind)?.to_vec();
        println!("\n{} ({} questions)", kind.label(), questions.len());

        let mut result = None;
        for (index, question) in questions.iter().enumerate() {
            let answer = scripted_answer(kind, question);
            println!("  Q{}. {}", index + 1, question.prompt);
            println!("      -> {}", answer);
            if let SubmitOutcome::Completed(completed) = orchestrator.submit(&answer)? {
                result = Some(completed);
            }
        }

        match result {
            Some(result) => render_result(&result),
            None => println!("  Run did not complete"),
        }
    }

    let profile = orchestrator.profile();
    println!(
        "\nAssessment profile: {} results, {} answers",
        profile.results.len(),
        profile.total_answers
    );

    if skip_colleges {
        return Ok(());
    }

    let services = GuidanceServices::build(&settings)?;
    let headline = RecommendationHeadline::from_profile(Some(&profile));
    println!("\nCollege search in {}", city);
    println!("  Based on your assessment results: {}", headline.headline);
    if let (Some(stream), Some(degree)) = (&headline.stream, &headline.degree) {
        println!("  Stream: {} | Degree: {}", stream, degree);
    }

    let matches = services.catalog.search(&CollegeQuery::for_city(city.as_str()));
    if matches.is_empty() {
        println!("  No colleges listed for {} yet", city);
    }
    for hit in &matches {
        let college = &hit.college;
        println!(
            "  - #{} {} ({}) | {:.1}L/year | {}/{} seats | {}",
            college.ranking,
            college.name,
            college.category,
            college.fees_lakhs_per_year,
            college.available_seats,
            college.seats,
            hit.availability_label
        );
    }

    let student = StudentProfile {
        full_name: Some("Demo Student".to_string()),
        current_education_level: Some("12th".to_string()),
        city: Some(city),
        stream: profile
            .primary_for(AssessmentKind::Stream)
            .map(str::to_string),
        ..StudentProfile::default()
    };
    let completion = ProfileCompletion::for_profile(Some(&student));
    println!(
        "\nProfile completion: {}% ({} of {} optional fields)",
        completion.completion_percentage, completion.completed_optional, completion.total_optional
    );

    Ok(())
}

pub(crate) fn run_take(args: TakeArgs) -> Result<(), AppError> {
    let TakeArgs { kind, seed, voice } = args;
    let settings = resolve_settings(seed)?;
    let mut orchestrator = orchestrator_for(&settings);
    let platform = ConsolePlatform::stdio();

    let total = orchestrator.start(kind)?.len();
    println!("{}: {} questions. Type your answer and press enter.", kind.label(), total);

    while let Some(question) = orchestrator.current_question().cloned() {
        let index = orchestrator
            .session()
            .map(|session| session.question_index())
            .unwrap_or_default();
        println!("\nQuestion {} of {}", index + 1, total);
        println!("{}", question.prompt);
        if voice {
            platform.speak(&question.prompt)?;
        }
        render_choices(&question);

        platform.start_dictation()?;
        let raw = match platform.stop_dictation() {
            Ok(raw) => raw,
            Err(PlatformError::NothingCaptured) => {
                println!("\nInput closed before the assessment finished.");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        orchestrator.set_draft_input(resolve_choice(&question, &raw));

        match orchestrator.submit_draft() {
            Ok(SubmitOutcome::Advanced(_)) => {}
            Ok(SubmitOutcome::Completed(result)) => {
                println!();
                render_result(&result);
            }
            Err(err) if err.is_validation() => println!("  {}", err),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn render_choices(question: &Question) {
    match question.format {
        QuestionFormat::Multiple => {
            for (index, option) in question.options.iter().enumerate() {
                println!("  {}) {}", index + 1, option);
            }
        }
        QuestionFormat::Scale => {
            let (min, max) = question.scale_range();
            println!("  Enter a number from {} to {}", min, max);
        }
        QuestionFormat::Text => {
            if let Some(placeholder) = &question.placeholder {
                println!("  e.g. {}", placeholder);
            }
        }
    }
}

/// Numbered replies to multiple-choice questions are expanded to the option text.
fn resolve_choice(question: &Question, raw: &str) -> String {
    if question.format != QuestionFormat::Multiple {
        return raw.to_string();
    }

    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|choice| choice.checked_sub(1))
        .and_then(|index| question.options.get(index))
        .cloned()
        .unwrap_or_else(|| raw.to_string())
}

fn render_result(result: &AssessmentResult) {
    println!("  Recommendation: {}", result.primary);
    println!("  Alternatives: {}", result.alternatives.join(", "));
    println!(
        "  Score {} | Confidence {}%",
        result.score, result.confidence
    );
    println!("  {}", result.reasoning);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_complete_every_kind() {
        let mut orchestrator = AssessmentOrchestrator::seeded(17);
        for kind in AssessmentKind::ALL {
            let questions = orchestrator.start(kind).expect("start").to_vec();
            for question in &questions {
                orchestrator
                    .submit(&scripted_answer(kind, question))
                    .expect("scripted answer accepted");
            }
            assert!(orchestrator.result(kind).is_some());
        }
    }

    #[test]
    fn numbered_choice_expands_to_option_text() {
        let question = Question::multiple("Pick one", &["Alpha", "Beta"]);
        assert_eq!(resolve_choice(&question, " 2 "), "Beta");
        assert_eq!(resolve_choice(&question, "7"), "7");
        assert_eq!(resolve_choice(&question, "0"), "0");
        assert_eq!(resolve_choice(&question, "Gamma"), "Gamma");

        let scale = Question::scale("Rate", 1, 10);
        assert_eq!(resolve_choice(&scale, "2"), "2");
    }
}
