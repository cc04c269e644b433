use career_compass::config::AssessmentSettings;
use career_compass::workflows::assessment::{
    AssessmentKind, AssessmentService, AssessmentServiceError, AssessmentState, Question,
    QuestionFormat, SessionId, QUESTIONS_PER_RUN,
};
use career_compass::workflows::colleges::{CollegeCatalog, CollegeQuery, RecommendationHeadline};

fn reply_to(question: &Question) -> String {
    match question.format {
        QuestionFormat::Multiple => question
            .options
            .first()
            .cloned()
            .expect("choice questions carry options"),
        QuestionFormat::Text => {
            "I like taking a technical problem apart, reading about it, and explaining the fix to friends."
                .to_string()
        }
        QuestionFormat::Scale => "6".to_string(),
    }
}

fn complete_run(service: &AssessmentService, session: Option<SessionId>, kind: AssessmentKind) -> SessionId {
    let mut view = service.start(session, kind).expect("run starts");
    let session = view.session_id.clone();
    assert_eq!(view.state, AssessmentState::InProgress(kind));

    for _ in 0..QUESTIONS_PER_RUN {
        let question = view.question.clone().expect("a question is pending");
        view = service
            .submit(&session, &reply_to(&question))
            .expect("answer accepted");
    }

    assert_eq!(view.state, AssessmentState::Completed(kind));
    assert!(view.question.is_none(), "no question after the last answer");
    let result = view.result.expect("final answer carries the result");
    assert_eq!(result.assessment_kind, kind);
    assert_eq!(result.answers.len(), QUESTIONS_PER_RUN);
    assert!(result.score <= 100 && result.confidence <= 95);
    session
}

#[test]
fn student_completes_every_assessment_and_sees_matching_colleges() {
    let service = AssessmentService::new(&AssessmentSettings::seeded(2024));

    let session = complete_run(&service, None, AssessmentKind::Stream);
    for kind in [AssessmentKind::Degree, AssessmentKind::Specialization] {
        let same = complete_run(&service, Some(session.clone()), kind);
        assert_eq!(same, session, "follow-up runs reuse the session");
    }

    let profile = service.profile(&session).expect("profile");
    assert!(profile.is_complete());
    assert_eq!(profile.total_answers, QUESTIONS_PER_RUN * 3);

    let headline = RecommendationHeadline::from_profile(Some(&profile));
    assert_eq!(
        Some(headline.headline.as_str()),
        profile.primary_for(AssessmentKind::Specialization)
    );
    assert_eq!(headline.stream.as_deref(), profile.primary_for(AssessmentKind::Stream));
    assert_eq!(headline.degree.as_deref(), profile.primary_for(AssessmentKind::Degree));

    let catalog = CollegeCatalog::standard().expect("embedded catalog parses");
    let colleges = catalog.search(&CollegeQuery::for_city("chennai"));
    assert_eq!(colleges.len(), 2, "city match ignores case");
    assert!(colleges
        .windows(2)
        .all(|pair| pair[0].college.ranking <= pair[1].college.ranking));
}

#[test]
fn sessions_are_isolated_from_each_other() {
    let service = AssessmentService::new(&AssessmentSettings::seeded(5));

    let finished = complete_run(&service, None, AssessmentKind::Degree);
    let fresh = service
        .start(None, AssessmentKind::Degree)
        .expect("second student starts")
        .session_id;

    assert_ne!(finished, fresh);
    assert_eq!(service.session_count(), 2);
    assert!(service
        .result(&fresh, AssessmentKind::Degree)
        .expect("session exists")
        .is_none());
    assert!(service
        .result(&finished, AssessmentKind::Degree)
        .expect("session exists")
        .is_some());
}

#[test]
fn unknown_session_is_reported() {
    let service = AssessmentService::new(&AssessmentSettings::default());
    let missing = SessionId("session-missing".to_string());

    match service.submit(&missing, "Science") {
        Err(AssessmentServiceError::SessionNotFound(id)) => assert_eq!(id, "session-missing"),
        other => panic!("expected SessionNotFound, got {other:?}"),
    }
}
