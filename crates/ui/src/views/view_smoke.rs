use std::sync::Arc;
use std::sync::atomic::Ordering;

use reading_core::model::{AnswerSet, QuestionId, SubmissionResult};
use services::CompletedAttempt;

use super::test_harness::{FakeBackend, ViewKind, app_services, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn welcome_view_smoke_renders_start_button() {
    let services = app_services(Arc::new(FakeBackend::default()));
    let mut harness = setup_view_harness(ViewKind::Test, services, None, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Test"), "missing start button in {html}");
    assert!(html.contains("Time limit: 60 minutes"), "missing limit in {html}");
    assert!(!html.contains("Ready to begin?"), "unexpected dialog in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn confirm_dialog_smoke_renders_after_request() {
    let services = app_services(Arc::new(FakeBackend::default()));
    let controller = services.new_attempt();
    controller.request_start().unwrap();

    let mut harness = setup_view_harness(ViewKind::Test, services, Some(controller), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Ready to begin?"), "missing dialog in {html}");
    assert!(html.contains("Cancel"), "missing cancel in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn running_test_smoke_renders_passage_and_questions() {
    let services = app_services(Arc::new(FakeBackend::default()));
    let controller = services.new_attempt();
    controller.request_start().unwrap();
    controller.confirm_start().await.unwrap();
    controller.record_answer(QuestionId::new(1), "B").unwrap();

    let mut harness = setup_view_harness(ViewKind::Test, services, Some(controller), None);
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "The Grand Canal",
        "It still carries freight today.",
        "Question 1",
        "Multiple Choice",
        "B. Monks",
        "True/False/Not Given",
        "Not Given",
        "Written Answer",
        "Unsupported question type: DIAGRAM",
        "Progress: 1 of 4 questions answered",
        "question question--answered",
        "Answer saved: B",
        "Time left: 60:00",
        "Submit Reading Test",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submission_smoke_offers_retry() {
    let backend = Arc::new(FakeBackend::default());
    backend.fail_submit.store(true, Ordering::SeqCst);
    let services = app_services(Arc::clone(&backend));
    let controller = services.new_attempt();
    controller.request_start().unwrap();
    controller.confirm_start().await.unwrap();
    assert!(controller.submit().await.is_err());

    let mut harness = setup_view_harness(ViewKind::Test, services, Some(controller), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Retry Submission"), "missing retry in {html}");
    assert!(
        html.contains("Failed to submit test. Please try again."),
        "missing failure in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_band_and_accuracy() {
    let given = [(1, "B"), (2, "TRUE")]
        .into_iter()
        .map(|(id, value)| (QuestionId::new(id), value.to_string()))
        .collect::<AnswerSet>();
    let mut result = SubmissionResult::new(7, 13, given.clone(), given);
    result.time_taken = Some(1800);
    let attempt = CompletedAttempt {
        result,
        elapsed_secs: None,
    };

    let services = app_services(Arc::new(FakeBackend::default()));
    let mut harness = setup_view_harness(ViewKind::Result, services, None, Some(attempt));
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "7 / 13",
        "53.8% Accuracy",
        "Band 5.0",
        "Needs Improvement",
        "30m 0s",
        "Answered: 2 of 13",
        "Performance Feedback",
        "Your current band score of 5.0 indicates areas for improvement.",
        "Vocabulary building",
        "Take Another Test",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_without_report() {
    let services = app_services(Arc::new(FakeBackend::default()));
    let mut harness = setup_view_harness(ViewKind::Result, services, None, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No results yet"), "missing empty state in {html}");
}
