use quiz_core::model::{Progress, QuizSet, Theme};
use services::quiz::LOAD_FAILURE_MESSAGE;
use storage::repository::{ProgressRepository, SettingsRepository, Storage};

use super::test_harness::{bundled_questions, setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn quiz_screen_shows_loading_before_questions_arrive() {
    let mut harness = setup_view_harness(bundled_questions());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Loading questions..."), "missing loading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_screen_renders_first_question() {
    let mut harness = setup_view_harness(bundled_questions());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    for expected in [
        "What is the capital of France?",
        "Paris",
        "Question 1 of 10",
        "Score: 0",
        "Time: 30s",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("next-btn"), "next button shown early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_screen_reports_load_failure() {
    let mut harness = setup_view_harness(QuizSet::default());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(LOAD_FAILURE_MESSAGE), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_screen_applies_saved_theme() {
    let storage = Storage::in_memory();
    storage.settings.save_theme(Theme::Dark).await.unwrap();

    let mut harness = setup_view_harness_with_storage(storage, bundled_questions(), false);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(r#"data-theme="dark""#), "missing dark theme in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_screen_resumes_saved_progress_when_asked() {
    let storage = Storage::in_memory();
    storage
        .progress
        .save_progress(&Progress {
            current_index: 0,
            score: 10,
            correct_count: 1,
        })
        .await
        .unwrap();

    let mut harness = setup_view_harness_with_storage(storage, bundled_questions(), true);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 10"), "missing progress in {html}");
    assert!(html.contains("Score: 10"), "missing score in {html}");
    assert!(
        html.contains("Which planet is known as the Red Planet?"),
        "missing second question in {html}"
    );
}
