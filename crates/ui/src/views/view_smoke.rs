use grounding_core::model::Palette;
use services::LifecycleSignal;

use super::GroundingIntent;
use super::test_harness::setup_view_harness;

#[tokio::test(flavor = "current_thread")]
async fn grounding_view_smoke_renders_first_step() {
    let harness = setup_view_harness(Palette::Midnight, false);
    let html = harness.render();
    assert!(html.contains("things you can see"), "missing label in {html}");
    assert!(html.contains("Step 1 of 5"), "missing step position in {html}");
    assert!(html.contains("Reset"), "missing reset control in {html}");
    assert!(html.contains("background-color: #111111"), "missing background in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn grounding_view_smoke_counts_taps() {
    let mut harness = setup_view_harness(Palette::Midnight, false);
    harness.send(GroundingIntent::Tap);
    harness.send(GroundingIntent::Tap);
    harness.settle();

    assert_eq!(harness.read(|s| s.remaining()), 3);
    let html = harness.render();
    assert!(html.contains(r#"aria-valuenow="40""#), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn grounding_view_smoke_advances_after_five_taps() {
    let mut harness = setup_view_harness(Palette::Dawn, false);
    for _ in 0..5 {
        harness.send(GroundingIntent::Tap);
    }
    // Label swaps only after the exit fade.
    assert!(harness.render().contains("things you can see"));

    harness.settle();
    let html = harness.render();
    assert!(html.contains("things you can touch"), "missing next label in {html}");
    assert!(html.contains("Step 2 of 5"), "missing step position in {html}");
    assert!(html.contains("✋"), "missing emoji in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn grounding_view_smoke_shows_completion() {
    let mut harness = setup_view_harness(Palette::Forest, false);
    for _ in 0..15 {
        harness.send(GroundingIntent::Tap);
        harness.settle();
    }
    let html = harness.render();
    assert!(html.contains("All steps completed"), "missing completion in {html}");
    assert!(html.contains("Press reset to begin again"), "missing hint in {html}");

    harness.send(GroundingIntent::Tap);
    assert!(harness.read(|s| s.is_complete()));
}

#[tokio::test(flavor = "current_thread")]
async fn grounding_view_smoke_reset_returns_to_start() {
    let mut harness = setup_view_harness(Palette::Midnight, false);
    for _ in 0..3 {
        harness.send(GroundingIntent::Tap);
    }
    harness.send(GroundingIntent::Reset);
    harness.settle();

    assert_eq!(harness.read(|s| (s.step_index(), s.remaining())), (0, 5));
    let html = harness.render();
    assert!(html.contains("Step 1 of 5"), "missing first step in {html}");
    assert!(!html.contains("All steps completed"), "stale completion in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn grounding_view_smoke_inactive_resets_when_enabled() {
    let mut harness = setup_view_harness(Palette::Ocean, true);
    harness.send(GroundingIntent::Tap);
    harness.send(GroundingIntent::Lifecycle(LifecycleSignal::Inactive));
    harness.settle();
    assert_eq!(harness.read(|s| s.remaining()), 5);

    let mut harness = setup_view_harness(Palette::Ocean, false);
    harness.send(GroundingIntent::Tap);
    harness.send(GroundingIntent::Lifecycle(LifecycleSignal::Inactive));
    assert_eq!(harness.read(|s| s.remaining()), 4);
}
