use super::*;
use crate::orientation::CaptureOrientation;
use crate::setup::SetupOutcome;
use crate::ui::Point;
use std::time::Duration;

#[tokio::test]
async fn test_mock_serves_scripted_outcomes_then_video_ready() {
    let camera = MockCameraEngine::new().with_update_outcomes([
        SetupOutcome::RequiresUpdate,
        SetupOutcome::InvalidVideoInput,
    ]);

    assert_eq!(camera.update_video().await, SetupOutcome::RequiresUpdate);
    assert_eq!(camera.update_video().await, SetupOutcome::InvalidVideoInput);
    assert_eq!(camera.update_video().await, SetupOutcome::VideoReady);
    assert_eq!(camera.count(&CameraCall::UpdateVideo), 3);
}

#[tokio::test(start_paused = true)]
async fn test_mock_update_delay() {
    let camera = MockCameraEngine::new().with_update_delay(Duration::from_millis(500));

    let started = tokio::time::Instant::now();
    camera.update_video().await;
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[test]
fn test_mock_records_fire_and_forget_calls() {
    let camera = MockCameraEngine::default();

    camera.start();
    camera.request_video_permissions();
    camera.update_output_video_orientation(CaptureOrientation::LandscapeRight);
    camera.focus(Point::new(10.0, 20.0));

    assert_eq!(
        camera.calls(),
        vec![
            CameraCall::Start,
            CameraCall::RequestVideoPermissions,
            CameraCall::UpdateOutputVideoOrientation(CaptureOrientation::LandscapeRight),
            CameraCall::Focus(Point::new(10.0, 20.0)),
        ]
    );

    camera.clear_calls();
    assert!(camera.calls().is_empty());
}
