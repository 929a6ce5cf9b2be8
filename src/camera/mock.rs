use super::engine::CameraEngine;
use crate::orientation::CaptureOrientation;
use crate::setup::SetupOutcome;
use crate::ui::Point;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info};

/// A call received by `MockCameraEngine`
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCall {
    Start,
    UpdateVideo,
    RequestVideoPermissions,
    RequestAudioPermissions,
    UpdateOutputVideoOrientation(CaptureOrientation),
    Focus(Point),
    SetZoomScale(f32),
}

/// Mock camera engine for running without capture hardware.
///
/// Records every call and answers `update_video` from a script, falling
/// back to `VideoReady` once the script is exhausted.
pub struct MockCameraEngine {
    calls: Mutex<Vec<CameraCall>>,
    update_outcomes: Mutex<VecDeque<SetupOutcome>>,
    update_delay: Duration,
}

impl MockCameraEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            update_outcomes: Mutex::new(VecDeque::new()),
            update_delay: Duration::ZERO,
        }
    }

    /// Outcomes returned by successive `update_video` calls
    pub fn with_update_outcomes<I>(self, outcomes: I) -> Self
    where
        I: IntoIterator<Item = SetupOutcome>,
    {
        self.update_outcomes.lock().extend(outcomes);
        self
    }

    /// Simulated reconfiguration time
    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<CameraCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &CameraCall) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: CameraCall) {
        debug!("Mock camera call: {:?}", call);
        self.calls.lock().push(call);
    }
}

impl Default for MockCameraEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CameraEngine for MockCameraEngine {
    fn start(&self) {
        info!("Mock camera started streaming");
        self.record(CameraCall::Start);
    }

    async fn update_video(&self) -> SetupOutcome {
        self.record(CameraCall::UpdateVideo);

        if !self.update_delay.is_zero() {
            tokio::time::sleep(self.update_delay).await;
        }

        let outcome = self
            .update_outcomes
            .lock()
            .pop_front()
            .unwrap_or(SetupOutcome::VideoReady);
        debug!("Mock video update finished: {:?}", outcome);
        outcome
    }

    fn request_video_permissions(&self) {
        self.record(CameraCall::RequestVideoPermissions);
    }

    fn request_audio_permissions(&self) {
        self.record(CameraCall::RequestAudioPermissions);
    }

    fn update_output_video_orientation(&self, orientation: CaptureOrientation) {
        self.record(CameraCall::UpdateOutputVideoOrientation(orientation));
    }

    fn focus(&self, point: Point) {
        self.record(CameraCall::Focus(point));
    }

    fn set_zoom_scale(&self, scale: f32) {
        self.record(CameraCall::SetZoomScale(scale));
    }
}
