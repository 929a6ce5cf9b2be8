use crate::orientation::CaptureOrientation;
use crate::setup::SetupOutcome;
use crate::ui::Point;
use async_trait::async_trait;

/// The capture engine the controller drives.
///
/// Everything except `update_video` is fire-and-forget; the engine reports
/// the consequences of permission requests through its own setup callbacks.
/// Methods may be called from the UI context and must not block it.
#[async_trait]
pub trait CameraEngine: Send + Sync {
    /// Start streaming frames to the preview
    fn start(&self);

    /// Redo the video configuration and report how it went
    async fn update_video(&self) -> SetupOutcome;

    fn request_video_permissions(&self);

    fn request_audio_permissions(&self);

    fn update_output_video_orientation(&self, orientation: CaptureOrientation);

    /// Focus at a point in view coordinates
    fn focus(&self, point: Point);

    fn set_zoom_scale(&self, scale: f32);
}
