use super::Viewfinder;
use crate::events::ViewfinderEvent;
use crate::orientation::{capture_orientation, InterfaceOrientation};
use crate::ui::{ControlLayout, Rect};
use tracing::debug;

impl Viewfinder {
    /// Initial UI pass: gated controls start disabled until video is ready
    pub(super) fn create_ui(&mut self) {
        self.apply_enablement(false);
        self.update_layout();
    }

    /// Resize the preview and align preview, outputs and camera with `orientation`
    pub(super) fn update_orientation(&mut self, orientation: InterfaceOrientation) {
        if !self.view.preview_supports_orientation() {
            debug!("Preview does not support orientation changes");
            return;
        }

        let bounds = self.view.bounds();
        self.view.set_preview_frame(bounds);

        let orientation = capture_orientation(orientation);
        self.view.set_preview_orientation(orientation);
        self.orientation = Some(orientation);

        if let Some(camera) = &self.camera {
            camera.update_output_video_orientation(orientation);
        }
        self.publish(ViewfinderEvent::OrientationChanged { orientation });
    }

    pub(super) fn update_layout(&mut self) {
        let layout = ControlLayout::for_bounds(self.view.bounds(), &self.insets);
        self.view.apply_layout(&layout);
        self.publish(ViewfinderEvent::LayoutUpdated { layout });
    }

    /// The view was rotated to `orientation` with new `bounds`
    pub(super) fn transition(&mut self, orientation: InterfaceOrientation, bounds: Rect) {
        self.view.resize(bounds);
        self.update_orientation(orientation);
        self.update_layout();
    }
}
