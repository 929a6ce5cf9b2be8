use super::Viewfinder;
use crate::events::ViewfinderEvent;
use crate::gesture::CameraFacing;
use crate::ui::Point;
use tracing::debug;

impl Viewfinder {
    pub(super) fn begin_pinch(&mut self) {
        if !self.facing.supports_gestures() {
            return;
        }
        self.zoom.begin_pinch();
    }

    /// Zoom relative to the scale at pinch start. Front camera pinches are ignored.
    pub(super) fn pinch(&mut self, scale: f32) {
        if !self.facing.supports_gestures() {
            debug!("Ignoring pinch on {:?} camera", self.facing);
            return;
        }

        let previous = self.zoom.current();
        let current = self.zoom.apply_pinch(scale);
        if current != previous {
            self.zoom_changed();
        }
    }

    /// Focus the camera at `point`. Front camera taps are ignored.
    pub(super) fn tap(&mut self, point: Point) {
        if !self.facing.supports_gestures() {
            debug!("Ignoring tap on {:?} camera", self.facing);
            return;
        }

        if let Some(camera) = &self.camera {
            camera.focus(point);
            self.publish(ViewfinderEvent::FocusRequested { point });
        }
    }

    pub(super) fn set_facing(&mut self, facing: CameraFacing) {
        if self.facing == facing {
            return;
        }

        self.facing = facing;
        self.publish(ViewfinderEvent::FacingChanged { facing });

        let previous = self.zoom.current();
        self.zoom.reset();
        if self.zoom.current() != previous {
            self.zoom_changed();
        }
    }

    pub(super) fn set_max_zoom_scale(&mut self, max_zoom_scale: f32) {
        let previous = self.zoom.current();
        self.zoom.set_max(max_zoom_scale);
        if self.zoom.current() != previous {
            self.zoom_changed();
        }
    }

    fn zoom_changed(&self) {
        let scale = self.zoom.current();
        if let Some(camera) = &self.camera {
            camera.set_zoom_scale(scale);
        }
        self.publish(ViewfinderEvent::ZoomChanged { scale });
    }
}
