use serde::{Deserialize, Serialize};

/// Which physical camera is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFacing {
    Front,
    Back,
}

impl CameraFacing {
    /// Zoom and tap-to-focus only apply to the back camera
    pub fn supports_gestures(&self) -> bool {
        matches!(self, CameraFacing::Back)
    }

    pub fn flipped(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }
}

/// Pinch-to-zoom state. `1.0 <= current <= max` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    current: f32,
    begin: f32,
    max: f32,
}

impl ZoomState {
    pub const MIN_SCALE: f32 = 1.0;

    pub fn new(max_zoom_scale: f32) -> Self {
        Self {
            current: Self::MIN_SCALE,
            begin: Self::MIN_SCALE,
            max: max_zoom_scale.max(Self::MIN_SCALE),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn begin(&self) -> f32 {
        self.begin
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Snapshot the current scale as the base for the next pinch
    pub fn begin_pinch(&mut self) {
        self.begin = self.current;
    }

    /// Apply a pinch factor relative to the snapshot. Returns the new scale.
    pub fn apply_pinch(&mut self, scale: f32) -> f32 {
        self.current = self.clamp(self.begin * scale);
        self.current
    }

    /// Change the device ceiling, re-clamping the current scale
    pub fn set_max(&mut self, max_zoom_scale: f32) {
        self.max = max_zoom_scale.max(Self::MIN_SCALE);
        self.current = self.clamp(self.current);
        self.begin = self.clamp(self.begin);
    }

    pub fn reset(&mut self) {
        self.current = Self::MIN_SCALE;
        self.begin = Self::MIN_SCALE;
    }

    fn clamp(&self, scale: f32) -> f32 {
        // NaN collapses to the floor
        if scale.is_nan() {
            return Self::MIN_SCALE;
        }
        scale.max(Self::MIN_SCALE).min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinch_scales_from_snapshot() {
        let mut zoom = ZoomState::new(5.0);

        assert_eq!(zoom.apply_pinch(2.0), 2.0);

        zoom.begin_pinch();
        assert_eq!(zoom.begin(), 2.0);
        assert_eq!(zoom.apply_pinch(1.5), 3.0);
    }

    #[test]
    fn test_pinch_is_clamped_to_ceiling_and_floor() {
        let mut zoom = ZoomState::new(1.5);
        assert_eq!(zoom.apply_pinch(2.0), 1.5);

        let mut zoom = ZoomState::new(5.0);
        assert_eq!(zoom.apply_pinch(0.25), 1.0);
        assert_eq!(zoom.apply_pinch(f32::NAN), 1.0);
    }

    #[test]
    fn test_lowering_ceiling_reclamps() {
        let mut zoom = ZoomState::new(5.0);
        zoom.apply_pinch(4.0);

        zoom.set_max(2.5);
        assert_eq!(zoom.current(), 2.5);

        zoom.set_max(0.5);
        assert_eq!(zoom.max(), 1.0);
        assert_eq!(zoom.current(), 1.0);
    }

    #[test]
    fn test_only_back_camera_supports_gestures() {
        assert!(CameraFacing::Back.supports_gestures());
        assert!(!CameraFacing::Front.supports_gestures());
        assert_eq!(CameraFacing::Front.flipped(), CameraFacing::Back);
    }
}
