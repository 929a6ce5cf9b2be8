use super::layout::{ControlLayout, Rect};
use crate::orientation::CaptureOrientation;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Enablement of the controls that depend on a running capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlEnablement {
    pub shutter: bool,
    pub switch: bool,
    pub torch: bool,
}

impl ControlEnablement {
    /// All gated controls set to the same value
    pub fn uniform(valid: bool) -> Self {
        Self {
            shutter: valid,
            switch: valid,
            torch: valid,
        }
    }

    pub fn all_enabled(&self) -> bool {
        self.shutter && self.switch && self.torch
    }

    pub fn all_disabled(&self) -> bool {
        !self.shutter && !self.switch && !self.torch
    }
}

/// The toolkit view layer the controller drives.
///
/// Implementations are only ever called from the UI context.
pub trait ViewSurface: Send {
    /// Current bounds of the root view
    fn bounds(&self) -> Rect;

    /// Show `text` in the prompt view; an empty string hides it
    fn set_text_prompt(&mut self, text: &str);

    /// Apply enablement to the gated controls in one step
    fn set_controls_enabled(&mut self, enablement: ControlEnablement);

    /// Whether the preview connection accepts orientation changes
    fn preview_supports_orientation(&self) -> bool;

    fn set_preview_frame(&mut self, frame: Rect);

    fn set_preview_orientation(&mut self, orientation: CaptureOrientation);

    fn apply_layout(&mut self, layout: &ControlLayout);

    /// Toolkit-driven resize. Surfaces that track their own bounds can ignore it.
    fn resize(&mut self, _bounds: Rect) {}
}

/// What a `LoggingSurface` has been told so far
#[derive(Debug, Clone, Default)]
pub struct SurfaceRecord {
    pub text_prompt: String,
    pub enablement: ControlEnablement,
    pub enablement_writes: usize,
    pub preview_frame: Option<Rect>,
    pub preview_orientation: Option<CaptureOrientation>,
    pub layout: Option<ControlLayout>,
}

/// View surface without a toolkit behind it: logs every update and keeps
/// the last value of each in a shared record.
pub struct LoggingSurface {
    bounds: Rect,
    supports_orientation: bool,
    record: Arc<Mutex<SurfaceRecord>>,
}

impl LoggingSurface {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            supports_orientation: true,
            record: Arc::new(Mutex::new(SurfaceRecord::default())),
        }
    }

    /// Simulate a preview connection that rejects orientation changes
    pub fn without_orientation_support(mut self) -> Self {
        self.supports_orientation = false;
        self
    }

    pub fn record(&self) -> Arc<Mutex<SurfaceRecord>> {
        Arc::clone(&self.record)
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

impl ViewSurface for LoggingSurface {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_text_prompt(&mut self, text: &str) {
        if text.is_empty() {
            debug!("Text prompt hidden");
        } else {
            info!("Text prompt: {}", text);
        }
        self.record.lock().text_prompt = text.to_string();
    }

    fn set_controls_enabled(&mut self, enablement: ControlEnablement) {
        debug!("Control enablement: {:?}", enablement);
        let mut record = self.record.lock();
        record.enablement = enablement;
        record.enablement_writes += 1;
    }

    fn preview_supports_orientation(&self) -> bool {
        self.supports_orientation
    }

    fn set_preview_frame(&mut self, frame: Rect) {
        debug!("Preview frame: {:?}", frame);
        self.record.lock().preview_frame = Some(frame);
    }

    fn set_preview_orientation(&mut self, orientation: CaptureOrientation) {
        debug!("Preview orientation: {:?}", orientation);
        self.record.lock().preview_orientation = Some(orientation);
    }

    fn apply_layout(&mut self, layout: &ControlLayout) {
        debug!("Control layout: {:?}", layout);
        self.record.lock().layout = Some(*layout);
    }

    fn resize(&mut self, bounds: Rect) {
        self.set_bounds(bounds);
    }
}
