use crate::camera::CameraEngine;
use crate::config::{LayoutConfig, ViewfinderConfig};
use crate::events::{EventBus, ViewfinderEvent};
use crate::gesture::{CameraFacing, ZoomState};
use crate::orientation::CaptureOrientation;
use crate::setup::PromptCatalog;
use crate::ui::{ControlEnablement, ViewSurface, WeakUiContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Controller state. Lives on the UI context and is only touched by UI jobs.
pub struct Viewfinder {
    pub(super) camera: Option<Arc<dyn CameraEngine>>,
    pub(super) view: Box<dyn ViewSurface>,
    pub(super) prompts: PromptCatalog,
    pub(super) insets: LayoutConfig,
    pub(super) event_bus: Arc<EventBus>,
    pub(super) context: Option<WeakUiContext<Viewfinder>>,
    pub(super) text_prompt: String,
    pub(super) enablement: ControlEnablement,
    pub(super) facing: CameraFacing,
    pub(super) zoom: ZoomState,
    pub(super) orientation: Option<CaptureOrientation>,
}

/// UI-visible state at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewfinderSnapshot {
    pub text_prompt: String,
    pub controls: ControlEnablement,
    pub facing: CameraFacing,
    pub zoom_scale: f32,
    pub begin_zoom_scale: f32,
    pub max_zoom_scale: f32,
    pub orientation: Option<CaptureOrientation>,
    pub camera_attached: bool,
}

impl Viewfinder {
    pub(super) fn new(
        config: &ViewfinderConfig,
        camera: Option<Arc<dyn CameraEngine>>,
        view: Box<dyn ViewSurface>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            camera,
            view,
            prompts: PromptCatalog::from_config(&config.prompt),
            insets: config.layout.clone(),
            event_bus,
            context: None,
            text_prompt: String::new(),
            enablement: ControlEnablement::default(),
            facing: CameraFacing::Back,
            zoom: ZoomState::new(config.zoom.max_zoom_scale),
            orientation: None,
        }
    }

    pub(super) fn bind_context(&mut self, context: WeakUiContext<Viewfinder>) {
        self.context = Some(context);
    }

    pub fn snapshot(&self) -> ViewfinderSnapshot {
        ViewfinderSnapshot {
            text_prompt: self.text_prompt.clone(),
            controls: self.enablement,
            facing: self.facing,
            zoom_scale: self.zoom.current(),
            begin_zoom_scale: self.zoom.begin(),
            max_zoom_scale: self.zoom.max(),
            orientation: self.orientation,
            camera_attached: self.camera.is_some(),
        }
    }

    pub(super) fn attach_camera(&mut self, camera: Arc<dyn CameraEngine>) {
        info!("Camera attached");
        self.camera = Some(camera);
        self.publish(ViewfinderEvent::CameraAttached);
    }

    pub(super) fn detach_camera(&mut self) {
        if self.camera.take().is_some() {
            info!("Camera detached");
            self.publish(ViewfinderEvent::CameraDetached);
        }
    }

    /// Set the gated controls to `valid` in a single view update
    pub(super) fn apply_enablement(&mut self, valid: bool) {
        self.enablement = ControlEnablement::uniform(valid);
        self.view.set_controls_enabled(self.enablement);
        self.publish(ViewfinderEvent::ControlsEnabled { enabled: valid });
    }

    pub(super) fn set_text_prompt(&mut self, text: String) {
        self.text_prompt = text;
        self.view.set_text_prompt(&self.text_prompt);
        self.publish(ViewfinderEvent::PromptChanged {
            text: self.text_prompt.clone(),
        });
    }

    /// Clear whatever prompt is showing once `delay` has elapsed
    pub(super) fn schedule_prompt_clear(&self, delay: Duration) {
        let Some(context) = &self.context else {
            warn!("UI context not bound, prompt will not be cleared");
            return;
        };

        context.dispatch_after(delay, |viewfinder: &mut Viewfinder| {
            debug!("Clearing text prompt");
            viewfinder.set_text_prompt(String::new());
        });
    }

    pub(super) fn publish(&self, event: ViewfinderEvent) {
        // No subscribers is the normal case
        let _ = self.event_bus.publish(event);
    }
}
