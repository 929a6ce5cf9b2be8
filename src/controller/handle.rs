use super::{Viewfinder, ViewfinderSnapshot};
use crate::camera::CameraEngine;
use crate::config::ViewfinderConfig;
use crate::error::{Result, ViewfinderError};
use crate::events::{EventBus, ViewfinderEvent};
use crate::gesture::CameraFacing;
use crate::orientation::InterfaceOrientation;
use crate::setup::SetupOutcome;
use crate::ui::{Point, Rect, UiContext, ViewSurface};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Entry point for toolkit and engine callbacks.
///
/// Every call may come from any thread or task; the work itself is always
/// marshaled onto the UI context, so methods return before it has run.
pub struct ViewfinderController {
    context: UiContext<Viewfinder>,
    event_bus: Arc<EventBus>,
    task: JoinHandle<Viewfinder>,
}

impl ViewfinderController {
    pub fn builder() -> ViewfinderControllerBuilder {
        ViewfinderControllerBuilder::new()
    }

    /// Handle the outcome of a capture setup attempt
    pub fn handle_setup_result(&self, outcome: SetupOutcome) {
        self.context
            .dispatch(move |viewfinder| viewfinder.handle_setup_result(outcome));
    }

    /// Enable or disable shutter, switch and torch together
    pub fn enable_ui(&self, valid: bool) {
        self.context
            .dispatch(move |viewfinder| viewfinder.apply_enablement(valid));
    }

    pub fn begin_pinch(&self) {
        self.context.dispatch(|viewfinder| viewfinder.begin_pinch());
    }

    pub fn pinch(&self, scale: f32) {
        self.context
            .dispatch(move |viewfinder| viewfinder.pinch(scale));
    }

    pub fn tap(&self, location: Point) {
        self.context
            .dispatch(move |viewfinder| viewfinder.tap(location));
    }

    pub fn set_facing(&self, facing: CameraFacing) {
        self.context
            .dispatch(move |viewfinder| viewfinder.set_facing(facing));
    }

    /// Apply the zoom ceiling reported by the active capture device
    pub fn set_max_zoom_scale(&self, max_zoom_scale: f32) {
        self.context
            .dispatch(move |viewfinder| viewfinder.set_max_zoom_scale(max_zoom_scale));
    }

    pub fn update_orientation(&self, orientation: InterfaceOrientation) {
        self.context
            .dispatch(move |viewfinder| viewfinder.update_orientation(orientation));
    }

    pub fn update_layout(&self) {
        self.context.dispatch(|viewfinder| viewfinder.update_layout());
    }

    /// The view rotated: resize, re-orient the preview and re-layout the controls
    pub fn transition(&self, orientation: InterfaceOrientation, bounds: Rect) {
        self.context
            .dispatch(move |viewfinder| viewfinder.transition(orientation, bounds));
    }

    pub fn attach_camera(&self, camera: Arc<dyn CameraEngine>) {
        self.context
            .dispatch(move |viewfinder| viewfinder.attach_camera(camera));
    }

    pub fn detach_camera(&self) {
        self.context.dispatch(|viewfinder| viewfinder.detach_camera());
    }

    /// Read the UI-visible state once everything dispatched so far has run
    pub async fn snapshot(&self) -> Result<ViewfinderSnapshot> {
        self.context.query(|viewfinder| viewfinder.snapshot()).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewfinderEvent> {
        self.event_bus.subscribe()
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    /// Cancel pending prompt clears, drain the UI queue and return the final state
    pub async fn shutdown(self) -> Result<ViewfinderSnapshot> {
        info!("Shutting down viewfinder controller");
        self.context.shutdown();

        let Self { context, task, .. } = self;
        drop(context);

        let viewfinder = task.await.map_err(|e| {
            ViewfinderError::component("ui_context".to_string(), e.to_string())
        })?;
        Ok(viewfinder.snapshot())
    }
}

/// Builder for `ViewfinderController`
pub struct ViewfinderControllerBuilder {
    config: Option<ViewfinderConfig>,
    camera: Option<Arc<dyn CameraEngine>>,
    view: Option<Box<dyn ViewSurface>>,
    event_bus: Option<Arc<EventBus>>,
}

impl ViewfinderControllerBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            camera: None,
            view: None,
            event_bus: None,
        }
    }

    pub fn config(mut self, config: ViewfinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Camera collaborator; may also be attached later
    pub fn camera(mut self, camera: Arc<dyn CameraEngine>) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn view<V: ViewSurface + 'static>(mut self, view: V) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    pub fn event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Spawn the UI context and run the initial UI pass. Must be called inside a Tokio runtime.
    pub fn build(self) -> Result<ViewfinderController> {
        let view = self
            .view
            .ok_or_else(|| ViewfinderError::system("View surface must be specified"))?;

        let config = self.config.unwrap_or_default();
        config.validate()?;

        let event_bus = self
            .event_bus
            .unwrap_or_else(|| Arc::new(EventBus::new(config.system.event_bus_capacity)));

        let viewfinder = Viewfinder::new(&config, self.camera, view, Arc::clone(&event_bus));
        let (context, task) = UiContext::spawn(viewfinder);

        let weak = context.downgrade();
        context.dispatch(move |viewfinder| {
            viewfinder.bind_context(weak);
            viewfinder.create_ui();
        });
        debug!("Viewfinder controller started");

        Ok(ViewfinderController {
            context,
            event_bus,
            task,
        })
    }
}

impl Default for ViewfinderControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
