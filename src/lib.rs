pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gesture;
pub mod keyboard_input;
pub mod orientation;
pub mod setup;
pub mod ui;

pub use camera::{CameraCall, CameraEngine, MockCameraEngine};
pub use config::ViewfinderConfig;
pub use controller::{ViewfinderController, ViewfinderControllerBuilder, ViewfinderSnapshot};
pub use error::{Result, ViewfinderError};
pub use events::{EventBus, EventFilter, EventReceiver, ViewfinderEvent};
pub use gesture::{CameraFacing, ZoomState};
pub use keyboard_input::KeyboardInputHandler;
pub use orientation::{capture_orientation, CaptureOrientation, InterfaceOrientation};
pub use setup::{PromptCatalog, SetupAction, SetupOutcome};
pub use ui::{ControlEnablement, ControlLayout, LoggingSurface, Point, Rect, UiContext, ViewSurface};
