mod context;
mod layout;
mod view;
#[cfg(test)]
mod tests;

pub use context::{UiContext, UiJob, WeakUiContext};
pub use layout::{ControlLayout, Point, Rect, Size};
pub use view::{ControlEnablement, LoggingSurface, SurfaceRecord, ViewSurface};
