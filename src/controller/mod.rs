mod dispatch;
mod gestures;
mod handle;
mod interface;
mod state;

pub use handle::{ViewfinderController, ViewfinderControllerBuilder};
pub use state::{Viewfinder, ViewfinderSnapshot};
