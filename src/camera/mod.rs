mod engine;
mod mock;
#[cfg(test)]
mod tests;

pub use engine::CameraEngine;
pub use mock::{CameraCall, MockCameraEngine};
