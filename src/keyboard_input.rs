use crate::controller::ViewfinderController;
use crate::error::Result;
use crate::gesture::CameraFacing;
use crate::orientation::InterfaceOrientation;
use crate::setup::SetupOutcome;
use crate::ui::{Point, Rect};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const ZOOM_STEP: f32 = 1.25;

/// What a key press asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    Outcome(SetupOutcome),
    ZoomIn,
    ZoomOut,
    Focus,
    FlipFacing,
    Rotate,
    Quit,
}

/// Map a key to its command; unmapped keys yield `None`
pub fn command_for_key(code: KeyCode) -> Option<KeyCommand> {
    let command = match code {
        KeyCode::Char('1') => KeyCommand::Outcome(SetupOutcome::VideoReady),
        KeyCode::Char('2') => KeyCommand::Outcome(SetupOutcome::RequiresUpdate),
        KeyCode::Char('3') => KeyCommand::Outcome(SetupOutcome::VideoPermissionDenied),
        KeyCode::Char('4') => KeyCommand::Outcome(SetupOutcome::VideoPermissionRestricted),
        KeyCode::Char('5') => KeyCommand::Outcome(SetupOutcome::VideoNeedsAuthorizationRequest),
        KeyCode::Char('6') => KeyCommand::Outcome(SetupOutcome::AudioPermissionDenied),
        KeyCode::Char('7') => KeyCommand::Outcome(SetupOutcome::AudioPermissionRestricted),
        KeyCode::Char('8') => KeyCommand::Outcome(SetupOutcome::AudioNeedsAuthorizationRequest),
        KeyCode::Char('9') => KeyCommand::Outcome(SetupOutcome::InvalidVideoInput),
        KeyCode::Char('0') => KeyCommand::Outcome(SetupOutcome::UnknownError),
        KeyCode::Char('a') => KeyCommand::Outcome(SetupOutcome::AudioReady),
        KeyCode::Char('+') | KeyCode::Char('=') => KeyCommand::ZoomIn,
        KeyCode::Char('-') => KeyCommand::ZoomOut,
        KeyCode::Char('t') => KeyCommand::Focus,
        KeyCode::Char('f') => KeyCommand::FlipFacing,
        KeyCode::Char('o') => KeyCommand::Rotate,
        KeyCode::Char('q') | KeyCode::Esc => KeyCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Keyboard driver that stands in for toolkit gestures and engine callbacks
pub struct KeyboardInputHandler {
    controller: Arc<ViewfinderController>,
    bounds: Rect,
    cancellation_token: CancellationToken,
    quit_token: CancellationToken,
}

impl KeyboardInputHandler {
    pub fn new(controller: Arc<ViewfinderController>, bounds: Rect) -> Self {
        Self {
            controller,
            bounds,
            cancellation_token: CancellationToken::new(),
            quit_token: CancellationToken::new(),
        }
    }

    /// Cancelled once the user presses the quit key
    pub fn quit_token(&self) -> CancellationToken {
        self.quit_token.clone()
    }

    /// Start listening for keyboard input
    pub async fn start(&self) -> Result<()> {
        info!("Starting keyboard input handler - digits send setup outcomes, q quits");

        let controller = Arc::clone(&self.controller);
        let cancellation_token = self.cancellation_token.clone();
        let quit_token = self.quit_token.clone();
        let mut driver = GestureDriver::new(self.bounds);

        task::spawn_blocking(move || {
            if let Err(e) = enable_raw_mode() {
                error!("Failed to enable raw mode for keyboard input: {}", e);
                return;
            }

            debug!("Raw mode enabled - keyboard handler active");

            loop {
                if cancellation_token.is_cancelled() {
                    debug!("Keyboard input handler stopping");
                    break;
                }

                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => {
                        if let Ok(Event::Key(key_event)) = event::read() {
                            if key_event.kind != KeyEventKind::Press {
                                continue;
                            }
                            match command_for_key(key_event.code) {
                                Some(KeyCommand::Quit) => {
                                    info!("Quit key pressed");
                                    quit_token.cancel();
                                    break;
                                }
                                Some(command) => driver.apply(command, &controller),
                                None => debug!("Key pressed: {:?}", key_event.code),
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!("Error polling for keyboard events: {}", e);
                    }
                }
            }

            if let Err(e) = disable_raw_mode() {
                error!("Failed to disable raw mode: {}", e);
            } else {
                debug!("Raw mode disabled");
            }

            debug!("Keyboard input handler task exited");
        });

        Ok(())
    }

    /// Stop the keyboard input handler
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping keyboard input handler");
        self.cancellation_token.cancel();

        // Give the task a moment to clean up and disable raw mode
        tokio::time::sleep(Duration::from_millis(200)).await;

        let _ = disable_raw_mode();

        Ok(())
    }
}

/// Local view of facing and orientation so key presses can toggle them
struct GestureDriver {
    bounds: Rect,
    facing: CameraFacing,
    orientation: InterfaceOrientation,
}

impl GestureDriver {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            facing: CameraFacing::Back,
            orientation: InterfaceOrientation::Portrait,
        }
    }

    fn apply(&mut self, command: KeyCommand, controller: &ViewfinderController) {
        match command {
            KeyCommand::Outcome(outcome) => {
                info!("Simulating setup outcome: {}", outcome);
                controller.handle_setup_result(outcome);
            }
            KeyCommand::ZoomIn => {
                controller.begin_pinch();
                controller.pinch(ZOOM_STEP);
            }
            KeyCommand::ZoomOut => {
                controller.begin_pinch();
                controller.pinch(1.0 / ZOOM_STEP);
            }
            KeyCommand::Focus => {
                controller.tap(Point::new(self.bounds.mid_x(), self.bounds.mid_y()));
            }
            KeyCommand::FlipFacing => {
                self.facing = self.facing.flipped();
                controller.set_facing(self.facing);
            }
            KeyCommand::Rotate => {
                self.orientation = self.orientation.rotated();
                self.bounds = Rect::new(
                    self.bounds.min_x(),
                    self.bounds.min_y(),
                    self.bounds.size.height,
                    self.bounds.size.width,
                );
                controller.transition(self.orientation, self.bounds);
            }
            KeyCommand::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::LoggingSurface;

    fn create_controller() -> Arc<ViewfinderController> {
        let controller = ViewfinderController::builder()
            .view(LoggingSurface::new(Rect::new(0.0, 0.0, 375.0, 667.0)))
            .build()
            .unwrap();
        Arc::new(controller)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            command_for_key(KeyCode::Char('6')),
            Some(KeyCommand::Outcome(SetupOutcome::AudioPermissionDenied))
        );
        assert_eq!(command_for_key(KeyCode::Esc), Some(KeyCommand::Quit));
        assert_eq!(command_for_key(KeyCode::Char('=')), Some(KeyCommand::ZoomIn));
        assert_eq!(command_for_key(KeyCode::Char('x')), None);
    }

    #[tokio::test]
    async fn test_driver_rotates_bounds_and_flips_facing() {
        let controller = create_controller();
        let mut driver = GestureDriver::new(Rect::new(0.0, 0.0, 375.0, 667.0));

        driver.apply(KeyCommand::Rotate, &controller);
        driver.apply(KeyCommand::FlipFacing, &controller);

        assert_eq!(driver.bounds.size.width, 667.0);
        assert_eq!(driver.orientation, InterfaceOrientation::LandscapeRight);

        let snapshot = controller.snapshot().await.unwrap();
        assert_eq!(snapshot.facing, CameraFacing::Front);
        assert_eq!(
            snapshot.orientation,
            Some(crate::orientation::CaptureOrientation::LandscapeRight)
        );
    }

    #[tokio::test]
    async fn test_keyboard_handler_stop() {
        let handler = KeyboardInputHandler::new(create_controller(), Rect::default());

        handler.stop().await.unwrap();
        assert!(handler.cancellation_token.is_cancelled());
        assert!(!handler.quit_token().is_cancelled());
    }
}
