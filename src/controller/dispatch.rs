use super::Viewfinder;
use crate::camera::CameraEngine;
use crate::events::ViewfinderEvent;
use crate::setup::{SetupAction, SetupOutcome};
use std::sync::Arc;
use tracing::{debug, info, warn};

impl Viewfinder {
    /// Carry out the action for one setup outcome. Runs on the UI context.
    ///
    /// Engine-side actions are skipped without a prompt when no camera is attached.
    pub(super) fn handle_setup_result(&mut self, outcome: SetupOutcome) {
        let action = SetupAction::for_outcome(outcome, &self.prompts);
        debug!("Setup outcome {:?} resolved to {:?}", outcome, action);

        match (&action, self.camera.clone()) {
            (SetupAction::Ignore, _) => {}
            (SetupAction::ShowPrompt { message, clear_after }, _) => {
                self.set_text_prompt(message.clone());
                if let Some(delay) = clear_after {
                    self.schedule_prompt_clear(*delay);
                }
            }
            (_, None) => {
                debug!("No camera attached, nothing to do for {:?}", outcome);
                self.publish(ViewfinderEvent::SetupOutcomeHandled {
                    outcome,
                    action: SetupAction::Ignore,
                });
                return;
            }
            (SetupAction::StartCapture, Some(camera)) => {
                self.apply_enablement(true);
                camera.start();
            }
            (SetupAction::ReconfigureVideo, Some(camera)) => {
                self.reconfigure_video(camera);
            }
            (SetupAction::RequestVideoPermission, Some(camera)) => {
                info!("Requesting video permissions");
                camera.request_video_permissions();
            }
            (SetupAction::RequestAudioPermission, Some(camera)) => {
                info!("Requesting audio permissions");
                camera.request_audio_permissions();
            }
        }

        self.publish(ViewfinderEvent::SetupOutcomeHandled { outcome, action });
    }

    /// Ask the engine to redo video setup, then handle the new outcome on the UI context.
    ///
    /// The continuation only holds a weak handle, so a controller dropped
    /// while the update is in flight just discards the outcome.
    fn reconfigure_video(&self, camera: Arc<dyn CameraEngine>) {
        let Some(context) = self.context.clone() else {
            warn!("UI context not bound, cannot reconfigure video");
            return;
        };

        info!("Reconfiguring video");
        tokio::spawn(async move {
            let outcome = camera.update_video().await;
            debug!("Video update finished with {:?}", outcome);

            let delivered = context.dispatch(move |viewfinder: &mut Viewfinder| {
                viewfinder.handle_setup_result(outcome)
            });
            if !delivered {
                debug!("Controller released before video update finished");
            }
        });
    }
}
