use crate::config::PromptConfig;
use crate::error::ViewfinderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Result of one attempt to bring up video and/or audio capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupOutcome {
    VideoReady,
    AudioReady,
    RequiresUpdate,
    VideoPermissionDenied,
    VideoPermissionRestricted,
    VideoNeedsAuthorizationRequest,
    AudioPermissionDenied,
    AudioPermissionRestricted,
    AudioNeedsAuthorizationRequest,
    InvalidVideoOutput,
    InvalidVideoInput,
    InvalidPhotoOutput,
    InvalidMetadataOutput,
    InvalidFileOutput,
    InvalidAudioInput,
    InvalidDepthOutput,
    UnknownError,
}

impl SetupOutcome {
    pub const ALL: [SetupOutcome; 17] = [
        SetupOutcome::VideoReady,
        SetupOutcome::AudioReady,
        SetupOutcome::RequiresUpdate,
        SetupOutcome::VideoPermissionDenied,
        SetupOutcome::VideoPermissionRestricted,
        SetupOutcome::VideoNeedsAuthorizationRequest,
        SetupOutcome::AudioPermissionDenied,
        SetupOutcome::AudioPermissionRestricted,
        SetupOutcome::AudioNeedsAuthorizationRequest,
        SetupOutcome::InvalidVideoOutput,
        SetupOutcome::InvalidVideoInput,
        SetupOutcome::InvalidPhotoOutput,
        SetupOutcome::InvalidMetadataOutput,
        SetupOutcome::InvalidFileOutput,
        SetupOutcome::InvalidAudioInput,
        SetupOutcome::InvalidDepthOutput,
        SetupOutcome::UnknownError,
    ];

    /// Human-readable label, embedded in hard-failure prompts
    pub fn label(&self) -> &'static str {
        match self {
            SetupOutcome::VideoReady => "Video Was Loaded Successfully",
            SetupOutcome::AudioReady => "Audio Was Loaded Successfully",
            SetupOutcome::RequiresUpdate => "Requires AV Update",
            SetupOutcome::VideoPermissionDenied => "Video Permissions Denied",
            SetupOutcome::VideoPermissionRestricted => "Video Permissions Restricted",
            SetupOutcome::VideoNeedsAuthorizationRequest => {
                "Video Permissions Require Authorization"
            }
            SetupOutcome::AudioPermissionDenied => "Audio Permissions Denied",
            SetupOutcome::AudioPermissionRestricted => "Audio Permissions Restricted",
            SetupOutcome::AudioNeedsAuthorizationRequest => {
                "Audio Permissions Require Authorization"
            }
            SetupOutcome::InvalidVideoOutput => "Invalid Video Data Output",
            SetupOutcome::InvalidVideoInput => "Invalid Video Input",
            SetupOutcome::InvalidPhotoOutput => "Invalid Photo Output",
            SetupOutcome::InvalidMetadataOutput => "Invalid Video Metadata Output",
            SetupOutcome::InvalidFileOutput => "Invalid Video File Output",
            SetupOutcome::InvalidAudioInput => "Invalid Audio Input",
            SetupOutcome::InvalidDepthOutput => "Invalid Depth Data Output",
            SetupOutcome::UnknownError => "Unknown Error",
        }
    }

    /// Stable snake_case name, as accepted by `FromStr`
    pub fn key(&self) -> &'static str {
        match self {
            SetupOutcome::VideoReady => "video_ready",
            SetupOutcome::AudioReady => "audio_ready",
            SetupOutcome::RequiresUpdate => "requires_update",
            SetupOutcome::VideoPermissionDenied => "video_permission_denied",
            SetupOutcome::VideoPermissionRestricted => "video_permission_restricted",
            SetupOutcome::VideoNeedsAuthorizationRequest => "video_needs_authorization_request",
            SetupOutcome::AudioPermissionDenied => "audio_permission_denied",
            SetupOutcome::AudioPermissionRestricted => "audio_permission_restricted",
            SetupOutcome::AudioNeedsAuthorizationRequest => "audio_needs_authorization_request",
            SetupOutcome::InvalidVideoOutput => "invalid_video_output",
            SetupOutcome::InvalidVideoInput => "invalid_video_input",
            SetupOutcome::InvalidPhotoOutput => "invalid_photo_output",
            SetupOutcome::InvalidMetadataOutput => "invalid_metadata_output",
            SetupOutcome::InvalidFileOutput => "invalid_file_output",
            SetupOutcome::InvalidAudioInput => "invalid_audio_input",
            SetupOutcome::InvalidDepthOutput => "invalid_depth_output",
            SetupOutcome::UnknownError => "unknown_error",
        }
    }

    /// True for the capture components that failed to configure
    pub fn is_hard_failure(&self) -> bool {
        matches!(
            self,
            SetupOutcome::InvalidVideoOutput
                | SetupOutcome::InvalidVideoInput
                | SetupOutcome::InvalidPhotoOutput
                | SetupOutcome::InvalidMetadataOutput
                | SetupOutcome::InvalidFileOutput
                | SetupOutcome::InvalidAudioInput
                | SetupOutcome::InvalidDepthOutput
        )
    }
}

impl fmt::Display for SetupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SetupOutcome {
    type Err = ViewfinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        SetupOutcome::ALL
            .iter()
            .copied()
            .find(|outcome| outcome.key() == wanted)
            .ok_or_else(|| ViewfinderError::UnknownOutcome(s.to_string()))
    }
}

/// The single remedial step taken for a setup outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetupAction {
    /// Enable the gated controls, then start streaming
    StartCapture,
    /// Redo the video configuration and handle its outcome in turn
    ReconfigureVideo,
    RequestVideoPermission,
    RequestAudioPermission,
    /// Show a prompt, optionally clearing it after a delay
    ShowPrompt {
        message: String,
        clear_after: Option<Duration>,
    },
    /// Leave everything as it is
    Ignore,
}

impl SetupAction {
    /// Decide what to do for `outcome`. Pure; executing the action is the controller's job.
    pub fn for_outcome(outcome: SetupOutcome, prompts: &PromptCatalog) -> Self {
        match outcome {
            SetupOutcome::VideoReady => SetupAction::StartCapture,
            SetupOutcome::AudioReady => SetupAction::Ignore,
            SetupOutcome::RequiresUpdate => SetupAction::ReconfigureVideo,
            SetupOutcome::VideoPermissionDenied => SetupAction::ShowPrompt {
                message: prompts.video_denied(),
                clear_after: None,
            },
            SetupOutcome::VideoPermissionRestricted => SetupAction::ShowPrompt {
                message: prompts.video_restricted(),
                clear_after: None,
            },
            SetupOutcome::VideoNeedsAuthorizationRequest => SetupAction::RequestVideoPermission,
            SetupOutcome::AudioPermissionRestricted => SetupAction::ShowPrompt {
                message: prompts.audio_restricted(),
                clear_after: Some(prompts.auto_clear()),
            },
            SetupOutcome::AudioNeedsAuthorizationRequest => SetupAction::RequestAudioPermission,
            SetupOutcome::AudioPermissionDenied => SetupAction::ShowPrompt {
                message: prompts.audio_denied(),
                clear_after: Some(prompts.auto_clear()),
            },
            SetupOutcome::InvalidVideoOutput
            | SetupOutcome::InvalidVideoInput
            | SetupOutcome::InvalidPhotoOutput
            | SetupOutcome::InvalidMetadataOutput
            | SetupOutcome::InvalidFileOutput
            | SetupOutcome::InvalidAudioInput
            | SetupOutcome::InvalidDepthOutput => SetupAction::ShowPrompt {
                message: prompts.hard_failure(outcome),
                clear_after: None,
            },
            SetupOutcome::UnknownError => SetupAction::ShowPrompt {
                message: prompts.unknown_error(),
                clear_after: None,
            },
        }
    }

    /// Actions that are silently skipped while no camera is attached
    pub fn requires_camera(&self) -> bool {
        matches!(
            self,
            SetupAction::StartCapture
                | SetupAction::ReconfigureVideo
                | SetupAction::RequestVideoPermission
                | SetupAction::RequestAudioPermission
        )
    }
}

/// Fixed prompt texts shown for permission and failure outcomes
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    app_name: String,
    auto_clear: Duration,
}

impl PromptCatalog {
    pub fn new<S: Into<String>>(app_name: S, auto_clear: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            auto_clear,
        }
    }

    pub fn from_config(config: &PromptConfig) -> Self {
        Self::new(config.app_name.clone(), config.auto_clear_delay())
    }

    pub fn auto_clear(&self) -> Duration {
        self.auto_clear
    }

    pub fn video_denied(&self) -> String {
        format!(
            "Camera permissions for {} have been previously denied - please access your privacy settings to change this.",
            self.app_name
        )
    }

    pub fn video_restricted(&self) -> String {
        format!(
            "Camera permissions for {} have been restricted - please access your privacy settings to change this.",
            self.app_name
        )
    }

    pub fn audio_denied(&self) -> String {
        format!(
            "Audio permissions for {} have been previously denied - please access your privacy settings to change this.",
            self.app_name
        )
    }

    pub fn audio_restricted(&self) -> String {
        format!(
            "Audio permissions for {} have been restricted - please access your privacy settings to change this.",
            self.app_name
        )
    }

    pub fn hard_failure(&self, outcome: SetupOutcome) -> String {
        format!("{} - please try again", outcome.label())
    }

    pub fn unknown_error(&self) -> String {
        format!(
            "Unknown error occurred while loading {} - please try again",
            self.app_name
        )
    }
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::from_config(&crate::config::ViewfinderConfig::default().prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PromptCatalog {
        PromptCatalog::new("Lens", Duration::from_secs(2))
    }

    #[test]
    fn test_only_audio_prompts_auto_clear() {
        let prompts = catalog();

        for outcome in SetupOutcome::ALL {
            if let SetupAction::ShowPrompt { clear_after, .. } =
                SetupAction::for_outcome(outcome, &prompts)
            {
                let audio = matches!(
                    outcome,
                    SetupOutcome::AudioPermissionDenied | SetupOutcome::AudioPermissionRestricted
                );
                assert_eq!(
                    clear_after.is_some(),
                    audio,
                    "unexpected clear policy for {:?}",
                    outcome
                );
            }
        }
    }

    #[test]
    fn test_hard_failures_embed_label() {
        let prompts = catalog();

        let action = SetupAction::for_outcome(SetupOutcome::InvalidDepthOutput, &prompts);
        assert_eq!(
            action,
            SetupAction::ShowPrompt {
                message: "Invalid Depth Data Output - please try again".to_string(),
                clear_after: None,
            }
        );

        let hard_failures = SetupOutcome::ALL
            .iter()
            .filter(|outcome| outcome.is_hard_failure())
            .count();
        assert_eq!(hard_failures, 7);
    }

    #[test]
    fn test_permission_messages_name_the_app() {
        let prompts = catalog();

        assert_eq!(
            prompts.video_denied(),
            "Camera permissions for Lens have been previously denied - please access your privacy settings to change this."
        );
        assert!(prompts.audio_restricted().starts_with("Audio permissions for Lens"));
        assert_eq!(
            SetupAction::for_outcome(SetupOutcome::UnknownError, &prompts),
            SetupAction::ShowPrompt {
                message: "Unknown error occurred while loading Lens - please try again".to_string(),
                clear_after: None,
            }
        );
    }

    #[test]
    fn test_engine_actions_require_camera() {
        let prompts = catalog();

        let needs_camera: Vec<_> = SetupOutcome::ALL
            .iter()
            .copied()
            .filter(|outcome| SetupAction::for_outcome(*outcome, &prompts).requires_camera())
            .collect();
        assert_eq!(
            needs_camera,
            vec![
                SetupOutcome::VideoReady,
                SetupOutcome::RequiresUpdate,
                SetupOutcome::VideoNeedsAuthorizationRequest,
                SetupOutcome::AudioNeedsAuthorizationRequest,
            ]
        );
        assert_eq!(
            SetupAction::for_outcome(SetupOutcome::AudioReady, &prompts),
            SetupAction::Ignore
        );
    }

    #[test]
    fn test_outcome_names_parse() {
        for outcome in SetupOutcome::ALL {
            assert_eq!(outcome.key().parse::<SetupOutcome>().unwrap(), outcome);
        }
        assert_eq!(
            "Video-Ready".parse::<SetupOutcome>().unwrap(),
            SetupOutcome::VideoReady
        );
        assert!(matches!(
            "video_success".parse::<SetupOutcome>(),
            Err(ViewfinderError::UnknownOutcome(_))
        ));
    }
}
