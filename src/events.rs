use crate::error::EventBusError;
use crate::gesture::CameraFacing;
use crate::orientation::CaptureOrientation;
use crate::setup::{SetupAction, SetupOutcome};
use crate::ui::{ControlLayout, Point};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

/// Changes made by the controller, published after they take effect on the UI context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ViewfinderEvent {
    /// A setup outcome was resolved to an action
    SetupOutcomeHandled {
        outcome: SetupOutcome,
        action: SetupAction,
    },
    /// The gated controls were enabled or disabled together
    ControlsEnabled { enabled: bool },
    /// The text prompt changed; empty means hidden
    PromptChanged { text: String },
    ZoomChanged { scale: f32 },
    FocusRequested { point: Point },
    OrientationChanged { orientation: CaptureOrientation },
    FacingChanged { facing: CameraFacing },
    LayoutUpdated { layout: ControlLayout },
    CameraAttached,
    CameraDetached,
}

impl ViewfinderEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            ViewfinderEvent::SetupOutcomeHandled { outcome, action } => {
                format!("Setup outcome '{}' handled with {:?}", outcome, action)
            }
            ViewfinderEvent::ControlsEnabled { enabled } => {
                format!(
                    "Controls {}",
                    if *enabled { "enabled" } else { "disabled" }
                )
            }
            ViewfinderEvent::PromptChanged { text } if text.is_empty() => {
                "Prompt cleared".to_string()
            }
            ViewfinderEvent::PromptChanged { text } => format!("Prompt: {}", text),
            ViewfinderEvent::ZoomChanged { scale } => format!("Zoom scale {:.2}", scale),
            ViewfinderEvent::FocusRequested { point } => {
                format!("Focus at ({:.1}, {:.1})", point.x, point.y)
            }
            ViewfinderEvent::OrientationChanged { orientation } => {
                format!("Orientation {:?}", orientation)
            }
            ViewfinderEvent::FacingChanged { facing } => format!("Facing {:?}", facing),
            ViewfinderEvent::LayoutUpdated { .. } => "Layout updated".to_string(),
            ViewfinderEvent::CameraAttached => "Camera attached".to_string(),
            ViewfinderEvent::CameraDetached => "Camera detached".to_string(),
        }
    }

    /// Get the event type as a string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            ViewfinderEvent::SetupOutcomeHandled { .. } => "setup_outcome_handled",
            ViewfinderEvent::ControlsEnabled { .. } => "controls_enabled",
            ViewfinderEvent::PromptChanged { .. } => "prompt_changed",
            ViewfinderEvent::ZoomChanged { .. } => "zoom_changed",
            ViewfinderEvent::FocusRequested { .. } => "focus_requested",
            ViewfinderEvent::OrientationChanged { .. } => "orientation_changed",
            ViewfinderEvent::FacingChanged { .. } => "facing_changed",
            ViewfinderEvent::LayoutUpdated { .. } => "layout_updated",
            ViewfinderEvent::CameraAttached => "camera_attached",
            ViewfinderEvent::CameraDetached => "camera_detached",
        }
    }
}

/// Event bus for observers of the controller, backed by a broadcast channel
pub struct EventBus {
    sender: broadcast::Sender<ViewfinderEvent>,
}

impl EventBus {
    /// Create a new event bus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events and get a receiver
    pub fn subscribe(&self) -> broadcast::Receiver<ViewfinderEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Never blocks, so it is safe to call from UI jobs.
    pub fn publish(&self, event: ViewfinderEvent) -> Result<usize, EventBusError> {
        trace!("Publishing event: {}", event.description());

        if let ViewfinderEvent::SetupOutcomeHandled { outcome, .. } = &event {
            info!("Setup outcome handled: {}", outcome);
        }

        self.sender
            .send(event)
            .map_err(|e| EventBusError::PublishFailed {
                details: e.to_string(),
            })
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Check if there are any active subscribers
    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Event filter for selective event handling
#[derive(Debug, Clone)]
pub enum EventFilter {
    /// Accept all events
    All,
    /// Accept only specific event types
    EventTypes(Vec<&'static str>),
    /// Accept setup events for specific outcomes
    Outcomes(Vec<SetupOutcome>),
    /// Custom filter function
    Custom(fn(&ViewfinderEvent) -> bool),
}

impl EventFilter {
    /// Check if an event passes this filter
    pub fn matches(&self, event: &ViewfinderEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::EventTypes(types) => types.contains(&event.event_type()),
            EventFilter::Outcomes(outcomes) => {
                if let ViewfinderEvent::SetupOutcomeHandled { outcome, .. } = event {
                    outcomes.contains(outcome)
                } else {
                    false
                }
            }
            EventFilter::Custom(filter_fn) => filter_fn(event),
        }
    }
}

/// Event receiver with filtering capabilities
pub struct EventReceiver {
    receiver: broadcast::Receiver<ViewfinderEvent>,
    filter: EventFilter,
    name: String,
}

impl EventReceiver {
    /// Create a new event receiver with a filter
    pub fn new(
        receiver: broadcast::Receiver<ViewfinderEvent>,
        filter: EventFilter,
        name: String,
    ) -> Self {
        Self {
            receiver,
            filter,
            name,
        }
    }

    /// Receive the next filtered event
    pub async fn recv(&mut self) -> Result<ViewfinderEvent, EventBusError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        debug!(
                            "Receiver '{}' received event: {}",
                            self.name,
                            event.description()
                        );
                        return Ok(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Receiver '{}' lagged behind by {} events", self.name, n);
                    return Err(EventBusError::PublishFailed {
                        details: format!("Receiver lagged behind by {} events", n),
                    });
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Event bus closed for receiver '{}'", self.name);
                    return Err(EventBusError::ChannelClosed);
                }
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<Option<ViewfinderEvent>, EventBusError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        return Ok(Some(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => {
                    return Ok(None);
                }
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("Receiver '{}' lagged behind by {} events", self.name, n);
                    return Err(EventBusError::PublishFailed {
                        details: format!("Receiver lagged behind by {} events", n),
                    });
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(EventBusError::ChannelClosed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_event_bus_basic_operations() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        let subscriber_count = event_bus
            .publish(ViewfinderEvent::ZoomChanged { scale: 2.0 })
            .unwrap();
        assert_eq!(subscriber_count, 1);

        match receiver.recv().await.unwrap() {
            ViewfinderEvent::ZoomChanged { scale } => assert_eq!(scale, 2.0),
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_publish_without_subscribers_fails() {
        let event_bus = EventBus::new(10);

        assert!(!event_bus.has_subscribers());
        assert!(event_bus.publish(ViewfinderEvent::CameraAttached).is_err());
    }

    #[test]
    fn test_event_filter() {
        let filter = EventFilter::Outcomes(vec![SetupOutcome::AudioPermissionDenied]);

        let audio = ViewfinderEvent::SetupOutcomeHandled {
            outcome: SetupOutcome::AudioPermissionDenied,
            action: SetupAction::Ignore,
        };
        let video = ViewfinderEvent::SetupOutcomeHandled {
            outcome: SetupOutcome::VideoReady,
            action: SetupAction::StartCapture,
        };

        assert!(filter.matches(&audio));
        assert!(!filter.matches(&video));
        assert!(!filter.matches(&ViewfinderEvent::CameraDetached));
    }

    #[tokio::test]
    async fn test_filtered_receiver() {
        let event_bus = EventBus::new(10);
        let receiver = event_bus.subscribe();
        let filter = EventFilter::EventTypes(vec!["prompt_changed"]);
        let mut filtered = EventReceiver::new(receiver, filter, "test".to_string());

        event_bus
            .publish(ViewfinderEvent::ControlsEnabled { enabled: true })
            .unwrap();
        event_bus
            .publish(ViewfinderEvent::PromptChanged {
                text: String::new(),
            })
            .unwrap();

        let event = timeout(Duration::from_millis(100), filtered.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.description(), "Prompt cleared");
        assert!(filtered.try_recv().unwrap().is_none());
    }
}
