use serde::{Deserialize, Serialize};

/// Orientation of the user interface as reported by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceOrientation {
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

/// Orientation applied to the capture connection and its outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureOrientation {
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl InterfaceOrientation {
    /// Next orientation when rotating clockwise, used by the interactive driver
    pub fn rotated(self) -> Self {
        match self {
            InterfaceOrientation::Portrait | InterfaceOrientation::Unknown => {
                InterfaceOrientation::LandscapeRight
            }
            InterfaceOrientation::LandscapeRight => InterfaceOrientation::PortraitUpsideDown,
            InterfaceOrientation::PortraitUpsideDown => InterfaceOrientation::LandscapeLeft,
            InterfaceOrientation::LandscapeLeft => InterfaceOrientation::Portrait,
        }
    }
}

/// Map an interface orientation to the capture orientation the preview needs.
///
/// Anything the capture side has no counterpart for falls back to portrait.
pub fn capture_orientation(orientation: InterfaceOrientation) -> CaptureOrientation {
    match orientation {
        InterfaceOrientation::Portrait => CaptureOrientation::Portrait,
        InterfaceOrientation::LandscapeLeft => CaptureOrientation::LandscapeLeft,
        InterfaceOrientation::LandscapeRight => CaptureOrientation::LandscapeRight,
        InterfaceOrientation::PortraitUpsideDown => CaptureOrientation::PortraitUpsideDown,
        _ => CaptureOrientation::Portrait,
    }
}

impl From<InterfaceOrientation> for CaptureOrientation {
    fn from(orientation: InterfaceOrientation) -> Self {
        capture_orientation(orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_orientations_map_directly() {
        assert_eq!(
            capture_orientation(InterfaceOrientation::Portrait),
            CaptureOrientation::Portrait
        );
        assert_eq!(
            capture_orientation(InterfaceOrientation::LandscapeLeft),
            CaptureOrientation::LandscapeLeft
        );
        assert_eq!(
            capture_orientation(InterfaceOrientation::LandscapeRight),
            CaptureOrientation::LandscapeRight
        );
        assert_eq!(
            capture_orientation(InterfaceOrientation::PortraitUpsideDown),
            CaptureOrientation::PortraitUpsideDown
        );
    }

    #[test]
    fn test_unknown_orientation_defaults_to_portrait() {
        assert_eq!(
            CaptureOrientation::from(InterfaceOrientation::Unknown),
            CaptureOrientation::Portrait
        );
    }

    #[test]
    fn test_rotation_cycles_back_to_portrait() {
        let mut orientation = InterfaceOrientation::Portrait;
        for _ in 0..4 {
            orientation = orientation.rotated();
        }
        assert_eq!(orientation, InterfaceOrientation::Portrait);
    }
}
