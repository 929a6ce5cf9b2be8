use crate::config::LayoutConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size { width, height },
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn is_wide(&self) -> bool {
        self.size.width > self.size.height
    }
}

/// Center positions of the on-screen controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLayout {
    pub cancel: Point,
    pub shutter: Point,
    pub switch: Point,
    pub torch: Point,
    pub text_prompt: Point,
}

impl ControlLayout {
    /// Position every control for the given view bounds.
    ///
    /// The shutter sits at the trailing edge in wide layouts and at the
    /// bottom edge otherwise; a square view counts as tall.
    pub fn for_bounds(bounds: Rect, insets: &LayoutConfig) -> Self {
        let shutter = if bounds.is_wide() {
            Point::new(bounds.max_x() - insets.shutter_inset, bounds.mid_y())
        } else {
            Point::new(bounds.mid_x(), bounds.max_y() - insets.shutter_inset)
        };

        Self {
            cancel: Point::new(
                bounds.min_x() + insets.cancel_inset_x,
                bounds.max_y() - insets.cancel_inset_y,
            ),
            shutter,
            switch: Point::new(
                bounds.max_x() - insets.corner_inset,
                bounds.min_y() + insets.corner_inset,
            ),
            torch: Point::new(
                bounds.min_x() + insets.corner_inset,
                bounds.min_y() + insets.corner_inset,
            ),
            text_prompt: Point::new(bounds.mid_x(), bounds.min_y() + insets.prompt_inset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_layout_puts_shutter_at_bottom() {
        let layout = ControlLayout::for_bounds(
            Rect::new(0.0, 0.0, 375.0, 667.0),
            &LayoutConfig::default(),
        );

        assert_eq!(layout.shutter, Point::new(187.5, 622.0));
        assert_eq!(layout.cancel, Point::new(55.0, 622.0));
        assert_eq!(layout.switch, Point::new(350.0, 25.0));
        assert_eq!(layout.torch, Point::new(25.0, 25.0));
        assert_eq!(layout.text_prompt, Point::new(187.5, 45.0));
    }

    #[test]
    fn test_wide_layout_puts_shutter_at_trailing_edge() {
        let layout = ControlLayout::for_bounds(
            Rect::new(0.0, 0.0, 667.0, 375.0),
            &LayoutConfig::default(),
        );

        assert_eq!(layout.shutter, Point::new(622.0, 187.5));
    }

    #[test]
    fn test_layout_follows_bounds_origin() {
        let layout = ControlLayout::for_bounds(
            Rect::new(10.0, 20.0, 100.0, 100.0),
            &LayoutConfig::default(),
        );

        // Square bounds use the tall layout
        assert_eq!(layout.shutter, Point::new(60.0, 75.0));
        assert_eq!(layout.torch, Point::new(35.0, 45.0));
    }
}
