use serde::{Deserialize, Serialize};

use super::Axis;

/// Space reserved on each side of a widget.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margins {
    /// Left margin.
    pub left: u32,
    /// Right margin.
    pub right: u32,
    /// Top margin.
    pub top: u32,
    /// Bottom margin.
    pub bottom: u32,
}

impl Margins {
    /// Construct margins from explicit sides.
    pub fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same margin on every side.
    pub fn uniform(m: u32) -> Self {
        Self::new(m, m, m, m)
    }

    /// The margin before the content along an axis (left or top).
    pub fn leading(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// The margin after the content along an axis (right or bottom).
    pub fn trailing(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Sum of both margins along an axis.
    pub fn total(&self, axis: Axis) -> u32 {
        self.leading(axis).saturating_add(self.trailing(axis))
    }

    /// True if every side is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_axis() {
        let m = Margins::new(1, 2, 3, 4);
        assert_eq!(m.total(Axis::Horizontal), 3);
        assert_eq!(m.total(Axis::Vertical), 7);
        assert_eq!(m.leading(Axis::Vertical), 3);
        assert_eq!(m.trailing(Axis::Horizontal), 2);
        assert!(!m.is_zero());
        assert!(Margins::default().is_zero());
    }
}
