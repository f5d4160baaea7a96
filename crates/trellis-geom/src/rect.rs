use serde::{Deserialize, Serialize};

use super::{Axis, Error, Margins, Point, Result, Size};

/// A rectangle with an origin and a size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Construct a rectangle from an origin and a size.
    pub fn new(tl: Point, size: Size) -> Self {
        Self { tl, size }
    }

    /// Construct a rectangle from raw coordinates.
    pub fn from_coords(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self::new(Point::new(x, y), Size::new(w, h))
    }

    /// The exclusive far edge along an axis.
    pub fn far(&self, axis: Axis) -> u64 {
        u64::from(self.tl.along(axis)) + u64::from(self.size.along(axis))
    }

    /// Does this rectangle completely enclose `other`?
    pub fn contains_rect(&self, other: &Self) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            other.tl.along(axis) >= self.tl.along(axis) && other.far(axis) <= self.far(axis)
        })
    }

    /// Shrink the rectangle by per-side margins. Fails if the margins do not
    /// fit inside the rectangle.
    pub fn inset(&self, m: Margins) -> Result<Self> {
        let mut out = *self;
        for axis in Axis::ALL {
            let total = m.total(axis);
            if total > self.size.along(axis) {
                return Err(Error::Geometry(format!(
                    "margins {total} exceed {axis:?} extent {}",
                    self.size.along(axis)
                )));
            }
            out.tl
                .set_along(axis, self.tl.along(axis).saturating_add(m.leading(axis)));
            out.size.set_along(axis, self.size.along(axis) - total);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn inset() -> Result<()> {
        let r = Rect::from_coords(0, 0, 10, 10);
        assert_eq!(r.inset(Margins::uniform(1))?, Rect::from_coords(1, 1, 8, 8));
        assert_eq!(
            r.inset(Margins::new(2, 0, 0, 3))?,
            Rect::from_coords(2, 0, 8, 7)
        );
        assert!(r.inset(Margins::uniform(6)).is_err());
        Ok(())
    }

    #[test]
    fn contains() {
        let outer = Rect::from_coords(5, 5, 10, 10);
        assert!(outer.contains_rect(&Rect::from_coords(5, 5, 10, 10)));
        assert!(outer.contains_rect(&Rect::from_coords(6, 6, 2, 2)));
        assert!(!outer.contains_rect(&Rect::from_coords(4, 6, 2, 2)));
        assert!(!outer.contains_rect(&Rect::from_coords(14, 6, 2, 2)));
    }

    proptest! {
        #[test]
        fn inset_stays_inside(
            w in 0u32..200,
            h in 0u32..200,
            l in 0u32..50,
            r in 0u32..50,
            t in 0u32..50,
            b in 0u32..50,
        ) {
            let outer = Rect::from_coords(3, 4, w, h);
            if let Ok(inner) = outer.inset(Margins::new(l, r, t, b)) {
                prop_assert!(outer.contains_rect(&inner));
                prop_assert_eq!(inner.size.w + l + r, w);
                prop_assert_eq!(inner.size.h + t + b, h);
            } else {
                prop_assert!(l + r > w || t + b > h);
            }
        }
    }
}
