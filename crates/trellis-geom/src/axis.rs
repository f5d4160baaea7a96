use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two layout dimensions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Both axes, in the order layout visits them.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Return the perpendicular axis.
    pub fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A value held once per axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dim<T> {
    /// Horizontal value.
    pub hor: T,
    /// Vertical value.
    pub vert: T,
}

impl<T> Dim<T> {
    /// Construct from explicit horizontal and vertical values.
    pub fn new(hor: T, vert: T) -> Self {
        Self { hor, vert }
    }

    /// Apply `f` to both values.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Dim<U> {
        Dim {
            hor: f(self.hor),
            vert: f(self.vert),
        }
    }
}

impl<T: Clone> Dim<T> {
    /// Use the same value for both axes.
    pub fn splat(value: T) -> Self {
        Self {
            hor: value.clone(),
            vert: value,
        }
    }
}

impl<T> Index<Axis> for Dim<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::Horizontal => &self.hor,
            Axis::Vertical => &self.vert,
        }
    }
}

impl<T> IndexMut<Axis> for Dim<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Horizontal => &mut self.hor,
            Axis::Vertical => &mut self.vert,
        }
    }
}
