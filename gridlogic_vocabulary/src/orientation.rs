// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element and connector orientations.

/// Direction an element or connector faces on the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Facing towards positive x.
    #[default]
    Right,
    /// Facing towards negative x.
    Left,
    /// Facing towards negative y.
    Up,
    /// Facing towards positive y.
    Down,
    /// No direction; connects in any direction.
    Undirected,
}

impl Orientation {
    /// The opposite direction; undirected stays undirected.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Undirected => Self::Undirected,
        }
    }

    /// Returns whether this is one of the four concrete directions.
    #[must_use]
    pub const fn is_directed(self) -> bool {
        !matches!(self, Self::Undirected)
    }
}

/// Which orientations a logic item type accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectionType {
    /// Only [`Orientation::Undirected`] is valid.
    Undirected,
    /// Any concrete direction is valid, undirected is not.
    Directed,
    /// Every orientation is valid.
    Any,
}

impl DirectionType {
    /// Returns whether `orientation` is valid for this policy.
    #[must_use]
    pub const fn accepts(self, orientation: Orientation) -> bool {
        match self {
            Self::Undirected => matches!(orientation, Orientation::Undirected),
            Self::Directed => orientation.is_directed(),
            Self::Any => true,
        }
    }
}

/// Returns whether two meeting connectors can connect.
///
/// Two directed connectors connect when they face each other; an undirected
/// connector connects to anything.
#[must_use]
pub const fn are_orientations_compatible(a: Orientation, b: Orientation) -> bool {
    match (a, b) {
        (Orientation::Undirected, _) | (_, Orientation::Undirected) => true,
        (Orientation::Right, Orientation::Left)
        | (Orientation::Left, Orientation::Right)
        | (Orientation::Up, Orientation::Down)
        | (Orientation::Down, Orientation::Up) => true,
        _ => false,
    }
}
