// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Identifies one pointer or touch contact for the lifetime of a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// Kind of device behind a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or trackpad cursor.
    Mouse,
    /// Finger on a touch surface.
    Touch,
    /// Stylus.
    Pen,
}

/// Raw wheel delta as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollDelta {
    /// Already in screen pixels.
    Pixels(Vec2),
    /// In text lines.
    Lines(Vec2),
    /// In pages.
    Pages(Vec2),
}

impl ScrollDelta {
    /// Converts the delta to screen pixels using the given line and page
    /// sizes.
    #[must_use]
    pub fn to_pixels(self, line_size: Vec2, page_size: Vec2) -> Vec2 {
        match self {
            Self::Pixels(d) => d,
            Self::Lines(d) => Vec2::new(d.x * line_size.x, d.y * line_size.y),
            Self::Pages(d) => Vec2::new(d.x * page_size.x, d.y * page_size.y),
        }
    }
}

/// Screen-space pointer input in the order it was received.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    /// A contact went down.
    Down {
        /// Contact id.
        id: PointerId,
        /// Device kind.
        kind: PointerKind,
        /// Screen position.
        position: Point,
    },
    /// A contact moved.
    Move {
        /// Contact id.
        id: PointerId,
        /// Screen position.
        position: Point,
    },
    /// A contact was lifted.
    Up {
        /// Contact id.
        id: PointerId,
        /// Screen position.
        position: Point,
    },
    /// The platform took the contact away (left the window, system gesture).
    Cancel {
        /// Contact id.
        id: PointerId,
    },
    /// Wheel or trackpad scroll.
    Scroll {
        /// Screen position of the cursor.
        position: Point,
        /// Raw delta.
        delta: ScrollDelta,
    },
}

impl PointerInput {
    /// Shorthand for [`PointerInput::Down`].
    #[must_use]
    pub fn down(id: PointerId, kind: PointerKind, position: Point) -> Self {
        Self::Down { id, kind, position }
    }

    /// Shorthand for [`PointerInput::Move`].
    #[must_use]
    pub fn moved(id: PointerId, position: Point) -> Self {
        Self::Move { id, position }
    }

    /// Shorthand for [`PointerInput::Up`].
    #[must_use]
    pub fn up(id: PointerId, position: Point) -> Self {
        Self::Up { id, position }
    }

    /// Contact id, if the input belongs to a contact.
    #[must_use]
    pub fn id(&self) -> Option<PointerId> {
        match self {
            Self::Down { id, .. } | Self::Move { id, .. } | Self::Up { id, .. } | Self::Cancel { id } => {
                Some(*id)
            }
            Self::Scroll { .. } => None,
        }
    }

    /// Screen position carried by the input.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position, .. }
            | Self::Move { position, .. }
            | Self::Up { position, .. }
            | Self::Scroll { position, .. } => Some(*position),
            Self::Cancel { .. } => None,
        }
    }
}
