//! Drag sessions for moving the overlay.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event for unified mouse/touch handling.
///
/// Touch input reports the first touch point as `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
}

/// State of one press-move-release interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        /// Pointer position minus the offset at press time. Every move is
        /// measured from here, so a dropped or repeated move event cannot
        /// accumulate error.
        origin: Vec2,
    },
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    /// Start dragging if the press landed on the overlay.
    ///
    /// Pressing while already dragging re-anchors the session to the new
    /// pointer. Returns whether a drag is now in progress.
    pub fn press(&mut self, pointer: Point, current_offset: Vec2, hit: bool) -> bool {
        if hit {
            *self = DragSession::Dragging { origin: pointer.to_vec2() - current_offset };
        }
        self.is_dragging()
    }

    /// Absolute offset for the pointer's new position, or `None` when idle.
    pub fn drag(&self, pointer: Point) -> Option<Vec2> {
        match self {
            DragSession::Dragging { origin } => Some(pointer.to_vec2() - *origin),
            DragSession::Idle => None,
        }
    }

    /// End the session. The last offset stays as the baseline for the next
    /// press.
    pub fn release(&mut self) {
        *self = DragSession::Idle;
    }
}
