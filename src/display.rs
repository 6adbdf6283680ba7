//! Window-level display preferences and drag-to-move bookkeeping.

use crate::config::{DEFAULT_POSITION_X, DEFAULT_POSITION_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: DEFAULT_POSITION_X,
            y: DEFAULT_POSITION_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPreferences {
    pub large_display: bool,
    pub settings_open: bool,
    pub position: Position,
}

/// Tracks an in-progress drag as the offset between the pointer and the
/// window origin at grab time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    grab_offset: Option<(i32, i32)>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    pub fn begin(&mut self, pointer_x: i32, pointer_y: i32, position: Position) {
        self.grab_offset = Some((pointer_x - position.x, pointer_y - position.y));
    }

    /// New window position for the pointer, or `None` when not dragging.
    pub fn drag_to(&self, pointer_x: i32, pointer_y: i32) -> Option<Position> {
        self.grab_offset.map(|(dx, dy)| Position {
            x: pointer_x - dx,
            y: pointer_y - dy,
        })
    }

    pub fn end(&mut self) {
        self.grab_offset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_keeps_grab_offset() {
        let mut drag = DragState::default();
        assert_eq!(drag.drag_to(100, 100), None);

        drag.begin(30, 25, Position::default());
        assert!(drag.is_dragging());
        assert_eq!(drag.drag_to(130, 75), Some(Position { x: 120, y: 70 }));
        assert_eq!(drag.drag_to(0, 0), Some(Position { x: -10, y: -5 }));

        drag.end();
        assert!(!drag.is_dragging());
        assert_eq!(drag.drag_to(130, 75), None);
    }
}
