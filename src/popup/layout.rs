use ratatui::layout::{Position, Rect};

use crate::dom::ElementId;

/// Where the overlay and each of its visible controls were last drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupLayout {
    /// Outer area of the overlay.
    pub area: Option<Rect>,
    /// Drawn area of each control, in drawing order.
    pub hits: Vec<(ElementId, Rect)>,
}

impl PopupLayout {
    /// The topmost control drawn at `position`.
    pub fn element_at(&self, position: Position) -> Option<ElementId> {
        self.hits
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(position))
            .map(|(id, _)| *id)
    }

    /// Drawn area of `element`, if it is on screen.
    pub fn rect_of(&self, element: ElementId) -> Option<Rect> {
        self.hits
            .iter()
            .find(|(id, _)| *id == element)
            .map(|(_, rect)| *rect)
    }
}
