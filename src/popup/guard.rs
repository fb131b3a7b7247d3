use ratatui::layout::{Position, Rect};

/// Keeps pointer interactions that start on the popup away from the chart.
///
/// The host pipeline asks [`PointerGuard::originated`] before feeding a
/// pointer event to its gesture recognizer. A pointer-down on the overlay
/// also arms a "cancel next click" flag so the click that follows is not
/// attributed to the chart; [`PointerGuard::tick`] disarms it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerGuard {
    area: Option<Rect>,
    cancel_click: bool,
}

impl PointerGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records where the overlay was last drawn; `None` while hidden.
    pub fn set_area(&mut self, area: Option<Rect>) {
        self.area = area;
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Returns `true` if `position` lies on the overlay.
    pub fn originated(&self, position: Position) -> bool {
        self.area.is_some_and(|area| area.contains(position))
    }

    /// Handles a pointer-down. Returns `true` when the event belongs to the
    /// popup and must not propagate.
    pub fn pointer_down(&mut self, position: Position) -> bool {
        if self.originated(position) {
            self.cancel_click = true;
            true
        } else {
            false
        }
    }

    /// Returns whether a click should be swallowed, disarming the flag.
    pub fn take_cancel_click(&mut self) -> bool {
        std::mem::take(&mut self.cancel_click)
    }

    pub fn cancel_click_pending(&self) -> bool {
        self.cancel_click
    }

    /// Deferred clear, run once per event-loop turn.
    pub fn tick(&mut self) {
        self.cancel_click = false;
    }
}
