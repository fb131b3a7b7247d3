use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::context::HostContext;
use super::event::HostEvent;
use crate::config::PopupConfig;
use crate::dom::Document;
use crate::popup::{FormType, PopupController};

/// Who handled a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRoute {
    /// The popup consumed it; the chart never saw it.
    Popup,
    /// The chart's gesture recognizer handled it.
    Chart,
    /// Nobody was interested.
    Ignored,
}

/// A gesture recognized on the chart itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartGesture {
    Click(Position),
    Drag { from: Position, to: Position },
}

/// The chart side of the popup: receives [`HostEvent`]s and owns the popup
/// controller, created on the first show request.
pub struct ChartHost {
    config: PopupConfig,
    context: HostContext,
    popup: Option<PopupController>,
    drag_origin: Option<Position>,
    gestures: Vec<ChartGesture>,
}

impl ChartHost {
    pub fn new(config: PopupConfig, context: HostContext) -> Self {
        Self {
            config,
            context,
            popup: None,
            drag_origin: None,
            gestures: Vec::new(),
        }
    }

    /// Applies one event from the chart's event bus.
    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::ShowPopup {
                form_type,
                context,
                options,
                on_submit,
            } => {
                let config = &self.config;
                let popup = self.popup.get_or_insert_with(|| {
                    tracing::debug!("creating popup controller");
                    let document = Document::new();
                    let body = document.body();
                    PopupController::new(document, body, config)
                });
                popup.show_form(
                    FormType::from_name(&form_type),
                    context.as_ref(),
                    &options,
                    on_submit,
                );
            }
            HostEvent::ClosePopup => {
                if let Some(popup) = self.popup.as_mut() {
                    popup.close_popup();
                }
            }
        }
    }

    /// Routes a mouse event to the popup or to the chart's gesture
    /// recognizer.
    ///
    /// Pointer-downs the popup originated, and the click that follows them,
    /// never reach the chart.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> PointerRoute {
        let position = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(popup) = self.popup.as_mut()
                    && popup.pointer_down(position)
                {
                    return PointerRoute::Popup;
                }
                self.drag_origin = Some(position);
                PointerRoute::Chart
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(popup) = self.popup.as_mut()
                    && popup.click(position)
                {
                    self.drag_origin = None;
                    return PointerRoute::Popup;
                }
                let Some(from) = self.drag_origin.take() else {
                    return PointerRoute::Ignored;
                };
                let gesture = if from == position {
                    ChartGesture::Click(position)
                } else {
                    ChartGesture::Drag { from, to: position }
                };
                tracing::trace!(?gesture, "chart gesture");
                self.gestures.push(gesture);
                PointerRoute::Chart
            }
            _ => PointerRoute::Ignored,
        }
    }

    /// End of an event-loop turn.
    pub fn tick(&mut self) {
        if let Some(popup) = self.popup.as_mut() {
            popup.tick();
        }
    }

    pub fn popup(&self) -> Option<&PopupController> {
        self.popup.as_ref()
    }

    pub fn popup_mut(&mut self) -> Option<&mut PopupController> {
        self.popup.as_mut()
    }

    /// Returns `true` if the popup exists and is shown.
    pub fn popup_visible(&self) -> bool {
        self.popup.as_ref().is_some_and(PopupController::is_visible)
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Gestures the chart has recognized so far.
    pub fn gestures(&self) -> &[ChartGesture] {
        &self.gestures
    }

    /// Takes the recognized gestures, leaving none behind.
    pub fn take_gestures(&mut self) -> Vec<ChartGesture> {
        std::mem::take(&mut self.gestures)
    }
}
