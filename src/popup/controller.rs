use ratatui::layout::Position;

use super::builders::{FormBuilder, FormBuilders, FormOptions, FormRequest};
use super::guard::PointerGuard;
use super::harvest::harvest;
use super::layout::PopupLayout;
use super::markers::{CLOSE_CLASS, ICON_ATTR, MODIFIER_CLASSES, POPUP_CLASS, TOOLBAR_CLASS};
use super::state::{FormType, PopupState};
use super::surface::{Bindings, ButtonAction, FormSurface, SubmitCallback};
use crate::config::PopupConfig;
use crate::dom::{Document, Element, ElementId, Tag, Trigger};
use crate::host::HostContext;

/// Owns the popup overlay: shows one form at a time, hides it, and routes
/// activations of its buttons.
pub struct PopupController {
    document: Document,
    root: ElementId,
    close: ElementId,
    state: PopupState,
    builders: FormBuilders,
    bindings: Bindings,
    guard: PointerGuard,
    layout: PopupLayout,
    width: u16,
    focus: Option<usize>,
    scroll: u16,
}

impl PopupController {
    /// Creates the hidden overlay under `parent` together with its persistent
    /// close control.
    pub fn new(mut document: Document, parent: ElementId, config: &PopupConfig) -> Self {
        let mut overlay = Element::new(Tag::Div).with_class(POPUP_CLASS);
        overlay.hidden = true;
        let root = document.create_in(parent, overlay);
        let close = document.create_in(
            root,
            Element::new(Tag::Button)
                .with_class(CLOSE_CLASS)
                .with_attribute(ICON_ATTR, config.icon_url("close.svg"))
                .with_text("Close")
                .with_listeners(&[Trigger::Click, Trigger::TouchStart]),
        );
        let mut bindings = Bindings::new();
        bindings.insert(close, ButtonAction::Close);
        Self {
            document,
            root,
            close,
            state: PopupState::default(),
            builders: FormBuilders::default(),
            bindings,
            guard: PointerGuard::new(),
            layout: PopupLayout::default(),
            width: config.width,
            focus: None,
            scroll: 0,
        }
    }

    /// Replaces the form-builders.
    pub fn with_builders(mut self, builders: FormBuilders) -> Self {
        self.builders = builders;
        self
    }

    /// Replaces the content with the form for `form_type` and shows it.
    ///
    /// Does nothing without a host context. Unknown form types show an empty
    /// popup with only the close control.
    pub fn show_form(
        &mut self,
        form_type: FormType,
        context: Option<&HostContext>,
        options: &FormOptions,
        on_submit: SubmitCallback,
    ) {
        let Some(context) = context else {
            tracing::debug!(form = %form_type, "no host context; popup request ignored");
            return;
        };
        self.reset_content();

        let builder: Option<(&dyn FormBuilder, bool)> = match &form_type {
            FormType::Indicators => Some((self.builders.indicators.as_ref(), false)),
            FormType::AnnotationToolbar => Some((self.builders.annotation_toolbar.as_ref(), false)),
            FormType::AnnotationEdit => Some((self.builders.annotation_form.as_ref(), false)),
            FormType::Flag => Some((self.builders.annotation_form.as_ref(), true)),
            FormType::Other(_) => None,
        };
        if let Some((builder, flag_mode)) = builder {
            let request = FormRequest {
                context,
                options,
                on_submit: &on_submit,
                flag_mode,
            };
            let mut surface = FormSurface::new(&mut self.document, self.root, &mut self.bindings);
            builder.build(&mut surface, &request);
        }

        if let Some(root) = self.document.get_mut(self.root) {
            if form_type == FormType::AnnotationToolbar {
                root.add_class(TOOLBAR_CLASS);
            }
            root.hidden = false;
        }
        tracing::debug!(form = %form_type, "popup shown");
        self.state.current_form = Some(form_type);
        self.state.visible = true;

        // Content is in place; pin the overlay to its natural height.
        let height = self.document.natural_height(self.root);
        if let Some(root) = self.document.get_mut(self.root) {
            root.height = Some(height);
        }
        self.focus = self
            .focusables()
            .iter()
            .position(|id| *id != self.close);
    }

    /// Hides the popup. Calling it while hidden changes nothing.
    pub fn close_popup(&mut self) {
        if self.state.visible {
            tracing::debug!("popup closed");
        }
        self.state.visible = false;
        self.state.current_form = None;
        if let Some(root) = self.document.get_mut(self.root) {
            root.hidden = true;
        }
        self.guard.set_area(None);
        self.layout.area = None;
        self.layout.hits.clear();
    }

    /// Wipes the form content while keeping the close control, and drops
    /// modifier classes and the pinned height.
    pub fn reset_content(&mut self) {
        self.document.detach(self.close);
        self.document.clear_children(self.root);
        let document = &self.document;
        self.bindings.retain(|id, _| document.contains(*id));
        if let Some(root) = self.document.get_mut(self.root) {
            for class in MODIFIER_CLASSES {
                root.remove_class(class);
            }
            root.height = None;
        }
        self.document.append(self.root, self.close);
        self.state.current_form = None;
        self.layout.hits.clear();
        self.focus = None;
        self.scroll = 0;
    }

    /// Runs the action bound to `element` if it listens for `trigger`.
    ///
    /// Returns `true` if an action ran. Submit actions close the popup
    /// before harvesting and invoking the callback.
    pub fn activate(&mut self, element: ElementId, trigger: Trigger) -> bool {
        if !self.state.visible {
            return false;
        }
        let listens = self
            .document
            .get(element)
            .is_some_and(|el| !el.hidden && el.listens_for(trigger));
        if !listens {
            return false;
        }
        let Some(action) = self.bindings.get(&element).cloned() else {
            return false;
        };
        match action {
            ButtonAction::Close => self.close_popup(),
            ButtonAction::Submit {
                action_type,
                on_submit,
            } => {
                self.close_popup();
                let record = harvest(&self.document, self.root, &action_type);
                tracing::debug!(%record, "popup submitted");
                on_submit(record);
            }
        }
        true
    }

    // --- Pointer input ---

    /// Returns `true` if a pointer event at `position` belongs to the popup.
    pub fn originated(&self, position: Position) -> bool {
        self.state.visible && self.guard.originated(position)
    }

    /// Handles a pointer-down. Returns `true` if the popup consumed it; the
    /// host must then not forward it to the chart.
    pub fn pointer_down(&mut self, position: Position) -> bool {
        if !self.state.visible || !self.guard.pointer_down(position) {
            return false;
        }
        if let Some(element) = self.layout.element_at(position) {
            self.focus_element(element);
            self.activate(element, Trigger::TouchStart);
        }
        true
    }

    /// Handles a click. Returns `true` if it follows a pointer-down on the
    /// popup and must be swallowed.
    pub fn click(&mut self, position: Position) -> bool {
        if !self.guard.take_cancel_click() {
            return false;
        }
        if let Some(element) = self.layout.element_at(position) {
            self.activate(element, Trigger::Click);
        }
        true
    }

    /// Clears the pending click guard; call once per event-loop turn.
    pub fn tick(&mut self) {
        self.guard.tick();
    }

    /// Records where the overlay was drawn.
    pub fn set_layout(&mut self, layout: PopupLayout) {
        self.guard
            .set_area(if self.state.visible { layout.area } else { None });
        self.layout = layout;
    }

    // --- Keyboard focus ---

    /// Visible focusable controls in document order.
    pub fn focusables(&self) -> Vec<ElementId> {
        self.document
            .descendants(self.root)
            .into_iter()
            .filter(|id| {
                self.document
                    .get(*id)
                    .is_some_and(|el| el.tag.is_focusable() && !el.hidden)
            })
            .collect()
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focus
            .and_then(|index| self.focusables().get(index).copied())
    }

    /// Moves focus to the next control, wrapping around.
    pub fn focus_next(&mut self) {
        let len = self.focusables().len();
        if len == 0 {
            return;
        }
        self.focus = Some(self.focus.map_or(0, |index| (index + 1) % len));
    }

    /// Moves focus to the previous control, wrapping around.
    pub fn focus_prev(&mut self) {
        let len = self.focusables().len();
        if len == 0 {
            return;
        }
        self.focus = Some(self.focus.map_or(len - 1, |index| (index + len - 1) % len));
    }

    fn focus_element(&mut self, element: ElementId) {
        if let Some(index) = self.focusables().iter().position(|id| *id == element) {
            self.focus = Some(index);
        }
    }

    /// Appends `ch` to the focused input.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(input) = self.focused_with_tag(Tag::Input)
            && let Some(el) = self.document.get_mut(input)
        {
            el.value.push(ch);
        }
    }

    /// Removes the last character of the focused input.
    pub fn delete_char(&mut self) {
        if let Some(input) = self.focused_with_tag(Tag::Input)
            && let Some(el) = self.document.get_mut(input)
        {
            el.value.pop();
        }
    }

    /// Checks the next or previous option of the focused drop-down.
    pub fn cycle_option(&mut self, forward: bool) {
        if let Some(select) = self.focused_with_tag(Tag::Select) {
            self.document.cycle_option(select, forward);
        }
    }

    /// Activates the focused control as if clicked.
    pub fn activate_focused(&mut self) -> bool {
        match self.focused() {
            Some(element) => self.activate(element, Trigger::Click),
            None => false,
        }
    }

    fn focused_with_tag(&self, tag: Tag) -> Option<ElementId> {
        self.focused()
            .filter(|id| self.document.get(*id).is_some_and(|el| el.tag == tag))
    }

    /// Scrolls the content by `delta` rows, clamped to the content height.
    pub fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.document.natural_height(self.root));
        let next = (i32::from(self.scroll) + delta).clamp(0, max);
        self.scroll = u16::try_from(next).unwrap_or(0);
    }

    // --- Accessors ---

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The overlay root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn close_control(&self) -> ElementId {
        self.close
    }

    /// Fixed height of the overlay, set after each [`show_form`](Self::show_form).
    pub fn height(&self) -> Option<u16> {
        self.document.get(self.root).and_then(|el| el.height)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn layout(&self) -> &PopupLayout {
        &self.layout
    }

    pub fn guard(&self) -> &PointerGuard {
        &self.guard
    }
}
