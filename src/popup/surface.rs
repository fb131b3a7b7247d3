use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::harvest::FieldRecord;
use crate::dom::{Document, ElementId};

/// Callback receiving the harvested record of a submitted form.
pub type SubmitCallback = Rc<dyn Fn(FieldRecord)>;

/// What activating a button does.
#[derive(Clone)]
pub enum ButtonAction {
    /// Hide the popup.
    Close,
    /// Hide the popup, harvest the form with `action_type` and pass the
    /// record to `on_submit`.
    Submit {
        action_type: String,
        on_submit: SubmitCallback,
    },
}

impl fmt::Debug for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => f.write_str("Close"),
            Self::Submit { action_type, .. } => f
                .debug_struct("Submit")
                .field("action_type", action_type)
                .finish_non_exhaustive(),
        }
    }
}

/// Button bindings keyed by element.
pub(crate) type Bindings = HashMap<ElementId, ButtonAction>;

/// The part of the popup a form-builder may populate.
///
/// Gives builders the document and the overlay root, and records the
/// actions of the buttons they create.
pub struct FormSurface<'a> {
    document: &'a mut Document,
    root: ElementId,
    bindings: &'a mut Bindings,
}

impl<'a> FormSurface<'a> {
    pub(crate) fn new(
        document: &'a mut Document,
        root: ElementId,
        bindings: &'a mut Bindings,
    ) -> Self {
        Self {
            document,
            root,
            bindings,
        }
    }

    /// The overlay root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.document
    }

    /// Binds `action` to the button `element`.
    pub fn bind(&mut self, element: ElementId, action: ButtonAction) {
        self.bindings.insert(element, action);
    }
}
