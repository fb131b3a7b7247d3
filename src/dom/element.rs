use std::collections::BTreeMap;

/// Handle to an element inside a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(super) usize);

/// Kind of element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Generic container; lays its children out vertically.
    Div,
    /// Section title inside a form.
    Heading,
    /// Caption shown above an input.
    Label,
    /// Inline text.
    Span,
    /// Single-line text input.
    Input,
    /// Drop-down; its choices are [`Tag::Option`] children.
    Select,
    /// One choice of a [`Tag::Select`].
    Option,
    /// Activatable control.
    Button,
}

impl Tag {
    /// Returns `true` for elements that can take keyboard focus.
    pub fn is_focusable(self) -> bool {
        matches!(self, Self::Input | Self::Select | Self::Button)
    }
}

/// Interaction event kinds an element can listen for.
///
/// `Click` and `TouchStart` are equivalent triggers for buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    TouchStart,
}

/// A single node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    /// Unique identifier within a form, if any.
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Display text (headings, labels, buttons, option captions).
    pub text: String,
    /// Current value of inputs and options.
    pub value: String,
    /// Whether an [`Tag::Option`] is the checked choice of its select.
    pub checked: bool,
    /// Display suppressed.
    pub hidden: bool,
    /// Fixed height in rows; `None` means natural height.
    pub height: Option<u16>,
    /// Triggers this element reacts to.
    pub listeners: Vec<Trigger>,
    pub(super) parent: Option<ElementId>,
    pub(super) children: Vec<ElementId>,
}

impl Element {
    /// Creates an empty element with the given tag.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            hidden: false,
            height: None,
            listeners: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_listeners(mut self, triggers: &[Trigger]) -> Self {
        self.listeners = triggers.to_vec();
        self
    }

    /// Returns the attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds a class unless already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Returns `true` if the element reacts to `trigger`.
    pub fn listens_for(&self, trigger: Trigger) -> bool {
        self.listeners.contains(&trigger)
    }
}
