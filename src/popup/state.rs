use std::fmt;

/// The kind of form a popup request asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormType {
    /// Add or edit a technical indicator.
    Indicators,
    /// Small toolbar shown for a selected annotation.
    AnnotationToolbar,
    /// Full annotation options form.
    AnnotationEdit,
    /// Annotation form in flag mode.
    Flag,
    /// Any other name; shows nothing but the close control.
    Other(String),
}

impl FormType {
    /// Parses a request name. Unknown names become [`FormType::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "indicators" => Self::Indicators,
            "annotation-toolbar" => Self::AnnotationToolbar,
            "annotation-edit" => Self::AnnotationEdit,
            "flag" => Self::Flag,
            other => Self::Other(other.to_string()),
        }
    }

    /// The request name this form type is parsed from.
    pub fn name(&self) -> &str {
        match self {
            Self::Indicators => "indicators",
            Self::AnnotationToolbar => "annotation-toolbar",
            Self::AnnotationEdit => "annotation-edit",
            Self::Flag => "flag",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for FormType {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Visibility and current form of the popup.
///
/// `current_form` is `None` whenever the popup is hidden or its content has
/// just been reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupState {
    pub(crate) visible: bool,
    pub(crate) current_form: Option<FormType>,
}

impl PopupState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current_form(&self) -> Option<&FormType> {
        self.current_form.as_ref()
    }
}
