use std::fmt;

use super::context::HostContext;
use crate::popup::{FormOptions, SubmitCallback};

/// Events the chart emits towards its popup.
#[derive(Clone)]
pub enum HostEvent {
    /// Show the form named `form_type`.
    ShowPopup {
        form_type: String,
        context: Option<HostContext>,
        options: FormOptions,
        on_submit: SubmitCallback,
    },
    /// Hide the popup.
    ClosePopup,
}

impl HostEvent {
    pub fn show_popup(
        form_type: impl Into<String>,
        context: Option<HostContext>,
        options: FormOptions,
        on_submit: SubmitCallback,
    ) -> Self {
        Self::ShowPopup {
            form_type: form_type.into(),
            context,
            options,
            on_submit,
        }
    }
}

impl fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowPopup {
                form_type,
                context,
                options,
                ..
            } => f
                .debug_struct("ShowPopup")
                .field("form_type", form_type)
                .field("context", context)
                .field("options", options)
                .finish_non_exhaustive(),
            Self::ClosePopup => f.write_str("ClosePopup"),
        }
    }
}
