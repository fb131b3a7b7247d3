use serde_json::Value;

use super::{FormBuilder, FormRequest};
use crate::popup::factory::{add_submit_button, add_text};
use crate::popup::surface::FormSurface;

/// Compact toolbar for a selected annotation: its name plus remove and
/// edit buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationToolbar;

impl FormBuilder for AnnotationToolbar {
    fn build(&self, surface: &mut FormSurface<'_>, request: &FormRequest<'_>) {
        let root = surface.root();
        let name = ["langKey", "type"]
            .iter()
            .find_map(|key| request.options.get(key).and_then(Value::as_str))
            .unwrap_or("Annotation");
        add_text(surface, root, name);
        add_submit_button(surface, root, "Remove", "remove", request.on_submit);
        add_submit_button(surface, root, "Edit", "edit", request.on_submit);
    }
}
