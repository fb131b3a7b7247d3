use serde_json::Value;

use super::{FormBuilder, FormRequest, flatten_options, scalar_text};
use crate::dom::{Element, Tag};
use crate::popup::factory::{add_heading, add_input, add_submit_button};
use crate::popup::surface::FormSurface;

/// Keys that describe the annotation rather than editable options.
const SKIPPED_KEYS: &[&str] = &["type", "langKey", "events", "id", "controlPointOptions"];

/// Options form for an annotation, or for a flag in flag mode.
///
/// Every leaf of the options object becomes an input tagged with its dotted
/// path; nested objects and arrays get their own headed group.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationForm;

impl FormBuilder for AnnotationForm {
    fn build(&self, surface: &mut FormSurface<'_>, request: &FormRequest<'_>) {
        let Some(options) = request.options.as_object() else {
            tracing::warn!("annotation form options are not an object");
            return;
        };
        let root = surface.root();
        let kind = options
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("annotation");

        let title = if request.flag_mode {
            "Flag".to_string()
        } else {
            let name = options
                .get("langKey")
                .and_then(Value::as_str)
                .unwrap_or(kind);
            format!("Edit {name}")
        };
        add_heading(surface, root, &title);

        for (key, value) in options {
            if SKIPPED_KEYS.contains(&key.as_str()) {
                continue;
            }
            match value {
                Value::Object(_) | Value::Array(_) => {
                    let group = surface
                        .document_mut()
                        .create_in(root, Element::new(Tag::Div));
                    add_heading(surface, group, key);
                    let mut leaves = Vec::new();
                    flatten_options(key, value, &mut leaves);
                    for (path, text) in leaves {
                        add_input(surface, group, &path, kind, &text, None);
                    }
                }
                scalar => {
                    add_input(surface, root, key, kind, &scalar_text(scalar), None);
                }
            }
        }

        if request.flag_mode {
            add_submit_button(surface, root, "Add", "add", request.on_submit);
        } else {
            add_submit_button(surface, root, "Save", "edit", request.on_submit);
        }
    }
}
