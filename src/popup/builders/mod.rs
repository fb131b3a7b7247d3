//! Form-builders that populate the popup for each form type.

mod annotation;
mod indicator;
mod toolbar;

use serde_json::Value;

pub use annotation::AnnotationForm;
pub use indicator::IndicatorForm;
pub use toolbar::AnnotationToolbar;

use super::surface::{FormSurface, SubmitCallback};
use crate::host::HostContext;

/// Options passed through from the popup request to its builder.
pub type FormOptions = Value;

/// Everything a builder receives for one request.
pub struct FormRequest<'a> {
    pub context: &'a HostContext,
    pub options: &'a FormOptions,
    pub on_submit: &'a SubmitCallback,
    /// Annotation form only: build the flag variant.
    pub flag_mode: bool,
}

/// Populates the popup root with the controls of one form.
///
/// Implementations tag inputs through [`crate::popup::factory`] so the
/// harvester can read them back, and wire at least one submit button.
pub trait FormBuilder {
    fn build(&self, surface: &mut FormSurface<'_>, request: &FormRequest<'_>);
}

/// The three builders a controller dispatches to.
pub struct FormBuilders {
    pub indicators: Box<dyn FormBuilder>,
    pub annotation_toolbar: Box<dyn FormBuilder>,
    pub annotation_form: Box<dyn FormBuilder>,
}

impl Default for FormBuilders {
    fn default() -> Self {
        Self {
            indicators: Box::new(IndicatorForm),
            annotation_toolbar: Box::new(AnnotationToolbar),
            annotation_form: Box::new(AnnotationForm),
        }
    }
}

/// Flattens `value` into `(dotted path, text)` leaves below `prefix`.
/// Array elements are addressed by index.
pub(crate) fn flatten_options(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_options(&join_path(prefix, key), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_options(&join_path(prefix, &index.to_string()), child, out);
            }
        }
        scalar => out.push((prefix.to_string(), scalar_text(scalar))),
    }
}

/// Text shown in an input for a scalar option.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Runs `builder` against a fresh document and returns what it produced.
#[cfg(test)]
pub(crate) fn build_for_test(
    builder: &dyn FormBuilder,
    context: &HostContext,
    options: &FormOptions,
    flag_mode: bool,
) -> (
    crate::dom::Document,
    super::surface::Bindings,
    crate::dom::ElementId,
) {
    let mut document = crate::dom::Document::new();
    let mut bindings = super::surface::Bindings::new();
    let root = document.body();
    let on_submit: SubmitCallback = std::rc::Rc::new(|_| {});
    let request = FormRequest {
        context,
        options,
        on_submit: &on_submit,
        flag_mode,
    };
    builder.build(
        &mut FormSurface::new(&mut document, root, &mut bindings),
        &request,
    );
    (document, bindings, root)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flatten_nested_objects_and_arrays() {
        let mut out = Vec::new();
        flatten_options(
            "typeOptions",
            &json!({"line": {"stroke": "red", "width": 2}, "points": [1, null]}),
            &mut out,
        );
        assert_eq!(
            out,
            vec![
                ("typeOptions.line.stroke".to_string(), "red".to_string()),
                ("typeOptions.line.width".to_string(), "2".to_string()),
                ("typeOptions.points.0".to_string(), "1".to_string()),
                ("typeOptions.points.1".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn flatten_scalar_at_empty_prefix() {
        let mut out = Vec::new();
        flatten_options("", &json!(true), &mut out);
        assert_eq!(out, vec![(String::new(), "true".to_string())]);
    }
}
