use serde::Deserialize;
use serde_json::{Map, Value};

use super::{FormBuilder, FormRequest, flatten_options};
use crate::dom::{Element, Tag};
use crate::popup::factory::{
    add_heading, add_input, add_select, add_series_id_input, add_submit_button, add_text,
};
use crate::popup::markers::{INDICATOR_TYPE_CLASS, VOLUME_FIELD};
use crate::popup::surface::FormSurface;

/// Options understood by [`IndicatorForm`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndicatorFormOptions {
    #[serde(default)]
    indicators: Vec<IndicatorDef>,
    /// Type of the indicator to show; defaults to the first one.
    #[serde(default)]
    selected: Option<String>,
    /// Present when editing an existing indicator series.
    #[serde(default)]
    series_id: Option<String>,
    /// Series the indicator is currently linked to.
    #[serde(default)]
    linked_to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndicatorDef {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    params: Map<String, Value>,
}

/// Add/edit form for a technical indicator.
///
/// Expects options shaped like
/// `{"indicators": [{"type": "sma", "name": "SMA", "params": {"period": 14}}],
///   "selected": "sma", "seriesId": "sma-1", "linkedTo": "aapl"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorForm;

impl FormBuilder for IndicatorForm {
    fn build(&self, surface: &mut FormSurface<'_>, request: &FormRequest<'_>) {
        let options = match IndicatorFormOptions::deserialize(request.options) {
            Ok(options) => options,
            Err(err) => {
                tracing::warn!(%err, "malformed indicator form options");
                return;
            }
        };
        let root = surface.root();

        let selected = options
            .selected
            .as_deref()
            .and_then(|kind| options.indicators.iter().find(|i| i.kind == kind))
            .or_else(|| options.indicators.first());
        let Some(indicator) = selected else {
            add_text(surface, root, "No indicators available");
            return;
        };

        let editing = options.series_id.is_some();
        let title = indicator.name.as_deref().unwrap_or(&indicator.kind);
        let heading = if editing {
            format!("Edit {title}")
        } else {
            format!("Add {title}")
        };
        add_heading(surface, root, &heading);

        // Carries the type into the record without being shown.
        let kind = surface.document_mut().create_in(
            root,
            Element::new(Tag::Input)
                .with_class(INDICATOR_TYPE_CLASS)
                .with_value(indicator.kind.clone()),
        );
        if let Some(el) = surface.document_mut().get_mut(kind) {
            el.hidden = true;
        }
        if let Some(series_id) = &options.series_id {
            add_series_id_input(surface, root, series_id);
        }

        let series = request.context.price_choices();
        if !series.is_empty() {
            add_select(
                surface,
                root,
                "series",
                "Series",
                &series,
                options.linked_to.as_deref(),
            );
        }

        let mut params = Vec::new();
        flatten_options("params", &Value::Object(indicator.params.clone()), &mut params);
        for (path, value) in params {
            if path == VOLUME_FIELD {
                let volume = request.context.volume_choices();
                add_select(surface, root, "volume", "Volume series", &volume, Some(&value));
            } else {
                add_input(surface, root, &path, &indicator.kind, &value, None);
            }
        }

        if editing {
            add_submit_button(surface, root, "Save", "edit", request.on_submit);
            add_submit_button(surface, root, "Remove", "remove", request.on_submit);
        } else {
            add_submit_button(surface, root, "Add", "add", request.on_submit);
        }
    }
}
