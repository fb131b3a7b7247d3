//! Element factory: labelled inputs, drop-downs and buttons tagged the way
//! the harvester expects.

use std::sync::LazyLock;

use regex::Regex;

use super::markers::{DATA_NAME_ATTR, DATA_SERIES_ID_ATTR, PREFIX, SELECT_PREFIX};
use super::surface::{ButtonAction, FormSurface, SubmitCallback};
use crate::dom::{Element, ElementId, Tag, Trigger};

/// Triggers submit buttons listen for by default.
pub const SUBMIT_TRIGGERS: &[Trigger] = &[Trigger::Click, Trigger::TouchStart];

static DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("valid hardcoded regex"));

/// Builds the identifier of a parameter input.
///
/// `name_override` replaces the trailing segment of `option_path`.
pub fn input_id(option_path: &str, indicator_type: &str, name_override: Option<&str>) -> String {
    let name = name_override
        .or_else(|| option_path.rsplit('.').next())
        .unwrap_or(option_path);
    format!("{PREFIX}{indicator_type}-{name}")
}

/// Adds an input tagged with `option_path`, preceded by a label unless the
/// generated identifier contains a digit (indexed fields stay unlabelled).
pub fn add_input(
    surface: &mut FormSurface<'_>,
    parent: ElementId,
    option_path: &str,
    indicator_type: &str,
    value: &str,
    name_override: Option<&str>,
) -> ElementId {
    let id = input_id(option_path, indicator_type, name_override);
    let document = surface.document_mut();
    if !DIGIT_RE.is_match(&id) {
        let caption = name_override
            .or_else(|| option_path.rsplit('.').next())
            .unwrap_or(option_path);
        document.create_in(
            parent,
            Element::new(Tag::Label)
                .with_attribute("for", id.clone())
                .with_text(caption),
        );
    }
    document.create_in(
        parent,
        Element::new(Tag::Input)
            .with_id(id)
            .with_attribute(DATA_NAME_ATTR, option_path)
            .with_value(value),
    )
}

/// Adds an input carrying the id of the series being edited.
pub fn add_series_id_input(
    surface: &mut FormSurface<'_>,
    parent: ElementId,
    series_id: &str,
) -> ElementId {
    surface.document_mut().create_in(
        parent,
        Element::new(Tag::Input)
            .with_id(format!("{PREFIX}series-id"))
            .with_attribute(DATA_SERIES_ID_ATTR, series_id)
            .with_value(series_id),
    )
}

/// Adds a labelled drop-down with identifier `chartpop-select-{name}`.
///
/// `choices` are `(value, caption)` pairs. The choice matching `checked` is
/// checked, falling back to the first one.
pub fn add_select(
    surface: &mut FormSurface<'_>,
    parent: ElementId,
    name: &str,
    label: &str,
    choices: &[(String, String)],
    checked: Option<&str>,
) -> ElementId {
    let id = format!("{SELECT_PREFIX}{name}");
    let document = surface.document_mut();
    document.create_in(
        parent,
        Element::new(Tag::Label)
            .with_attribute("for", id.clone())
            .with_text(label),
    );
    let select = document.create_in(parent, Element::new(Tag::Select).with_id(id));
    let checked_index = checked
        .and_then(|wanted| choices.iter().position(|(value, _)| value == wanted))
        .unwrap_or(0);
    for (index, (value, caption)) in choices.iter().enumerate() {
        let mut option = Element::new(Tag::Option)
            .with_value(value.clone())
            .with_text(caption.clone());
        option.checked = index == checked_index;
        document.create_in(select, option);
    }
    select
}

pub fn add_heading(surface: &mut FormSurface<'_>, parent: ElementId, text: &str) -> ElementId {
    surface
        .document_mut()
        .create_in(parent, Element::new(Tag::Heading).with_text(text))
}

pub fn add_text(surface: &mut FormSurface<'_>, parent: ElementId, text: &str) -> ElementId {
    surface
        .document_mut()
        .create_in(parent, Element::new(Tag::Span).with_text(text))
}

/// Adds a button listening for `triggers` and bound to `action`.
pub fn add_button(
    surface: &mut FormSurface<'_>,
    parent: ElementId,
    label: &str,
    triggers: &[Trigger],
    action: ButtonAction,
) -> ElementId {
    let button = surface.document_mut().create_in(
        parent,
        Element::new(Tag::Button)
            .with_class(format!("{PREFIX}button"))
            .with_text(label)
            .with_listeners(triggers),
    );
    surface.bind(button, action);
    button
}

/// Adds a button that closes the popup, harvests the form as `action_type`
/// and forwards the record to `on_submit`.
pub fn add_submit_button(
    surface: &mut FormSurface<'_>,
    parent: ElementId,
    label: &str,
    action_type: &str,
    on_submit: &SubmitCallback,
) -> ElementId {
    add_button(
        surface,
        parent,
        label,
        SUBMIT_TRIGGERS,
        ButtonAction::Submit {
            action_type: action_type.to_string(),
            on_submit: on_submit.clone(),
        },
    )
}
