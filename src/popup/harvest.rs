//! Field harvesting: scans a rendered form and builds a [`FieldRecord`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::markers::{
    DATA_NAME_ATTR, DATA_SERIES_ID_ATTR, SELECT_PREFIX, SERIES_SELECT_ID, VOLUME_FIELD,
    VOLUME_SELECT_ID,
};
use crate::dom::{Document, ElementId, Tag};

/// Values collected from a form at submit time.
///
/// Built fresh for every submission and handed to the caller's callback;
/// nothing keeps a reference to it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Requested operation, e.g. `add`, `edit` or `remove`.
    pub action_type: String,
    /// Value of the checked option of the series drop-down, or empty.
    pub linked_to: String,
    /// Id of the series being edited, from an input tagged with the series-id marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    /// Value of the untagged type input.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub indicator_type: Option<String>,
    /// Dotted parameter path to value.
    pub fields: BTreeMap<String, String>,
}

impl FieldRecord {
    /// The harvested volume series, if the form had a volume drop-down.
    pub fn volume_series_id(&self) -> Option<&str> {
        self.fields.get(VOLUME_FIELD).map(String::as_str)
    }

    /// Serializes the record as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action_type)?;
        if !self.linked_to.is_empty() {
            write!(f, " linked={}", self.linked_to)?;
        }
        if let Some(series) = &self.series_id {
            write!(f, " series={series}")?;
        }
        if let Some(kind) = &self.indicator_type {
            write!(f, " type={kind}")?;
        }
        for (name, value) in &self.fields {
            write!(f, " {name}={value}")?;
        }
        Ok(())
    }
}

/// Collects the values of every input and select below `root`.
///
/// Inputs tagged with the series-id marker fill [`FieldRecord::series_id`],
/// inputs tagged with a parameter path fill [`FieldRecord::fields`], and
/// untagged inputs fill [`FieldRecord::indicator_type`]. Generic selects are
/// stored under their identifier minus [`SELECT_PREFIX`]. Later controls
/// overwrite earlier ones on collision.
pub fn harvest(document: &Document, root: ElementId, action_type: &str) -> FieldRecord {
    let mut record = FieldRecord {
        action_type: action_type.to_string(),
        ..FieldRecord::default()
    };

    for id in document.descendants_with_tag(root, Tag::Input) {
        let Some(input) = document.get(id) else {
            continue;
        };
        if input.attribute(DATA_SERIES_ID_ATTR).is_some() {
            record.series_id = Some(input.value.clone());
        } else if let Some(path) = input.attribute(DATA_NAME_ATTR) {
            record.fields.insert(path.to_string(), input.value.clone());
        } else {
            record.indicator_type = Some(input.value.clone());
        }
    }

    let mut series_select = None;
    let mut volume_select = None;
    for id in document.descendants_with_tag(root, Tag::Select) {
        let Some(select) = document.get(id) else {
            continue;
        };
        match select.id.as_deref() {
            Some(SERIES_SELECT_ID) => {
                series_select.get_or_insert(id);
            }
            Some(VOLUME_SELECT_ID) => {
                volume_select.get_or_insert(id);
            }
            Some(element_id) => {
                let name = element_id.strip_prefix(SELECT_PREFIX).unwrap_or(element_id);
                record
                    .fields
                    .insert(name.to_string(), document.select_value(id));
            }
            None => {}
        }
    }

    record.linked_to = series_select
        .and_then(|select| checked_value(document, select))
        .unwrap_or_default();
    if let Some(volume) = volume_select.and_then(|select| checked_value(document, select)) {
        record.fields.insert(VOLUME_FIELD.to_string(), volume);
    }

    tracing::debug!(action = action_type, fields = record.fields.len(), "harvested form");
    record
}

fn checked_value(document: &Document, select: ElementId) -> Option<String> {
    document
        .checked_option(select)
        .and_then(|option| document.get(option))
        .map(|el| el.value.clone())
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::dom::Element;

    fn input(doc: &mut Document, parent: ElementId, path: Option<&str>, value: &str) -> ElementId {
        let mut el = Element::new(Tag::Input).with_value(value);
        if let Some(path) = path {
            el = el.with_attribute(DATA_NAME_ATTR, path);
        }
        doc.create_in(parent, el)
    }

    fn select(doc: &mut Document, parent: ElementId, id: &str, options: &[(&str, bool)]) {
        let select = doc.create_in(parent, Element::new(Tag::Select).with_id(id));
        for (value, checked) in options {
            let mut el = Element::new(Tag::Option).with_value(*value);
            el.checked = *checked;
            doc.create_in(select, el);
        }
    }

    fn form() -> (Document, ElementId) {
        let mut doc = Document::new();
        let root = doc.create_in(doc.body(), Element::new(Tag::Div));
        (doc, root)
    }

    #[test]
    fn tagged_inputs_fill_fields() {
        let (mut doc, root) = form();
        input(&mut doc, root, Some("p1"), "10");
        input(&mut doc, root, Some("p2"), "abc");
        let record = harvest(&doc, root, "add");
        assert_eq!(record.action_type, "add");
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields["p1"], "10");
        assert_eq!(record.fields["p2"], "abc");
        assert_eq!(record.indicator_type, None);
        assert_eq!(record.series_id, None);
    }

    #[test]
    fn last_bare_input_wins() {
        let (mut doc, root) = form();
        input(&mut doc, root, None, "sma");
        input(&mut doc, root, None, "ema");
        let record = harvest(&doc, root, "add");
        assert_eq!(record.indicator_type.as_deref(), Some("ema"));
    }

    #[test]
    fn duplicate_paths_keep_last_value() {
        let (mut doc, root) = form();
        input(&mut doc, root, Some("params.period"), "9");
        input(&mut doc, root, Some("params.period"), "21");
        let record = harvest(&doc, root, "edit");
        assert_eq!(record.fields["params.period"], "21");
    }

    #[test]
    fn series_id_marker_takes_precedence_over_path() {
        let (mut doc, root) = form();
        doc.create_in(
            root,
            Element::new(Tag::Input)
                .with_attribute(DATA_SERIES_ID_ATTR, "")
                .with_attribute(DATA_NAME_ATTR, "ignored")
                .with_value("sma-1"),
        );
        let record = harvest(&doc, root, "edit");
        assert_eq!(record.series_id.as_deref(), Some("sma-1"));
        assert!(record.fields.is_empty());
    }

    #[test]
    fn series_select_sets_linked_to() {
        let (mut doc, root) = form();
        select(
            &mut doc,
            root,
            SERIES_SELECT_ID,
            &[("series-0", false), ("series-1", true)],
        );
        let record = harvest(&doc, root, "add");
        assert_eq!(record.linked_to, "series-1");
        assert!(record.fields.is_empty());
    }

    #[test]
    fn missing_series_select_gives_empty_linked_to() {
        let (doc, root) = form();
        assert_eq!(harvest(&doc, root, "add").linked_to, "");
    }

    #[test]
    fn series_select_without_checked_option_gives_empty_linked_to() {
        let (mut doc, root) = form();
        select(&mut doc, root, SERIES_SELECT_ID, &[("series-0", false)]);
        assert_eq!(harvest(&doc, root, "add").linked_to, "");
    }

    #[test]
    fn volume_select_fills_volume_field() {
        let (mut doc, root) = form();
        select(
            &mut doc,
            root,
            VOLUME_SELECT_ID,
            &[("vol-1", false), ("vol-2", true)],
        );
        let record = harvest(&doc, root, "add");
        assert_eq!(record.fields[VOLUME_FIELD], "vol-2");
        assert_eq!(record.volume_series_id(), Some("vol-2"));
    }

    #[test]
    fn missing_volume_select_omits_key() {
        let (mut doc, root) = form();
        input(&mut doc, root, Some("params.period"), "14");
        let record = harvest(&doc, root, "add");
        assert!(!record.fields.contains_key(VOLUME_FIELD));
        assert_eq!(record.volume_series_id(), None);
    }

    #[test]
    fn generic_select_strips_prefix() {
        let (mut doc, root) = form();
        select(
            &mut doc,
            root,
            "chartpop-select-algorithm",
            &[("fast", false), ("slow", true)],
        );
        let record = harvest(&doc, root, "add");
        assert_eq!(record.fields["algorithm"], "slow");
    }

    #[test]
    fn nested_controls_are_found() {
        let (mut doc, root) = form();
        let group = doc.create_in(root, Element::new(Tag::Div));
        input(&mut doc, group, Some("typeOptions.line.stroke"), "red");
        let record = harvest(&doc, root, "edit");
        assert_eq!(record.fields["typeOptions.line.stroke"], "red");
    }

    #[test]
    fn controls_outside_root_are_ignored() {
        let (mut doc, root) = form();
        let body = doc.body();
        input(&mut doc, body, Some("outside"), "x");
        assert!(harvest(&doc, root, "add").fields.is_empty());
    }

    #[test]
    fn display_lists_everything() {
        let record = FieldRecord {
            action_type: "add".into(),
            linked_to: "aapl".into(),
            series_id: None,
            indicator_type: Some("sma".into()),
            fields: BTreeMap::from([("params.period".to_string(), "14".to_string())]),
        };
        insta::assert_snapshot!(record.to_string(), @"add linked=aapl type=sma params.period=14");
    }

    #[test]
    fn json_uses_wire_names() {
        let record = FieldRecord {
            action_type: "edit".into(),
            linked_to: String::new(),
            series_id: Some("sma-1".into()),
            indicator_type: None,
            fields: BTreeMap::new(),
        };
        let json = record.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"actionType":"edit","linkedTo":"","seriesId":"sma-1","fields":{}}"#
        );
    }

    #[quickcheck]
    fn bare_type_is_last_value(values: Vec<String>) -> bool {
        let (mut doc, root) = form();
        for value in &values {
            input(&mut doc, root, None, value);
        }
        harvest(&doc, root, "add").indicator_type == values.last().cloned()
    }

    #[quickcheck]
    fn every_tagged_path_is_harvested(values: Vec<(u8, String)>) -> bool {
        let (mut doc, root) = form();
        let mut expected = BTreeMap::new();
        for (n, value) in &values {
            let path = format!("params.p{n}");
            input(&mut doc, root, Some(&path), value);
            expected.insert(path, value.clone());
        }
        harvest(&doc, root, "add").fields == expected
    }
}
