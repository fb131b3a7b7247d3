//! Fixed identifiers, class names and marker attributes shared by the
//! form-builders and the harvester.
//!
//! Any builder must tag its controls with these exact names or the harvester
//! will misclassify them.

/// Prefix of every identifier and class the popup generates.
pub const PREFIX: &str = "chartpop-";

/// Attribute holding the dotted parameter path of an input.
pub const DATA_NAME_ATTR: &str = "chartpop-data-name";

/// Attribute marking an input that carries the edited series' id.
pub const DATA_SERIES_ID_ATTR: &str = "chartpop-data-series-id";

/// Prefix stripped from a select's identifier to obtain its parameter name.
pub const SELECT_PREFIX: &str = "chartpop-select-";

/// Reserved identifier of the linked-series drop-down.
pub const SERIES_SELECT_ID: &str = "chartpop-select-series";

/// Reserved identifier of the volume-series drop-down.
pub const VOLUME_SELECT_ID: &str = "chartpop-select-volume";

/// Field name the volume drop-down is harvested under.
pub const VOLUME_FIELD: &str = "params.volumeSeriesID";

/// Class of the overlay root.
pub const POPUP_CLASS: &str = "chartpop-popup";

/// Class of the persistent close control.
pub const CLOSE_CLASS: &str = "chartpop-popup-close";

/// Modifier class added while the annotation toolbar is shown.
pub const TOOLBAR_CLASS: &str = "chartpop-annotation-toolbar";

/// Class of the untagged indicator-type input.
pub const INDICATOR_TYPE_CLASS: &str = "chartpop-indicator-type";

/// Attribute holding a control's icon URL.
pub const ICON_ATTR: &str = "icon";

/// Modifier classes removed whenever the content is reset.
pub(crate) const MODIFIER_CLASSES: &[&str] = &[TOOLBAR_CLASS];
