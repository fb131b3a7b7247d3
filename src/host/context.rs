use serde::{Deserialize, Serialize};

/// A series of the host chart, as offered in the popup's drop-downs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRef {
    pub id: String,
    pub name: String,
    /// Whether the series holds traded volume rather than prices.
    #[serde(default)]
    pub volume: bool,
}

impl SeriesRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            volume: false,
        }
    }

    pub fn volume(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            volume: true,
            ..Self::new(id, name)
        }
    }
}

/// What the chart exposes to form-builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    pub series: Vec<SeriesRef>,
}

impl HostContext {
    pub fn new(series: Vec<SeriesRef>) -> Self {
        Self { series }
    }

    /// `(id, name)` pairs of the price series.
    pub fn price_choices(&self) -> Vec<(String, String)> {
        self.choices(|s| !s.volume)
    }

    /// `(id, name)` pairs of the volume series, or of every series when the
    /// chart has no dedicated volume series.
    pub fn volume_choices(&self) -> Vec<(String, String)> {
        let volume = self.choices(|s| s.volume);
        if volume.is_empty() {
            self.choices(|_| true)
        } else {
            volume
        }
    }

    fn choices(&self, keep: impl Fn(&SeriesRef) -> bool) -> Vec<(String, String)> {
        self.series
            .iter()
            .filter(|s| keep(s))
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect()
    }
}
