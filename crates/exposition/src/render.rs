//! Line rendering contracts.

use {
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Kind of metric, as it appears in `# TYPE` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter => f.write_str("counter"),
            Self::Gauge => f.write_str("gauge"),
            Self::Histogram => f.write_str("histogram"),
            Self::Summary => f.write_str("summary"),
        }
    }
}

/// Renders a metric group as ordered exposition lines.
///
/// `metric_lines` is recomputed from current state on every call, so it can
/// be invoked repeatedly (it is not a single-use cursor). An empty group
/// produces no lines at all: no `# TYPE` header is emitted for a metric
/// with no data.
pub trait MetricLines {
    fn metric_lines(&self) -> Vec<String>;

    /// All lines joined with `\n`, without a trailing newline. Empty groups
    /// render as `""`.
    fn metrics_string(&self) -> String {
        self.metric_lines().join("\n")
    }
}

/// Concatenate several rendered groups with a single `\n` between them and
/// no trailing newline. Empty groups are skipped entirely.
#[must_use]
pub fn concat<'a>(groups: impl IntoIterator<Item = &'a dyn MetricLines>) -> String {
    let rendered: Vec<String> = groups
        .into_iter()
        .map(|group| group.metrics_string())
        .filter(|group| !group.is_empty())
        .collect();
    rendered.join("\n")
}
