//! Validated metric name identifiers.

use {
    crate::error::{Error, Result},
    once_cell::sync::Lazy,
    regex::Regex,
    std::fmt,
};

#[allow(clippy::expect_used)]
static METRIC_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-zA-Z_:][a-zA-Z0-9_:]*$").expect("hard-coded pattern"));

/// A validated metric name.
///
/// Input is trimmed before validation; the stored form is the trimmed
/// string. Equality and hashing use that normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricName(String);

impl MetricName {
    /// Create a metric name from a raw string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMetricName`] if the trimmed input is empty or
    /// does not match `[a-zA-Z_:][a-zA-Z0-9_:]*`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if !METRIC_NAME.is_match(trimmed) {
            return Err(Error::InvalidMetricName(raw.as_ref().to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Produce a new metric name by appending `suffix`.
    ///
    /// The concatenated result is re-validated, so a suffix that would
    /// produce an invalid identifier (a stray `-`, whitespace) is rejected
    /// instead of silently passed through.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMetricName`] for the concatenated string.
    pub fn with_suffix(&self, suffix: &str) -> Result<Self> {
        Self::new(format!("{}{suffix}", self.0))
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names_and_trims() {
        for raw in ["unit_test_metric", "  spaced_name  ", "name:with:colons", "_leading", "UPPER"] {
            let name = MetricName::new(raw).unwrap();
            assert_eq!(name.as_str(), raw.trim());
        }
    }

    #[test]
    fn rejects_invalid_names() {
        for raw in ["", "   ", "\t\n", "with-dash", "with space", "1leading_digit", "dollar$"] {
            assert!(
                matches!(MetricName::new(raw), Err(Error::InvalidMetricName(_))),
                "expected rejection for {raw:?}"
            );
        }
    }

    #[test]
    fn equality_is_by_normalized_string() {
        let a = MetricName::new(" metric ").unwrap();
        let b = MetricName::new("metric").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn with_suffix_concatenates() {
        let name = MetricName::new("unit_test_metric").unwrap();
        let derived = name.with_suffix("_histogram").unwrap();
        assert_eq!(derived.as_str(), "unit_test_metric_histogram");
    }

    #[test]
    fn with_suffix_revalidates() {
        let name = MetricName::new("unit_test_metric").unwrap();
        assert!(name.with_suffix("-broken").is_err());
    }
}
