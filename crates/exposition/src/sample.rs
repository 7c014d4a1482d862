//! Gauge and counter samples.
//!
//! A sample is one observed value plus labels and an optional unix
//! timestamp (whole seconds). Values render with fixed 6-decimal-place
//! notation regardless of magnitude.

use {
    crate::{
        error::{Error, Result},
        label::{Label, LabelSet},
    },
    std::fmt::Write as _,
};

fn sample_tail(labels: &LabelSet, value: f64, timestamp: Option<i64>) -> String {
    let mut tail = format!("{} {value:.6}", labels.render());
    if let Some(ts) = timestamp {
        let _ = write!(tail, " {ts}");
    }
    tail
}

/// A single gauge observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    value: f64,
    timestamp: Option<i64>,
    labels: LabelSet,
}

impl Gauge {
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteValue`] for NaN or infinite values.
    pub fn from_value(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::NonFiniteValue(value));
        }
        Ok(Self {
            value,
            timestamp: None,
            labels: LabelSet::new(),
        })
    }

    /// # Errors
    ///
    /// Returns [`Error::NonFiniteValue`] for NaN or infinite values.
    pub fn from_value_and_timestamp(value: f64, timestamp: i64) -> Result<Self> {
        let mut gauge = Self::from_value(value)?;
        gauge.timestamp = Some(timestamp);
        Ok(gauge)
    }

    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.add(label);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        for label in labels {
            self.labels.add(label);
        }
        self
    }

    #[must_use]
    pub fn with_label_set(mut self, set: LabelSet) -> Self {
        self.labels.merge(set);
        self
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// The sample line body, to be prefixed with the metric name:
    /// `{labels} <value> [<timestamp>]`.
    #[must_use]
    pub fn sample_string(&self) -> String {
        sample_tail(&self.labels, self.value, self.timestamp)
    }
}

/// A single counter observation.
///
/// Counters start at 0 and only go up: negative values are rejected at
/// construction. Samples are immutable once built, so this is a
/// construction-time check, not a running invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    value: f64,
    timestamp: Option<i64>,
    labels: LabelSet,
}

impl Counter {
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteValue`] for NaN or infinite values and
    /// [`Error::NegativeCounterValue`] for anything below zero.
    pub fn from_value(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::NonFiniteValue(value));
        }
        if value < 0.0 {
            return Err(Error::NegativeCounterValue(value));
        }
        Ok(Self {
            value,
            timestamp: None,
            labels: LabelSet::new(),
        })
    }

    /// # Errors
    ///
    /// Same as [`Counter::from_value`].
    pub fn from_value_and_timestamp(value: f64, timestamp: i64) -> Result<Self> {
        let mut counter = Self::from_value(value)?;
        counter.timestamp = Some(timestamp);
        Ok(counter)
    }

    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.add(label);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        for label in labels {
            self.labels.add(label);
        }
        self
    }

    #[must_use]
    pub fn with_label_set(mut self, set: LabelSet) -> Self {
        self.labels.merge(set);
        self
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// The sample line body. Counter samples carry the `_total` name suffix
    /// required by the exposition format:
    /// `_total{labels} <value> [<timestamp>]`.
    #[must_use]
    pub fn sample_string(&self) -> String {
        format!("_total{}", sample_tail(&self.labels, self.value, self.timestamp))
    }
}
