//! Summaries derived from gauge collections.

use crate::{
    collection::GaugeCollection,
    error::{Error, Result},
    name::MetricName,
    render::{MetricLines, MetricType},
};

/// One quantile line: φ and the computed φ-quantile of the source values.
#[derive(Debug, Clone, PartialEq)]
struct QuantileSample {
    phi: f64,
    value: f64,
}

/// A frozen summary snapshot, structurally parallel to
/// [`Histogram`](crate::histogram::Histogram) with quantiles in place of
/// bucket bounds.
#[derive(Debug, Clone)]
pub struct Summary {
    name: MetricName,
    help: String,
    quantiles: Vec<QuantileSample>,
    sum: f64,
    count: usize,
}

impl Summary {
    /// Derive a summary from `collection` for the given quantiles.
    ///
    /// Quantiles are sorted ascending; each line reports the φ-quantile of
    /// the source values, followed by `_sum` and `_count` aggregates. The
    /// metric name is the source name plus `suffix`, re-validated.
    ///
    /// # Errors
    ///
    /// [`Error::QuantileOutOfRange`] if any φ is outside `[0, 1]`;
    /// [`Error::EmptyCollection`] if the source has no samples;
    /// [`Error::InvalidMetricName`] if the suffixed name is invalid.
    pub fn from_gauges(
        collection: &GaugeCollection,
        quantiles: &[f64],
        suffix: &str,
    ) -> Result<Self> {
        for phi in quantiles {
            if !(0.0..=1.0).contains(phi) {
                return Err(Error::QuantileOutOfRange(*phi));
            }
        }

        let name = collection.metric_name().with_suffix(suffix)?;

        let mut sorted_quantiles = quantiles.to_vec();
        sorted_quantiles.sort_by(f64::total_cmp);

        let samples = sorted_quantiles
            .iter()
            .map(|phi| {
                Ok(QuantileSample {
                    phi: *phi,
                    value: collection.quantile(*phi)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            help: String::new(),
            quantiles: samples,
            sum: collection.sum_measured_values(),
            count: collection.len(),
        })
    }

    #[must_use]
    pub fn with_help(mut self, help: &str) -> Self {
        self.set_help(help);
        self
    }

    pub fn set_help(&mut self, help: &str) {
        self.help = help.trim().replace('\n', " ");
    }

    #[must_use]
    pub fn metric_name(&self) -> &MetricName {
        &self.name
    }
}

impl MetricLines for Summary {
    fn metric_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.quantiles.len() + 4);
        lines.push(format!("# TYPE {} {}", self.name, MetricType::Summary));
        if !self.help.is_empty() {
            lines.push(format!("# HELP {} {}", self.name, self.help));
        }
        for sample in &self.quantiles {
            lines.push(format!(
                "{}{{quantile=\"{}\"}} {:.6}",
                self.name, sample.phi, sample.value
            ));
        }
        lines.push(format!("{}_sum {:.6}", self.name, self.sum));
        lines.push(format!("{}_count {}", self.name, self.count));
        lines
    }
}
