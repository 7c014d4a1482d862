//! Histograms derived from gauge collections.

use crate::{
    collection::GaugeCollection,
    error::{Error, Result},
    name::MetricName,
    render::{MetricLines, MetricType},
};

/// One `_bucket` line: an upper bound label and the cumulative count of
/// source values at or below it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bucket {
    le: String,
    count: usize,
}

/// A frozen histogram snapshot.
///
/// Built once from a [`GaugeCollection`] plus a set of bucket bounds; it
/// copies everything it needs, so later mutation of the source collection
/// does not affect it.
#[derive(Debug, Clone)]
pub struct Histogram {
    name: MetricName,
    help: String,
    buckets: Vec<Bucket>,
    sum: f64,
    count: usize,
}

impl Histogram {
    /// Derive a histogram from `collection` with the given bucket bounds.
    ///
    /// Bounds are sorted ascending; duplicates are kept and produce
    /// duplicate bucket lines. Each bucket count is cumulative (total
    /// observations `<=` that bound, not a per-bucket delta). A trailing
    /// `+Inf` bucket carries the total sample count, followed by `_sum` and
    /// `_count` aggregates. The metric name is the source name plus
    /// `suffix`, re-validated.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBounds`] if `bounds` is empty or contains a
    /// non-finite value; [`Error::InvalidMetricName`] if the suffixed name
    /// is not a valid identifier.
    pub fn from_gauges(
        collection: &GaugeCollection,
        bounds: &[f64],
        suffix: &str,
    ) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::InvalidBounds("at least one bucket bound is required"));
        }
        if bounds.iter().any(|bound| !bound.is_finite()) {
            return Err(Error::InvalidBounds("bucket bounds must be finite"));
        }

        let name = collection.metric_name().with_suffix(suffix)?;

        let mut sorted_bounds = bounds.to_vec();
        sorted_bounds.sort_by(f64::total_cmp);

        let mut buckets: Vec<Bucket> = sorted_bounds
            .iter()
            .map(|bound| Bucket {
                le: format_bound(*bound),
                count: collection.count_values_less_or_equal(*bound),
            })
            .collect();
        buckets.push(Bucket {
            le: "+Inf".to_owned(),
            count: collection.len(),
        });

        Ok(Self {
            name,
            help: String::new(),
            buckets,
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

impl MetricLines for Histogram {
    fn metric_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.buckets.len() + 4);
        lines.push(format!("# TYPE {} {}", self.name, MetricType::Histogram));
        if !self.help.is_empty() {
            lines.push(format!("# HELP {} {}", self.name, self.help));
        }
        for bucket in &self.buckets {
            lines.push(format!(
                "{}_bucket{{le=\"{}\"}} {}",
                self.name, bucket.le, bucket.count
            ));
        }
        lines.push(format!("{}_sum {:.6}", self.name, self.sum));
        lines.push(format!("{}_count {}", self.name, self.count));
        lines
    }
}

/// Render a finite bound with the fewest decimal places that round-trip
/// it, floored at one decimal place: `30` -> `"30.0"`, `78.9` -> `"78.9"`.
fn format_bound(bound: f64) -> String {
    let shortest = format!("{bound}");
    let decimals = shortest
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
        .max(1);
    format!("{bound:.decimals$}")
}
