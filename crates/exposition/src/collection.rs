//! Append-only sample collections sharing one metric name.

use {
    crate::{
        error::{Error, Result},
        name::MetricName,
        render::{MetricLines, MetricType},
        sample::{Counter, Gauge},
    },
    std::cell::RefCell,
};

fn normalize_help(help: &str) -> String {
    help.trim().replace('\n', " ")
}

fn header_lines(lines: &mut Vec<String>, name: &MetricName, kind: MetricType, help: &str) {
    lines.push(format!("# TYPE {name} {kind}"));
    if !help.is_empty() {
        lines.push(format!("# HELP {name} {help}"));
    }
}

/// An ordered, append-only accumulation of gauge samples.
///
/// Beyond rendering, a gauge collection answers the aggregate queries that
/// histogram and summary derivation needs: value sum, count of values below
/// a bound, and quantile lookup. The bound/quantile queries share one
/// lazily-built sorted copy of the values, invalidated by `add`.
///
/// Not thread-safe: callers sharing a collection across threads must
/// serialize `add` against any query or render call.
#[derive(Debug, Clone)]
pub struct GaugeCollection {
    name: MetricName,
    help: String,
    gauges: Vec<Gauge>,
    sorted: RefCell<Option<Vec<f64>>>,
}

impl GaugeCollection {
    #[must_use]
    pub fn new(name: MetricName) -> Self {
        Self {
            name,
            help: String::new(),
            gauges: Vec::new(),
            sorted: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn from_gauges(name: MetricName, gauges: impl IntoIterator<Item = Gauge>) -> Self {
        let mut collection = Self::new(name);
        collection.extend(gauges);
        collection
    }

    /// Set the help text, returning the collection. Help is trimmed and
    /// internal newlines collapse to spaces so it stays a single line.
    #[must_use]
    pub fn with_help(mut self, help: &str) -> Self {
        self.set_help(help);
        self
    }

    pub fn set_help(&mut self, help: &str) {
        self.help = normalize_help(help);
    }

    pub fn add(&mut self, gauge: Gauge) {
        self.sorted.replace(None);
        self.gauges.push(gauge);
    }

    pub fn extend(&mut self, gauges: impl IntoIterator<Item = Gauge>) {
        for gauge in gauges {
            self.add(gauge);
        }
    }

    #[must_use]
    pub fn metric_name(&self) -> &MetricName {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Sum of all measured values. Floating addition order is insertion
    /// order; ULP-level nondeterminism across differently-ordered inputs is
    /// acceptable.
    #[must_use]
    pub fn sum_measured_values(&self) -> f64 {
        // Explicit 0.0 identity: std's float `Sum` starts from -0.0, which
        // would render an empty collection's sum as "-0.000000".
        self.gauges.iter().map(Gauge::value).fold(0.0, |acc, value| acc + value)
    }

    /// Exact count of stored values `<= bound`, ties included.
    #[must_use]
    pub fn count_values_less_or_equal(&self, bound: f64) -> usize {
        self.with_sorted(|sorted| sorted.partition_point(|value| *value <= bound))
    }

    /// The φ-quantile of the stored values.
    ///
    /// Index rule over the ascending-sorted values: `round(n·φ) - 1` with
    /// round-half-up, clamped to `[0, n-1]`.
    ///
    /// # Errors
    ///
    /// [`Error::QuantileOutOfRange`] unless `0 <= phi <= 1`;
    /// [`Error::EmptyCollection`] when no samples have been added.
    pub fn quantile(&self, phi: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&phi) {
            return Err(Error::QuantileOutOfRange(phi));
        }
        if self.gauges.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.with_sorted(|sorted| {
            let n = sorted.len();
            let rank = (n as f64 * phi).round() as isize - 1;
            let index = rank.clamp(0, n as isize - 1) as usize;
            sorted[index]
        }))
    }

    fn with_sorted<T>(&self, f: impl FnOnce(&[f64]) -> T) -> T {
        let mut cache = self.sorted.borrow_mut();
        let sorted = cache.get_or_insert_with(|| {
            let mut values: Vec<f64> = self.gauges.iter().map(Gauge::value).collect();
            values.sort_by(f64::total_cmp);
            values
        });
        f(sorted)
    }
}

impl MetricLines for GaugeCollection {
    fn metric_lines(&self) -> Vec<String> {
        if self.gauges.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.gauges.len() + 2);
        header_lines(&mut lines, &self.name, MetricType::Gauge, &self.help);
        for gauge in &self.gauges {
            lines.push(format!("{}{}", self.name, gauge.sample_string()));
        }
        lines
    }
}

/// An ordered, append-only accumulation of counter samples.
#[derive(Debug, Clone)]
pub struct CounterCollection {
    name: MetricName,
    help: String,
    counters: Vec<Counter>,
}

impl CounterCollection {
    #[must_use]
    pub fn new(name: MetricName) -> Self {
        Self {
            name,
            help: String::new(),
            counters: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_counters(name: MetricName, counters: impl IntoIterator<Item = Counter>) -> Self {
        let mut collection = Self::new(name);
        collection.extend(counters);
        collection
    }

    #[must_use]
    pub fn with_help(mut self, help: &str) -> Self {
        self.set_help(help);
        self
    }

    pub fn set_help(&mut self, help: &str) {
        self.help = normalize_help(help);
    }

    pub fn add(&mut self, counter: Counter) {
        self.counters.push(counter);
    }

    pub fn extend(&mut self, counters: impl IntoIterator<Item = Counter>) {
        for counter in counters {
            self.add(counter);
        }
    }

    #[must_use]
    pub fn metric_name(&self) -> &MetricName {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl MetricLines for CounterCollection {
    fn metric_lines(&self) -> Vec<String> {
        if self.counters.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.counters.len() + 2);
        header_lines(&mut lines, &self.name, MetricType::Counter, &self.help);
        for counter in &self.counters {
            lines.push(format!("{}{}", self.name, counter.sample_string()));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::label::Label};

    fn name(raw: &str) -> MetricName {
        MetricName::new(raw).unwrap()
    }

    fn gauges(values: &[f64]) -> GaugeCollection {
        GaugeCollection::from_gauges(
            name("unit_test_metric"),
            values.iter().map(|v| Gauge::from_value(*v).unwrap()),
        )
    }

    #[test]
    fn counts_appended_samples() {
        let mut collection = GaugeCollection::new(name("unit_test_metric"));
        assert_eq!(collection.len(), 0);

        collection.add(Gauge::from_value(12.3).unwrap());
        collection.add(Gauge::from_value(45.6).unwrap());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn renders_type_help_and_samples_in_order() {
        let timestamp = 1_545_253_913;
        let collection = GaugeCollection::from_gauges(
            name("unit_test_metric"),
            [
                Gauge::from_value_and_timestamp(78.9, timestamp).unwrap(),
                Gauge::from_value(12.3)
                    .unwrap()
                    .with_label(Label::new("unit", "test").unwrap()),
                Gauge::from_value(45.6).unwrap(),
            ],
        )
        .with_help("This is a test metric with timestamp");

        let expected = format!(
            "# TYPE unit_test_metric gauge\n\
             # HELP unit_test_metric This is a test metric with timestamp\n\
             unit_test_metric 78.900000 {timestamp}\n\
             unit_test_metric{{unit=\"test\"}} 12.300000\n\
             unit_test_metric 45.600000"
        );
        assert_eq!(collection.metrics_string(), expected);
    }

    #[test]
    fn help_line_is_omitted_when_unset() {
        let collection = gauges(&[12.3]);
        assert_eq!(
            collection.metrics_string(),
            "# TYPE unit_test_metric gauge\nunit_test_metric 12.300000"
        );
    }

    #[test]
    fn help_is_normalized_to_a_single_line() {
        let collection = gauges(&[1.0]).with_help("  multi\nline help  ");
        assert!(
            collection
                .metric_lines()
                .contains(&"# HELP unit_test_metric multi line help".to_owned())
        );
    }

    #[test]
    fn empty_collection_renders_empty_string() {
        let collection = GaugeCollection::new(name("unit_test_metric"));
        assert_eq!(collection.metrics_string(), "");
        assert!(collection.metric_lines().is_empty());
    }

    #[test]
    fn metric_lines_are_restartable() {
        let collection = gauges(&[1.0, 2.0]);
        assert_eq!(collection.metric_lines(), collection.metric_lines());
    }

    #[test]
    fn sums_measured_values() {
        let collection = gauges(&[1.0, 1.2, 2.0, 2.5, 2.9, 3.1, 4.0, 4.4, 5.0, 9.9]);
        assert!((collection.sum_measured_values() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn counts_values_less_or_equal_including_ties() {
        let collection = gauges(&[12.3, 45.6, 78.9]);
        assert_eq!(collection.count_values_less_or_equal(12.2), 0);
        assert_eq!(collection.count_values_less_or_equal(12.3), 1);
        assert_eq!(collection.count_values_less_or_equal(78.9), 3);
        assert_eq!(collection.count_values_less_or_equal(1000.0), 3);
    }

    #[test]
    fn count_on_empty_collection_is_zero() {
        let collection = GaugeCollection::new(name("unit_test_metric"));
        assert_eq!(collection.count_values_less_or_equal(1.0), 0);
    }

    #[test]
    fn median_uses_round_half_up_index() {
        let collection = gauges(&[1.0, 1.2, 2.0, 2.5, 2.9, 3.1, 4.0, 4.4, 5.0, 9.9]);
        assert_eq!(collection.quantile(0.5).unwrap(), 2.9);
    }

    #[test]
    fn quantile_extremes_are_clamped() {
        let collection = gauges(&[3.0, 1.0, 2.0]);
        assert_eq!(collection.quantile(0.0).unwrap(), 1.0);
        assert_eq!(collection.quantile(1.0).unwrap(), 3.0);
    }

    #[test]
    fn quantile_rejects_out_of_range_phi() {
        let collection = gauges(&[1.0]);
        assert!(matches!(collection.quantile(-0.1), Err(Error::QuantileOutOfRange(_))));
        assert!(matches!(collection.quantile(1.1), Err(Error::QuantileOutOfRange(_))));
    }

    #[test]
    fn quantile_on_empty_collection_is_an_error() {
        let collection = GaugeCollection::new(name("unit_test_metric"));
        assert!(matches!(collection.quantile(0.5), Err(Error::EmptyCollection)));
    }

    #[test]
    fn sorted_cache_is_invalidated_by_add() {
        let mut collection = gauges(&[1.0, 5.0]);
        assert_eq!(collection.count_values_less_or_equal(4.0), 1);

        collection.add(Gauge::from_value(2.0).unwrap());
        assert_eq!(collection.count_values_less_or_equal(4.0), 2);
        assert_eq!(collection.quantile(0.0).unwrap(), 1.0);
    }

    #[test]
    fn counter_collection_renders_total_samples() {
        let collection = CounterCollection::from_counters(
            name("unit_test_metric"),
            [
                Counter::from_value(1.0).unwrap(),
                Counter::from_value(2.5)
                    .unwrap()
                    .with_label(Label::new("unit", "test").unwrap()),
            ],
        )
        .with_help("Counts things");

        assert_eq!(
            collection.metrics_string(),
            "# TYPE unit_test_metric counter\n\
             # HELP unit_test_metric Counts things\n\
             unit_test_metric_total 1.000000\n\
             unit_test_metric_total{unit=\"test\"} 2.500000"
        );
    }

    #[test]
    fn empty_counter_collection_renders_empty_string() {
        let collection = CounterCollection::new(name("unit_test_metric"));
        assert_eq!(collection.metrics_string(), "");
    }
}
