//! Application-owned registry of typed collections.

use {
    crate::{
        collection::{CounterCollection, GaugeCollection},
        error::{Error, Result},
        name::MetricName,
        render::{MetricLines, MetricType},
    },
    tracing::debug,
};

#[derive(Debug)]
enum Registered {
    Gauges(GaugeCollection),
    Counters(CounterCollection),
}

impl Registered {
    fn metric_name(&self) -> &MetricName {
        match self {
            Self::Gauges(collection) => collection.metric_name(),
            Self::Counters(collection) => collection.metric_name(),
        }
    }

    fn kind(&self) -> MetricType {
        match self {
            Self::Gauges(_) => MetricType::Gauge,
            Self::Counters(_) => MetricType::Counter,
        }
    }
}

/// A registry of collections keyed by metric name.
///
/// Owned by the embedding application; there is no ambient global state.
/// Collections are created on first request and kept in registration
/// order, which is also the rendering order. Requesting a name under a
/// different metric kind than it was first registered with is a typed
/// error, not a panic.
#[derive(Debug, Default)]
pub struct Registry {
    collections: Vec<Registered>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the gauge collection registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetricTypeMismatch`] if `name` is already bound to
    /// a counter collection.
    pub fn gauges(&mut self, name: MetricName) -> Result<&mut GaugeCollection> {
        let index = match self.position(&name) {
            Some(index) => index,
            None => {
                debug!(metric = %name, "registering gauge collection");
                self.collections
                    .push(Registered::Gauges(GaugeCollection::new(name.clone())));
                self.collections.len() - 1
            }
        };
        match &mut self.collections[index] {
            Registered::Gauges(collection) => Ok(collection),
            other => Err(Error::MetricTypeMismatch {
                name: name.as_str().to_owned(),
                registered: other.kind(),
                requested: MetricType::Gauge,
            }),
        }
    }

    /// Get or create the counter collection registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetricTypeMismatch`] if `name` is already bound to
    /// a gauge collection.
    pub fn counters(&mut self, name: MetricName) -> Result<&mut CounterCollection> {
        let index = match self.position(&name) {
            Some(index) => index,
            None => {
                debug!(metric = %name, "registering counter collection");
                self.collections
                    .push(Registered::Counters(CounterCollection::new(name.clone())));
                self.collections.len() - 1
            }
        };
        match &mut self.collections[index] {
            Registered::Counters(collection) => Ok(collection),
            other => Err(Error::MetricTypeMismatch {
                name: name.as_str().to_owned(),
                registered: other.kind(),
                requested: MetricType::Counter,
            }),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    fn position(&self, name: &MetricName) -> Option<usize> {
        self.collections
            .iter()
            .position(|registered| registered.metric_name() == name)
    }
}

impl MetricLines for Registry {
    fn metric_lines(&self) -> Vec<String> {
        self.collections
            .iter()
            .flat_map(|registered| match registered {
                Registered::Gauges(collection) => collection.metric_lines(),
                Registered::Counters(collection) => collection.metric_lines(),
            })
            .collect()
    }
}
