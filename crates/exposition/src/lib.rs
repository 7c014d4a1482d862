//! In-memory metric samples and OpenMetrics text exposition rendering.
//!
//! This crate builds metric samples (counters, gauges, histograms, summaries
//! with labels and timestamps) and renders them into the line-oriented text
//! exposition format consumed by a metrics scraper:
//!
//! ```text
//! # TYPE unit_test_metric gauge
//! # HELP unit_test_metric Some explanation
//! unit_test_metric{unit="test"} 12.300000
//! ```
//!
//! Raw observations accumulate in a [`GaugeCollection`] or
//! [`CounterCollection`]; a [`Histogram`] or [`Summary`] can then be derived
//! from a gauge collection snapshot. Everything that renders implements
//! [`MetricLines`], which produces a restartable, finite sequence of lines.
//!
//! Transport is out of scope: the embedding application takes the rendered
//! string and decides how to ship it (HTTP response, file, stdout). The core
//! performs no I/O and assumes single-threaded access per collection.

pub mod collection;
pub mod error;
pub mod histogram;
pub mod label;
pub mod name;
pub mod registry;
pub mod render;
pub mod sample;
pub mod summary;

pub use {
    collection::{CounterCollection, GaugeCollection},
    error::{Error, Result},
    histogram::Histogram,
    label::{Label, LabelSet},
    name::MetricName,
    registry::Registry,
    render::{MetricLines, MetricType, concat},
    sample::{Counter, Gauge},
    summary::Summary,
};
