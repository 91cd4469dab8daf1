use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A graph: global parameters plus a list of data series.
///
/// Serializes as a single JSON object with the parameters at the top level
/// and the series under `"series"`. A parameter named `series` would collide
/// with that key and must not be used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(flatten)]
    pub parameters: BTreeMap<String, Value>,

    #[serde(default)]
    pub series: Vec<Series>,
}

impl Graph {
    /// Creates a graph with no parameters and no series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a global parameter, replacing any previous value.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_parameter(key, value);
        self
    }

    /// Sets a global parameter, replacing any previous value.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Appends a data series.
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Appends a data series.
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }
}

/// One data series: string style parameters plus `[x, y]` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(flatten)]
    pub parameters: BTreeMap<String, String>,

    pub data: Vec<[f64; 2]>,
}

impl Series {
    /// Creates a series with the given points and no parameters.
    #[must_use]
    pub fn new(data: Vec<[f64; 2]>) -> Self {
        Self {
            parameters: BTreeMap::new(),
            data,
        }
    }

    /// Creates a series from parallel `xs` and `ys`, truncated to the
    /// shorter of the two.
    #[must_use]
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self::new(xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect())
    }

    /// Sets a style parameter such as `label` or `style`.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}
