// File: crates/pulse-core/src/series.rs
// Summary: Input data model for line series and bar categories, plus id validation.
// Notes:
// - Visibility (`hidden`) belongs to the host; renderers only read it.
// - Points are positional: index `i` of every series in a chart is the same bucket.

use std::collections::HashSet;

use crate::error::{ChartError, Result};
use crate::types::Rgba;

/// Ids drawn with the heavy stroke in line charts.
pub const AGGREGATE_IDS: [&str; 2] = ["overall", "growth"];

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// Display label only; never parsed.
    pub date: String,
    pub value: f64,
}

impl Point {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self { date: date.into(), value }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub id: String,
    pub label: String,
    pub color: Rgba,
    pub data: Vec<Point>,
    pub hidden: bool,
}

impl Series {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: Rgba) -> Self {
        Self { id: id.into(), label: label.into(), color, data: Vec::new(), hidden: false }
    }

    /// Construct from a hex color string, rejecting malformed colors up front.
    pub fn try_new(id: impl Into<String>, label: impl Into<String>, color_hex: &str) -> Result<Self> {
        Ok(Self::new(id, label, Rgba::from_hex(color_hex)?))
    }

    pub fn with_data(mut self, data: Vec<Point>) -> Self {
        self.data = data;
        self
    }

    /// Convenience: build points from `(date, value)` pairs.
    pub fn with_points<'a, I>(self, points: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let data = points.into_iter().map(|(d, v)| Point::new(d, v)).collect();
        self.with_data(data)
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Aggregate series ("overall"/"growth") are stroked heavier than per-item series.
    pub fn is_aggregate(&self) -> bool {
        AGGREGATE_IDS.contains(&self.id.as_str())
    }

    /// Value at a bucket index; `None` past the end of a shorter series
    /// or where the value is NaN or infinite.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.data.get(index).map(|p| p.value).filter(|v| v.is_finite())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDatum {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub color: Rgba,
    pub hidden: bool,
}

impl CategoryDatum {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: f64, color: Rgba) -> Self {
        Self { id: id.into(), label: label.into(), value, color, hidden: false }
    }

    pub fn try_new(id: impl Into<String>, label: impl Into<String>, value: f64, color_hex: &str) -> Result<Self> {
        Ok(Self::new(id, label, value, Rgba::from_hex(color_hex)?))
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Series that take part in scaling and drawing.
pub fn active_series(datasets: &[Series]) -> impl Iterator<Item = &Series> {
    datasets.iter().filter(|s| !s.hidden)
}

/// Categories that take part in scaling and drawing.
pub fn active_categories(data: &[CategoryDatum]) -> impl Iterator<Item = &CategoryDatum> {
    data.iter().filter(|d| !d.hidden)
}

/// Fail on the first id that appears twice.
pub fn validate_ids<'a, I>(ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ChartError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_at_past_end_is_none() {
        let s = Series::new("a", "A", Rgba::rgb(0, 0, 0)).with_points([("d1", 1.0)]);
        assert_eq!(s.value_at(0), Some(1.0));
        assert_eq!(s.value_at(1), None);
    }

    #[test]
    fn non_finite_values_read_as_missing() {
        let s = Series::new("a", "A", Rgba::rgb(0, 0, 0)).with_points([("d1", f64::NAN), ("d2", f64::INFINITY), ("d3", 2.0)]);
        assert_eq!(s.value_at(0), None);
        assert_eq!(s.value_at(1), None);
        assert_eq!(s.value_at(2), Some(2.0));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let err = validate_ids(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, ChartError::DuplicateId("a".into()));
        assert!(validate_ids(["a", "b"]).is_ok());
    }

    #[test]
    fn aggregate_ids() {
        let c = Rgba::rgb(0, 0, 0);
        assert!(Series::new("overall", "Overall", c).is_aggregate());
        assert!(Series::new("growth", "Growth", c).is_aggregate());
        assert!(!Series::new("proj-1", "Proj", c).is_aggregate());
    }
}
