use serde::Deserialize;
use thiserror::Error;

use crate::fit::{AreaAccessors, Rect};

/// Parsed chart input: one or more named series sharing the same sample
/// positions. When `x` is omitted the sample index is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub series: Vec<SeriesInput>,
    #[serde(default)]
    pub x: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesInput {
    pub name: String,
    pub values: Vec<f32>,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart parse failed: {0}")]
    Parse(String),
    #[error("chart needs at least one series")]
    NoSeries,
    #[error("series {name:?} needs at least two values, got {len}")]
    TooFewValues { name: String, len: usize },
    #[error("series {name:?} has {len} values but the chart has {expected} sample positions")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },
    #[error("x position at index {index} is not finite")]
    NonFiniteX { index: usize },
    #[error("x positions must be strictly increasing (index {index})")]
    UnsortedX { index: usize },
    #[error("series {name:?} has a negative or non-finite value at index {index}")]
    InvalidValue { name: String, index: usize },
}

/// Parses chart input as JSON, falling back to JSON5 for hand-written files
/// with comments or trailing commas.
pub fn parse_chart(source: &str) -> Result<Chart, ChartError> {
    let chart: Chart = match serde_json::from_str(source) {
        Ok(chart) => chart,
        Err(_) => json5::from_str(source).map_err(|err| ChartError::Parse(err.to_string()))?,
    };
    validate(&chart)?;
    Ok(chart)
}

fn validate(chart: &Chart) -> Result<(), ChartError> {
    if chart.series.is_empty() {
        return Err(ChartError::NoSeries);
    }
    let expected = match &chart.x {
        Some(x) => x.len(),
        None => chart.series[0].values.len(),
    };
    if let Some(x) = &chart.x {
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(ChartError::NonFiniteX { index });
        }
        for (index, pair) in x.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ChartError::UnsortedX { index: index + 1 });
            }
        }
    }
    for series in &chart.series {
        if series.values.len() != expected {
            return Err(ChartError::LengthMismatch {
                name: series.name.clone(),
                len: series.values.len(),
                expected,
            });
        }
        if series.values.len() < 2 {
            return Err(ChartError::TooFewValues {
                name: series.name.clone(),
                len: series.values.len(),
            });
        }
        if let Some(index) = series
            .values
            .iter()
            .position(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ChartError::InvalidValue {
                name: series.name.clone(),
                index,
            });
        }
    }
    Ok(())
}

/// One sample of a stacked band in plot coordinates. `y0` is the lower
/// boundary and `y1` the upper one, so `y0 >= y1` with the y axis pointing
/// down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x: f32,
    pub y0: f32,
    pub y1: f32,
}

#[derive(Debug, Clone)]
pub struct Band {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

/// Boundary accessors for [`SeriesPoint`] slices, ready to hand to
/// [`crate::fit::AreaLabel::from_area`].
pub struct BandShape;

impl AreaAccessors<SeriesPoint> for BandShape {
    fn x(&self, d: &SeriesPoint) -> f32 {
        d.x
    }
    fn y0(&self, d: &SeriesPoint) -> f32 {
        d.y0
    }
    fn y1(&self, d: &SeriesPoint) -> f32 {
        d.y1
    }
}

/// Stacks the chart's series bottom-up and projects them into `plot`. The
/// vertical scale is shared, anchored at zero, and sized to the tallest
/// stacked total.
pub fn build_bands(chart: &Chart, plot: Rect) -> Vec<Band> {
    let n = chart
        .series
        .iter()
        .map(|series| series.values.len())
        .min()
        .unwrap_or(0);
    if n == 0 {
        return Vec::new();
    }
    let xs: Vec<f32> = match &chart.x {
        Some(x) => x.iter().copied().take(n).collect(),
        None => (0..n).map(|i| i as f32).collect(),
    };
    let x_min = xs[0];
    let x_span = xs[n - 1] - x_min;
    let x_span = if x_span > 0.0 { x_span } else { 1.0 };

    let mut totals = vec![0.0f32; n];
    for series in &chart.series {
        for (i, value) in series.values.iter().take(n).enumerate() {
            totals[i] += value;
        }
    }
    let peak = totals.iter().copied().fold(0.0, f32::max);
    let peak = if peak > 0.0 { peak } else { 1.0 };

    let project_x = |x: f32| plot.x + (x - x_min) / x_span * plot.width;
    let project_y = |value: f32| plot.y + plot.height - value / peak * plot.height;

    let mut lower = vec![0.0f32; n];
    let mut bands = Vec::with_capacity(chart.series.len());
    for series in &chart.series {
        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            let upper = lower[i] + series.values[i];
            points.push(SeriesPoint {
                x: project_x(xs[i]),
                y0: project_y(lower[i]),
                y1: project_y(upper),
            });
            lower[i] = upper;
        }
        bands.push(Band {
            label: series.name.clone(),
            points,
        });
    }
    bands
}
