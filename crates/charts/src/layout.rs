//! Chart layout calculations
//!
//! This module handles calculating the layout of chart elements
//! including the plot area, axes, gridlines, and data points.

use crate::model::*;
use serde::{Deserialize, Serialize};
use teaser_model::Color;

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the center Y coordinate
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Shrink the rectangle by the given padding
    pub fn inset(&self, padding: f64) -> Self {
        self.inset_sides(padding, padding, padding, padding)
    }

    /// Shrink by different amounts on each side
    pub fn inset_sides(&self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }
}

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// Layout for one plotted value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLayout {
    pub center: LayoutPoint,
    pub series_index: usize,
    pub category_index: usize,
    pub value: f64,
}

/// Layout for one dataset: connected runs of points plus their markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesLayout {
    pub series_index: usize,
    /// Each run is drawn as one polyline; gaps split runs
    pub segments: Vec<Vec<LayoutPoint>>,
    pub points: Vec<PointLayout>,
    pub color: Color,
    pub dash: Option<[f64; 2]>,
    pub line_width: f64,
    pub point_radius: f64,
}

/// Layout for axis tick marks and labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisTickLayout {
    pub position: f64,
    pub label: String,
}

/// Layout for a complete axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisLayout {
    pub line_start: LayoutPoint,
    pub line_end: LayoutPoint,
    pub ticks: Vec<AxisTickLayout>,
    pub orientation: AxisOrientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

/// Value axis range and tick positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub ticks: Vec<f64>,
}

impl ValueScale {
    /// Compute a scale covering `min..=max` with round tick intervals
    ///
    /// The axis always includes zero. The top is the first tick at or
    /// above `max`.
    pub fn nice(min: f64, max: f64, tick_count: usize) -> Self {
        let min = min.min(0.0);
        let mut max = max.max(0.0);
        if max - min <= f64::EPSILON {
            max = min + 1.0;
        }

        let range = max - min;
        let raw_step = range / tick_count.max(1) as f64;
        let magnitude = 10_f64.powf(raw_step.log10().floor());
        let step = ((raw_step / magnitude) - 1e-9).ceil() * magnitude;

        let axis_min = ((min / step) + 1e-9).floor() * step;
        let axis_max = ((max / step) - 1e-9).ceil() * step;
        let count = ((axis_max - axis_min) / step).round() as usize;

        let ticks = (0..=count).map(|i| axis_min + i as f64 * step).collect();

        Self {
            min: axis_min,
            max: axis_max,
            step,
            ticks,
        }
    }

    /// Fraction of the axis covered by `value`, 0 at the bottom
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

/// Format a tick value without trailing zeros
pub fn format_tick_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let text = format!("{:.6}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Shorten tick labels longer than four characters to four plus "..."
pub fn truncate_tick_label(label: &str) -> String {
    if label.chars().count() > 4 {
        let head: String = label.chars().take(4).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// Complete layout for a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Total bounds of the chart
    pub total_bounds: LayoutRect,
    /// Plot area bounds
    pub plot_area: LayoutRect,
    pub scale: ValueScale,
    pub category_axis: AxisLayout,
    pub value_axis: AxisLayout,
    /// Y coordinates of horizontal gridlines
    pub horizontal_gridlines: Vec<f64>,
    pub series: Vec<SeriesLayout>,
}

/// Layout calculator for charts
pub struct ChartLayoutCalculator {
    /// Font size for axis labels
    pub axis_label_font_size: f64,
    /// Padding around the chart
    pub padding: f64,
    /// Space reserved left of the plot for value labels
    pub value_label_width: f64,
    /// Space reserved below the plot for category labels
    pub category_label_height: f64,
    /// Target number of value-axis intervals
    pub tick_count: usize,
}

impl Default for ChartLayoutCalculator {
    fn default() -> Self {
        Self {
            axis_label_font_size: 8.0,
            padding: 6.0,
            value_label_width: 26.0,
            category_label_height: 14.0,
            tick_count: 5,
        }
    }
}

impl ChartLayoutCalculator {
    /// Create a new layout calculator
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate the complete layout for a chart
    pub fn calculate(&self, chart: &LineChart, width: f64, height: f64) -> ChartLayout {
        let total_bounds = LayoutRect::new(0.0, 0.0, width, height);
        let plot_area = total_bounds.inset(self.padding).inset_sides(
            0.0,
            0.0,
            self.category_label_height,
            self.value_label_width,
        );

        let data_max = chart.max_value().unwrap_or(0.0);
        let top = chart.suggested_max.unwrap_or(data_max).max(data_max);
        let scale = ValueScale::nice(chart.min_value().unwrap_or(0.0), top, self.tick_count);

        let horizontal_gridlines: Vec<f64> = scale
            .ticks
            .iter()
            .map(|&tick| value_to_y(&plot_area, &scale, tick))
            .collect();

        let value_axis = AxisLayout {
            line_start: LayoutPoint::new(plot_area.x, plot_area.y),
            line_end: LayoutPoint::new(plot_area.x, plot_area.bottom()),
            ticks: scale
                .ticks
                .iter()
                .zip(&horizontal_gridlines)
                .map(|(&tick, &y)| AxisTickLayout {
                    position: y,
                    label: truncate_tick_label(&format_tick_value(tick)),
                })
                .collect(),
            orientation: AxisOrientation::Vertical,
        };

        let category_axis = AxisLayout {
            line_start: LayoutPoint::new(plot_area.x, plot_area.bottom()),
            line_end: LayoutPoint::new(plot_area.right(), plot_area.bottom()),
            ticks: chart
                .categories
                .iter()
                .enumerate()
                .map(|(idx, category)| AxisTickLayout {
                    position: category_x(&plot_area, idx, chart.category_count()),
                    label: truncate_tick_label(category),
                })
                .collect(),
            orientation: AxisOrientation::Horizontal,
        };

        let series = chart
            .series
            .iter()
            .enumerate()
            .map(|(series_idx, series)| {
                self.calculate_series_layout(chart, series_idx, series, &plot_area, &scale)
            })
            .collect();

        ChartLayout {
            total_bounds,
            plot_area,
            scale,
            category_axis,
            value_axis,
            horizontal_gridlines,
            series,
        }
    }

    fn calculate_series_layout(
        &self,
        chart: &LineChart,
        series_idx: usize,
        series: &LineSeries,
        plot: &LayoutRect,
        scale: &ValueScale,
    ) -> SeriesLayout {
        let mut segments: Vec<Vec<LayoutPoint>> = Vec::new();
        let mut points = Vec::new();
        let mut current: Vec<LayoutPoint> = Vec::new();

        for (cat_idx, value) in series.values.iter().enumerate() {
            match value {
                Some(value) => {
                    let point = LayoutPoint::new(
                        category_x(plot, cat_idx, chart.category_count()),
                        value_to_y(plot, scale, *value),
                    );
                    current.push(point);
                    points.push(PointLayout {
                        center: point,
                        series_index: series_idx,
                        category_index: cat_idx,
                        value: *value,
                    });
                }
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        SeriesLayout {
            series_index: series_idx,
            segments,
            points,
            color: series.color,
            dash: series.dash,
            line_width: series.line_width,
            point_radius: series.point_radius,
        }
    }
}

fn category_x(plot: &LayoutRect, index: usize, count: usize) -> f64 {
    if count <= 1 {
        plot.center_x()
    } else {
        plot.x + index as f64 * plot.width / (count - 1) as f64
    }
}

fn value_to_y(plot: &LayoutRect, scale: &ValueScale, value: f64) -> f64 {
    plot.bottom() - scale.normalize(value) * plot.height
}
