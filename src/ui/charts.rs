use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Legend, Line, Plot, PlotPoints, Points};

// ---------------------------------------------------------------------------
// egui_plot wrappers – the rendering collaborator boundary
// ---------------------------------------------------------------------------
//
// Every helper takes an already-aggregated view; no aggregation happens
// here.  Scroll is left to the page, not the plots, so the wheel moves
// the dashboard instead of zooming a chart.

const ACCENT: Color32 = Color32::from_rgb(0xa2, 0x3b, 0x72);

/// Line chart with markers over year buckets.
pub fn year_line(ui: &mut Ui, id: &str, points: &[(i64, f64)], y_label: &str) {
    let coords: Vec<[f64; 2]> = points
        .iter()
        .map(|&(year, value)| [year as f64, value])
        .collect();

    Plot::new(id.to_string())
        .height(280.0)
        .x_axis_label("year")
        .y_axis_label(y_label.to_string())
        .x_axis_formatter(integer_axis)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .color(ACCENT)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .color(ACCENT)
                    .radius(3.5),
            );
        });
}

/// Vertical bars over year buckets.
pub fn year_bars(ui: &mut Ui, id: &str, points: &[(i64, f64)], y_label: &str) {
    let bars: Vec<Bar> = points
        .iter()
        .map(|&(year, value)| Bar::new(year as f64, value).width(0.7).name(year.to_string()))
        .collect();

    Plot::new(id.to_string())
        .height(280.0)
        .x_axis_label("year")
        .y_axis_label(y_label.to_string())
        .x_axis_formatter(integer_axis)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
        });
}

/// Horizontal ranked bars, largest on top: one bar per (label, value),
/// already sorted descending by the caller.
pub fn ranked_bars(ui: &mut Ui, id: &str, items: &[(String, f64)], x_label: &str) {
    let n = items.len();
    let bars: Vec<Bar> = items
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            // Invert so rank 0 sits at the top of the axis.
            Bar::new((n - 1 - i) as f64, *value)
                .width(0.6)
                .name(label.clone())
        })
        .collect();

    let labels: Vec<String> = items.iter().map(|(label, _)| label.clone()).collect();
    let height = (n as f32) * 24.0 + 70.0;

    Plot::new(id.to_string())
        .height(height)
        .x_axis_label(x_label.to_string())
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark, true)
        })
        .y_grid_spacer(category_marks(n))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(ACCENT));
        });
}

/// Vertical bars over string categories (cluster distribution).
pub fn category_bars(ui: &mut Ui, id: &str, items: &[(String, f64)], y_label: &str) {
    let bars: Vec<Bar> = items
        .iter()
        .enumerate()
        .map(|(i, (label, value))| Bar::new(i as f64, *value).width(0.6).name(label.clone()))
        .collect();

    let labels: Vec<String> = items.iter().map(|(label, _)| label.clone()).collect();
    let n = labels.len();

    Plot::new(id.to_string())
        .height(280.0)
        .y_axis_label(y_label.to_string())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark, false)
        })
        .x_grid_spacer(category_marks(n))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
        });
}

/// Grouped vertical bars: one cluster of bars per category, one coloured
/// series per group (plotly's `barmode='group'`).
pub fn grouped_bars(
    ui: &mut Ui,
    id: &str,
    categories: &[String],
    series: &[(String, Color32, Vec<f64>)],
    y_label: &str,
) {
    let m = series.len().max(1);
    let width = 0.8 / m as f64;

    let charts: Vec<BarChart> = series
        .iter()
        .enumerate()
        .map(|(j, (name, color, values))| {
            let bars: Vec<Bar> = values
                .iter()
                .enumerate()
                .filter(|(_, value)| **value > 0.0)
                .map(|(i, value)| {
                    let arg = i as f64 - 0.4 + width * (j as f64 + 0.5);
                    Bar::new(arg, *value).width(width * 0.9)
                })
                .collect();
            BarChart::new(bars).name(name.clone()).color(*color)
        })
        .collect();

    let labels: Vec<String> = categories.to_vec();
    let n = labels.len();

    Plot::new(id.to_string())
        .height(300.0)
        .legend(Legend::default())
        .y_axis_label(y_label.to_string())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark, false)
        })
        .x_grid_spacer(category_marks(n))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Scatter with one coloured, named point set per series.
pub fn scatter(
    ui: &mut Ui,
    id: &str,
    series: &[(String, Color32, Vec<[f64; 2]>)],
    x_label: &str,
    y_label: &str,
) {
    Plot::new(id.to_string())
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label(x_label.to_string())
        .y_axis_label(y_label.to_string())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (name, color, points) in series {
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .name(name)
                        .color(*color)
                        .radius(2.5),
                );
            }
        });
}

// -- Axis helpers --

/// Whole-number tick labels (year axes); fractional marks stay blank.
fn integer_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if (mark.value - mark.value.round()).abs() > 0.001 {
        return String::new();
    }
    format!("{:.0}", mark.value)
}

/// Label integer grid marks with category names; everything else stays
/// blank.  `inverted` matches [`ranked_bars`]' top-first ordering.
fn category_label(labels: &[String], mark: GridMark, inverted: bool) -> String {
    let idx = mark.value.round();
    if (mark.value - idx).abs() > 0.05 || idx < 0.0 {
        return String::new();
    }
    let mut idx = idx as usize;
    if inverted {
        if idx >= labels.len() {
            return String::new();
        }
        idx = labels.len() - 1 - idx;
    }
    labels.get(idx).cloned().unwrap_or_default()
}

/// One grid mark per category index, nothing in between.
fn category_marks(n: usize) -> impl Fn(GridInput) -> Vec<GridMark> {
    move |_input: GridInput| {
        (0..n)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }
}
