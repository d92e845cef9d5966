// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::style::colors::WHITE;

use std::error::Error;

use crate::constants::{PLOT_HEIGHT, PLOT_WIDTH};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Creates the white-filled PNG root area every figure draws on.
pub fn create_chart_root(
    output_file: &str,
) -> Result<DrawingArea<BitMapBackend<'_>, Shift>, Box<dyn Error>> {
    let root = BitMapBackend::new(output_file, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    Ok(root)
}

/// Tick formatter for a categorical x-axis where group `i` sits at x = i.
/// Ticks that do not land on a group slot render empty.
pub fn group_axis_formatter(labels: &[String]) -> impl Fn(&f64) -> String + '_ {
    move |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 0.25 && idx >= 0.0 && (idx as usize) < labels.len() {
            labels[idx as usize].clone()
        } else {
            String::new()
        }
    }
}

/// The x-axis span that puts `group_count` slots at integer positions with
/// half a slot of margin on each side.
pub fn group_axis_range(group_count: usize) -> std::ops::Range<f64> {
    -0.5..(group_count as f64 - 0.5)
}
