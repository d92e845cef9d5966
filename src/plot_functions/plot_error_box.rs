// src/plot_functions/plot_error_box.rs

use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::element::{Circle, PathElement, Rectangle};
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, IntoFont};

use crate::constants::{
    BOX_HALF_WIDTH, COLOR_MEAN_MARKER, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    FONT_SIZE_LEGEND, GROUP_COLORS, LINE_WIDTH_PLOT, LINE_WIDTH_WHISKER,
    WHISKER_CAP_HALF_WIDTH,
};
use crate::data_analysis::descriptive::GroupSummary;
use crate::plot_framework::{
    calculate_range, create_chart_root, group_axis_formatter, group_axis_range,
};
use crate::types::PipelineResult;

/// Generates the per-algorithm error distribution box plot
/// (Q1..Q3 box, median line, min/max whiskers, mean marker).
pub fn plot_error_box(
    summaries: &[GroupSummary],
    root_name: &str,
    value_label: &str,
) -> PipelineResult {
    if summaries.is_empty() {
        println!("  Skipping box plot: no group summaries available.");
        return Ok(());
    }

    let output_file = format!("{root_name}_error_boxplot.png");

    let data_min = summaries.iter().map(|s| s.min).fold(f64::INFINITY, f64::min);
    let data_max = summaries.iter().map(|s| s.max).fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = calculate_range(data_min, data_max);

    let labels: Vec<String> = summaries.iter().map(|s| s.label.clone()).collect();

    let root = create_chart_root(&output_file)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Control Error Distribution by Algorithm (Box Plot)",
            ("sans-serif", FONT_SIZE_CHART_TITLE),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(group_axis_range(summaries.len()), y_min..y_max)?;

    let label_formatter = group_axis_formatter(&labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Algorithm")
        .y_desc(value_label)
        .x_labels(summaries.len())
        .x_label_formatter(&label_formatter)
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL).into_font())
        .draw()?;

    for (index, summary) in summaries.iter().enumerate() {
        let x = index as f64;
        let color = *GROUP_COLORS[index % GROUP_COLORS.len()];

        // Whisker spine and caps over the full observed range.
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, summary.min), (x, summary.max)],
            BLACK.stroke_width(LINE_WIDTH_WHISKER),
        )))?;
        for cap_y in [summary.min, summary.max] {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![
                    (x - WHISKER_CAP_HALF_WIDTH, cap_y),
                    (x + WHISKER_CAP_HALF_WIDTH, cap_y),
                ],
                BLACK.stroke_width(LINE_WIDTH_WHISKER),
            )))?;
        }

        // Interquartile box with the group color, outlined.
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (x - BOX_HALF_WIDTH, summary.q1),
                (x + BOX_HALF_WIDTH, summary.q3),
            ],
            color.mix(0.35).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (x - BOX_HALF_WIDTH, summary.q1),
                (x + BOX_HALF_WIDTH, summary.q3),
            ],
            color.stroke_width(LINE_WIDTH_PLOT),
        )))?;

        // Median line.
        chart.draw_series(std::iter::once(PathElement::new(
            vec![
                (x - BOX_HALF_WIDTH, summary.median),
                (x + BOX_HALF_WIDTH, summary.median),
            ],
            BLACK.stroke_width(LINE_WIDTH_PLOT),
        )))?;
    }

    // Mean markers on top of the boxes, with a single legend entry.
    chart
        .draw_series(summaries.iter().enumerate().map(|(index, summary)| {
            Circle::new((index as f64, summary.mean), 6, COLOR_MEAN_MARKER.filled())
        }))?
        .label("Mean")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, COLOR_MEAN_MARKER.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", FONT_SIZE_LEGEND))
        .draw()?;

    root.present()?;
    println!("  Box plot saved as '{}'.", output_file);
    Ok(())
}

// src/plot_functions/plot_error_box.rs
