// src/plot_functions/plot_error_strip.rs

use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::element::{Circle, PathElement};
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, IntoFont};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    COLOR_MEAN_MARKER, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    GROUP_COLORS, LINE_WIDTH_PLOT, STRIP_JITTER_HALF_WIDTH, STRIP_JITTER_SEED,
    STRIP_POINT_SIZE,
};
use crate::plot_framework::{
    calculate_range, create_chart_root, group_axis_formatter, group_axis_range,
};
use crate::types::{GroupedValues, PipelineResult};

/// Generates the jittered strip plot: every individual measurement per
/// algorithm, with a horizontal bar at each group mean.
pub fn plot_error_strip(
    grouped: &GroupedValues,
    root_name: &str,
    value_label: &str,
) -> PipelineResult {
    if grouped.iter().all(|(_, values)| values.is_empty()) {
        println!("  Skipping strip plot: no observations available.");
        return Ok(());
    }

    let output_file = format!("{root_name}_error_strip.png");

    let data_min = grouped
        .iter()
        .flat_map(|(_, values)| values.iter())
        .fold(f64::INFINITY, |acc, v| acc.min(*v));
    let data_max = grouped
        .iter()
        .flat_map(|(_, values)| values.iter())
        .fold(f64::NEG_INFINITY, |acc, v| acc.max(*v));
    let (y_min, y_max) = calculate_range(data_min, data_max);

    let labels: Vec<String> = grouped.iter().map(|(label, _)| label.clone()).collect();

    let root = create_chart_root(&output_file)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Control Error Samples by Algorithm (Strip Plot)",
            ("sans-serif", FONT_SIZE_CHART_TITLE),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(group_axis_range(grouped.len()), y_min..y_max)?;

    let label_formatter = group_axis_formatter(&labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Algorithm")
        .y_desc(value_label)
        .x_labels(grouped.len())
        .x_label_formatter(&label_formatter)
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL).into_font())
        .draw()?;

    // Fixed seed keeps the jitter identical between runs of the same data.
    let mut jitter_rng = SmallRng::seed_from_u64(STRIP_JITTER_SEED);

    for (index, (_, values)) in grouped.iter().enumerate() {
        let x_center = index as f64;
        let color = *GROUP_COLORS[index % GROUP_COLORS.len()];

        let points: Vec<(f64, f64)> = values
            .iter()
            .map(|&v| {
                let jitter =
                    jitter_rng.gen_range(-STRIP_JITTER_HALF_WIDTH..=STRIP_JITTER_HALF_WIDTH);
                (x_center + jitter, v)
            })
            .collect();

        chart.draw_series(
            points
                .into_iter()
                .map(|(x, y)| Circle::new((x, y), STRIP_POINT_SIZE, color.mix(0.7).filled())),
        )?;
    }

    // Group mean bars over the jittered points, one legend entry.
    chart
        .draw_series(grouped.iter().enumerate().filter_map(|(index, (_, values))| {
            if values.is_empty() {
                return None;
            }
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let x_center = index as f64;
            Some(PathElement::new(
                vec![
                    (x_center - STRIP_JITTER_HALF_WIDTH * 1.5, mean),
                    (x_center + STRIP_JITTER_HALF_WIDTH * 1.5, mean),
                ],
                COLOR_MEAN_MARKER.stroke_width(LINE_WIDTH_PLOT + 1),
            ))
        }))?
        .label("Group mean")
        .legend(|(x, y)| {
            PathElement::new(
                vec![(x, y), (x + 20, y)],
                COLOR_MEAN_MARKER.stroke_width(LINE_WIDTH_PLOT + 1),
            )
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", FONT_SIZE_LEGEND))
        .draw()?;

    root.present()?;
    println!("  Strip plot saved as '{}'.", output_file);
    Ok(())
}
