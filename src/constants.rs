// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{AMBER, GREEN, LIGHTBLUE, ORANGE, PURPLE, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Default significance level for the hypothesis test.
pub const DEFAULT_ALPHA: f64 = 0.05;

// Default CSV column names. Both can be overridden from the command line,
// the analysis itself never assumes them.
pub const DEFAULT_VALUE_COLUMN: &str = "error";
pub const DEFAULT_GROUP_COLUMN: &str = "algorithm";

// --- Synthetic Benchmark Generator Defaults ---
// Error profiles per control algorithm (mean / std dev, millimetres).
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SAMPLES_PER_ALGORITHM: usize = 30;
pub const BENCH_PROFILES: [(&str, f64, f64); 3] = [
    ("PID", 15.0, 4.0), // largest average error, widest spread
    ("LQR", 10.0, 3.0),
    ("MPC", 7.0, 2.5), // tightest tracking
];

// --- Plot Color Assignments ---
pub const GROUP_COLORS: [&RGBColor; 6] = [&LIGHTBLUE, &ORANGE, &AMBER, &GREEN, &PURPLE, &RED];
pub const COLOR_MEAN_MARKER: &RGBColor = &RED;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_WHISKER: u32 = 1;

// Box plot geometry (fraction of one group slot).
pub const BOX_HALF_WIDTH: f64 = 0.28;
pub const WHISKER_CAP_HALF_WIDTH: f64 = 0.12;

// Strip plot jitter spread (fraction of one group slot) and marker size.
pub const STRIP_JITTER_HALF_WIDTH: f64 = 0.18;
pub const STRIP_POINT_SIZE: i32 = 4;

// Fixed seed for the strip plot jitter so re-runs render identically.
pub const STRIP_JITTER_SEED: u64 = 7;

// Font sizes
pub const FONT_SIZE_CHART_TITLE: u32 = 24;
pub const FONT_SIZE_AXIS_LABEL: u32 = 16;
pub const FONT_SIZE_LEGEND: u32 = 14;
