// src/types.rs
// Type aliases to reduce signature complexity warnings

use std::error::Error;

// Values of one group paired with its label, in first-seen label order.
pub type GroupedValues = Vec<(String, Vec<f64>)>;

// Common result type at the pipeline boundary.
pub type PipelineResult = Result<(), Box<dyn Error>>;
