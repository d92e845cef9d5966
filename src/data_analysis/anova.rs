// src/data_analysis/anova.rs

use std::fmt;

use crate::data_analysis::f_distribution::{f_cdf, f_quantile};
use crate::types::GroupedValues;

/// Error type for an ANOVA invocation. Both variants are fatal to the
/// single computation; no partial result is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AnovaError {
    /// Input shape cannot support the test: empty input, mismatched column
    /// lengths, fewer than two groups, too few samples for the within-group
    /// degrees of freedom, or alpha outside (0, 1).
    InvalidInput(String),
    /// Every value is identical within each group, so the within-group
    /// variance is zero and the F-statistic is undefined.
    DegenerateData(String),
}

impl fmt::Display for AnovaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnovaError::InvalidInput(msg) => write!(f, "invalid ANOVA input: {msg}"),
            AnovaError::DegenerateData(msg) => write!(f, "degenerate ANOVA data: {msg}"),
        }
    }
}

impl std::error::Error for AnovaError {}

/// The four reported outputs of the variance ratio test.
/// Held at full precision; format with `{:.4}` when reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaResult {
    pub f_value: f64,
    pub critical_value: f64,
    pub is_significant: bool,
    pub p_value: f64,
}

/// Intermediate sums behind an [`AnovaResult`], kept for diagnostics and the
/// written report. `group_means` follows first-seen label order.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceBreakdown {
    pub group_count: usize,
    pub sample_count: usize,
    pub total_ss: f64,
    pub within_ss: f64,
    pub between_ss: f64,
    /// η² = between_ss / total_ss.
    pub effect_size: f64,
    pub dfn: usize,
    pub dfd: usize,
    pub group_means: Vec<(String, f64)>,
}

/// One-way analysis of variance over `(value, label)` observation columns.
///
/// Tests H₀: all group means are equal, at significance level `alpha`.
/// Groups are the distinct labels, enumerated in first-seen order.
///
/// The between-group sum of squares is derived as `total - within` rather
/// than from the direct Σ nᵢ(ȳᵢ − ȳ)² formula, so the variance decomposition
/// identity holds exactly in floating point.
pub fn one_way_anova(
    values: &[f64],
    labels: &[&str],
    alpha: f64,
) -> Result<(AnovaResult, VarianceBreakdown), AnovaError> {
    if values.is_empty() {
        return Err(AnovaError::InvalidInput("no observations".to_string()));
    }
    if values.len() != labels.len() {
        return Err(AnovaError::InvalidInput(format!(
            "value and label columns differ in length ({} vs {})",
            values.len(),
            labels.len()
        )));
    }
    if !(0.0 < alpha && alpha < 1.0) {
        return Err(AnovaError::InvalidInput(format!(
            "significance level must lie in (0, 1), got {alpha}"
        )));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(AnovaError::InvalidInput(format!(
            "non-finite measurement {bad} in input"
        )));
    }

    let groups = group_in_first_seen_order(values, labels);
    let k = groups.len();
    let n = values.len();

    if k < 2 {
        return Err(AnovaError::InvalidInput(format!(
            "need at least 2 distinct groups, got {k}"
        )));
    }
    if n <= k {
        return Err(AnovaError::InvalidInput(format!(
            "need more observations ({n}) than groups ({k}) for a positive within-group df"
        )));
    }

    // Step 1: total variation around the grand mean.
    let grand_mean = values.iter().sum::<f64>() / n as f64;
    let total_ss: f64 = values.iter().map(|v| (v - grand_mean).powi(2)).sum();

    // Step 2: within-group variation around each group mean.
    let mut within_ss = 0.0;
    let mut group_means: Vec<(String, f64)> = Vec::with_capacity(k);
    for (label, group_values) in &groups {
        let group_mean = group_values.iter().sum::<f64>() / group_values.len() as f64;
        within_ss += group_values
            .iter()
            .map(|v| (v - group_mean).powi(2))
            .sum::<f64>();
        group_means.push((label.clone(), group_mean));
    }

    // Step 3: between-group variation by subtraction (identity exact).
    let between_ss = total_ss - within_ss;

    let effect_size = if total_ss > 0.0 { between_ss / total_ss } else { 0.0 };

    // Step 4: degrees of freedom and mean squares.
    let dfn = k - 1;
    let dfd = n - k;

    if within_ss == 0.0 {
        return Err(AnovaError::DegenerateData(
            "within-group variance is zero; the F-statistic is undefined".to_string(),
        ));
    }

    let between_ms = between_ss / dfn as f64;
    let within_ms = within_ss / dfd as f64;

    // Step 5: F-statistic, rejection threshold, and p-value.
    let f_value = between_ms / within_ms;
    let critical_value = f_quantile(1.0 - alpha, dfn as f64, dfd as f64);
    let p_value = 1.0 - f_cdf(f_value, dfn as f64, dfd as f64);
    let is_significant = f_value >= critical_value;

    let result = AnovaResult {
        f_value,
        critical_value,
        is_significant,
        p_value,
    };
    let breakdown = VarianceBreakdown {
        group_count: k,
        sample_count: n,
        total_ss,
        within_ss,
        between_ss,
        effect_size,
        dfn,
        dfd,
        group_means,
    };
    Ok((result, breakdown))
}

/// Splits parallel value/label columns into per-group vectors, preserving
/// the order in which each distinct label first appears.
fn group_in_first_seen_order(values: &[f64], labels: &[&str]) -> GroupedValues {
    let mut groups: GroupedValues = Vec::new();
    for (&value, &label) in values.iter().zip(labels.iter()) {
        match groups.iter_mut().find(|(l, _)| l == label) {
            Some((_, group_values)) => group_values.push(value),
            None => groups.push((label.to_string(), vec![value])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_group_fixture() -> (Vec<f64>, Vec<&'static str>) {
        (
            vec![1.0, 2.0, 3.0, 7.0, 8.0, 9.0],
            vec!["A", "A", "A", "B", "B", "B"],
        )
    }

    #[test]
    fn two_group_worked_example() {
        let (values, labels) = two_group_fixture();
        let (result, breakdown) = one_way_anova(&values, &labels, 0.05).unwrap();

        assert_eq!(breakdown.group_count, 2);
        assert_eq!(breakdown.sample_count, 6);
        assert!((breakdown.total_ss - 58.0).abs() < 1e-12);
        assert!((breakdown.within_ss - 4.0).abs() < 1e-12);
        assert!((breakdown.between_ss - 54.0).abs() < 1e-12);
        assert_eq!(breakdown.dfn, 1);
        assert_eq!(breakdown.dfd, 4);

        assert!((result.f_value - 54.0).abs() < 1e-12);
        assert!((result.critical_value - 7.7086).abs() < 1e-3);
        assert!((result.p_value - 0.0018).abs() < 2e-4);
        assert!(result.is_significant);
    }

    #[test]
    fn decomposition_identity_holds() {
        let values = vec![12.1, 15.3, 14.8, 9.9, 10.4, 11.2, 7.0, 6.5, 8.1, 7.7];
        let labels = vec!["PID", "PID", "PID", "LQR", "LQR", "LQR", "MPC", "MPC", "MPC", "MPC"];
        let (_, breakdown) = one_way_anova(&values, &labels, 0.05).unwrap();
        let recomposed = breakdown.within_ss + breakdown.between_ss;
        assert!((recomposed - breakdown.total_ss).abs() <= 1e-9 * breakdown.total_ss.abs());
    }

    #[test]
    fn degrees_of_freedom_formula() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.5, 6.5, 7.0];
        let labels = vec!["a", "a", "b", "b", "c", "c", "c"];
        let (_, breakdown) = one_way_anova(&values, &labels, 0.05).unwrap();
        assert_eq!(breakdown.dfn, 2); // k - 1
        assert_eq!(breakdown.dfd, 4); // n - k
    }

    #[test]
    fn significance_flag_agrees_with_p_value() {
        // Clearly separated means.
        let (values, labels) = two_group_fixture();
        let (result, _) = one_way_anova(&values, &labels, 0.05).unwrap();
        assert_eq!(result.is_significant, result.p_value <= 0.05);

        // Near-identical means, pure noise: F far below critical.
        let noise = vec![5.1, 5.0, 4.95, 4.9, 5.15, 5.05, 5.0, 4.85, 5.1, 5.05, 4.95, 4.9];
        let noise_labels = vec!["x", "y", "z", "x", "y", "z", "x", "y", "z", "x", "y", "z"];
        let (result, _) = one_way_anova(&noise, &noise_labels, 0.05).unwrap();
        assert!(!result.is_significant);
        assert!(result.p_value > 0.05);
    }

    #[test]
    fn identical_values_everywhere_is_degenerate() {
        let values = vec![3.0; 8];
        let labels = vec!["a", "a", "a", "a", "b", "b", "b", "b"];
        let err = one_way_anova(&values, &labels, 0.05).unwrap_err();
        assert!(matches!(err, AnovaError::DegenerateData(_)));
    }

    #[test]
    fn constant_within_groups_is_degenerate_even_with_distinct_means() {
        let values = vec![1.0, 1.0, 1.0, 9.0, 9.0, 9.0];
        let labels = vec!["a", "a", "a", "b", "b", "b"];
        let err = one_way_anova(&values, &labels, 0.05).unwrap_err();
        assert!(matches!(err, AnovaError::DegenerateData(_)));
    }

    #[test]
    fn single_group_is_invalid() {
        let values = vec![1.0, 2.0, 3.0];
        let labels = vec!["only", "only", "only"];
        let err = one_way_anova(&values, &labels, 0.05).unwrap_err();
        assert!(matches!(err, AnovaError::InvalidInput(_)));
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = one_way_anova(&[], &[], 0.05).unwrap_err();
        assert!(matches!(err, AnovaError::InvalidInput(_)));
    }

    #[test]
    fn too_few_observations_for_within_df_is_invalid() {
        // n == k → dfd = 0; the mean squares would divide by zero.
        let values = vec![1.0, 2.0];
        let labels = vec!["a", "b"];
        let err = one_way_anova(&values, &labels, 0.05).unwrap_err();
        assert!(matches!(err, AnovaError::InvalidInput(_)));
    }

    #[test]
    fn mismatched_columns_are_invalid() {
        let err = one_way_anova(&[1.0, 2.0], &["a"], 0.05).unwrap_err();
        assert!(matches!(err, AnovaError::InvalidInput(_)));
    }

    #[test]
    fn alpha_outside_unit_interval_is_invalid() {
        let (values, labels) = two_group_fixture();
        for bad_alpha in [0.0, 1.0, -0.1, 1.5] {
            let err = one_way_anova(&values, &labels, bad_alpha).unwrap_err();
            assert!(matches!(err, AnovaError::InvalidInput(_)), "alpha={bad_alpha}");
        }
    }

    #[test]
    fn non_finite_measurement_is_invalid() {
        let values = vec![1.0, f64::NAN, 3.0, 4.0];
        let labels = vec!["a", "a", "b", "b"];
        let err = one_way_anova(&values, &labels, 0.05).unwrap_err();
        assert!(matches!(err, AnovaError::InvalidInput(_)));
    }

    #[test]
    fn singleton_group_is_accepted() {
        // A group with one member contributes nothing to within_ss but is valid.
        let values = vec![1.0, 2.0, 3.0, 10.0];
        let labels = vec!["a", "a", "a", "b"];
        let (result, breakdown) = one_way_anova(&values, &labels, 0.05).unwrap();
        assert_eq!(breakdown.dfn, 1);
        assert_eq!(breakdown.dfd, 2);
        assert!(result.f_value.is_finite());
    }

    #[test]
    fn group_means_in_first_seen_order() {
        let values = vec![2.0, 8.0, 4.0, 10.0];
        let labels = vec!["late", "early", "late", "early"];
        let (_, breakdown) = one_way_anova(&values, &labels, 0.05).unwrap();
        assert_eq!(breakdown.group_means[0].0, "late");
        assert_eq!(breakdown.group_means[1].0, "early");
        assert!((breakdown.group_means[0].1 - 3.0).abs() < 1e-12);
        assert!((breakdown.group_means[1].1 - 9.0).abs() < 1e-12);
    }
}
