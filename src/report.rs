// src/report.rs

use chrono::Local;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::data_analysis::anova::{AnovaResult, VarianceBreakdown};
use crate::data_analysis::descriptive::GroupSummary;

/// Everything the Markdown report needs beyond the statistics themselves.
pub struct ReportContext<'a> {
    pub data_file: &'a str,
    pub alpha: f64,
    pub value_column: &'a str,
    pub plot_files: &'a [String],
}

/// Renders the full analysis report as a Markdown string.
pub fn render_markdown_report(
    summaries: &[GroupSummary],
    result: &AnovaResult,
    breakdown: &VarianceBreakdown,
    context: &ReportContext,
) -> String {
    let mut report = String::new();
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let _ = writeln!(report, "# Robot Control Algorithm ANOVA Report\n");
    let _ = writeln!(report, "**Generated**: {timestamp}  ");
    let _ = writeln!(report, "**Method**: One-way analysis of variance (ANOVA)  ");
    let _ = writeln!(report, "**Significance level**: α = {}\n", context.alpha);
    let _ = writeln!(report, "---\n");

    let _ = writeln!(report, "## 1. Objective\n");
    let _ = writeln!(
        report,
        "Compare the control accuracy of {} candidate control algorithms ({}) \
         to support algorithm selection with benchmark evidence.\n",
        breakdown.group_count,
        summaries
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let _ = writeln!(report, "## 2. Hypotheses\n");
    let _ = writeln!(
        report,
        "- **Null hypothesis (H₀)**: the mean control error is the same for every algorithm"
    );
    let _ = writeln!(
        report,
        "- **Alternative (H₁)**: at least one algorithm's mean control error differs\n"
    );

    let _ = writeln!(report, "## 3. Data Overview\n");
    let _ = writeln!(
        report,
        "| Algorithm | Samples | Mean | Std Dev | Min | Max |"
    );
    let _ = writeln!(report, "|-----------|---------|------|---------|-----|-----|");
    for s in summaries {
        let _ = writeln!(
            report,
            "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} |",
            s.label, s.count, s.mean, s.std_dev, s.min, s.max
        );
    }
    let _ = writeln!(report, "\nMeasurement column: `{}`\n", context.value_column);

    let _ = writeln!(report, "## 4. ANOVA Results\n");
    let _ = writeln!(report, "| Statistic | Value |");
    let _ = writeln!(report, "|-----------|-------|");
    let _ = writeln!(report, "| F-statistic | {:.4} |", result.f_value);
    let _ = writeln!(
        report,
        "| Critical value (F, α={}) | {:.4} |",
        context.alpha, result.critical_value
    );
    let _ = writeln!(report, "| p-value | {:.4} |", result.p_value);
    let _ = writeln!(
        report,
        "| Degrees of freedom | ({}, {}) |",
        breakdown.dfn, breakdown.dfd
    );
    let _ = writeln!(report, "| Effect size (η²) | {:.4} |", breakdown.effect_size);
    let _ = writeln!(
        report,
        "| **Verdict** | **{}** |\n",
        if result.is_significant {
            "Significant"
        } else {
            "Not significant"
        }
    );

    let _ = writeln!(report, "## 5. Interpretation\n");
    if result.is_significant {
        let _ = writeln!(report, "### Reject the null hypothesis\n");
        let _ = writeln!(
            report,
            "At α = {}, the F-statistic ({:.4}) exceeds the critical value ({:.4}) \
             and the p-value ({:.4}) is below the significance level.\n",
            context.alpha, result.f_value, result.critical_value, result.p_value
        );
        let _ = writeln!(
            report,
            "**Conclusion**: the control error differs significantly between algorithms.\n"
        );
    } else {
        let _ = writeln!(report, "### Fail to reject the null hypothesis\n");
        let _ = writeln!(
            report,
            "At α = {}, the F-statistic ({:.4}) does not exceed the critical value ({:.4}); \
             the p-value ({:.4}) is above the significance level.\n",
            context.alpha, result.f_value, result.critical_value, result.p_value
        );
        let _ = writeln!(
            report,
            "**Conclusion**: no statistically significant difference in control error \
             between the algorithms.\n"
        );
    }

    let _ = writeln!(report, "## 6. Recommendations\n");
    if result.is_significant {
        let mut ranked: Vec<&GroupSummary> = summaries.iter().collect();
        ranked.sort_by(|a, b| a.mean.partial_cmp(&b.mean).unwrap_or(std::cmp::Ordering::Equal));
        for (rank, s) in ranked.iter().enumerate() {
            let note = match rank {
                0 => "lowest mean error, preferred for high-precision control",
                r if r + 1 == ranked.len() => "highest mean error, needs retuning before use",
                _ => "intermediate accuracy, acceptable for relaxed tolerances",
            };
            let _ = writeln!(
                report,
                "{}. **{}** - mean error {:.2} ({note})",
                rank + 1,
                s.label,
                s.mean
            );
        }
        let _ = writeln!(report);
    } else {
        let _ = writeln!(
            report,
            "The algorithms perform comparably on control error; choose between them on:\n"
        );
        let _ = writeln!(report, "1. Computational cost and real-time constraints");
        let _ = writeln!(report, "2. Implementation and maintenance effort");
        let _ = writeln!(report, "3. Robustness to plant parameter changes\n");
    }

    if !context.plot_files.is_empty() {
        let _ = writeln!(report, "## 7. Figures\n");
        for plot_file in context.plot_files {
            let _ = writeln!(report, "![{plot_file}]({plot_file})");
        }
        let _ = writeln!(report);
    }

    let _ = writeln!(report, "---\n");
    let _ = writeln!(report, "**Data file**: {}  ", context.data_file);
    let _ = writeln!(
        report,
        "**Generator**: control-anova v{}",
        crate::crate_version()
    );

    report
}

/// Renders and writes the report next to the input data.
pub fn write_markdown_report(
    output_path: &Path,
    summaries: &[GroupSummary],
    result: &AnovaResult,
    breakdown: &VarianceBreakdown,
    context: &ReportContext,
) -> Result<(), Box<dyn Error>> {
    let report = render_markdown_report(summaries, result, breakdown, context);
    fs::write(output_path, report)?;
    Ok(())
}
