// src/main.rs

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use control_anova::constants::{
    DEFAULT_ALPHA, DEFAULT_GROUP_COLUMN, DEFAULT_SAMPLES_PER_ALGORITHM, DEFAULT_SEED,
    DEFAULT_VALUE_COLUMN,
};
use control_anova::data_analysis::anova::{one_way_anova, AnovaError};
use control_anova::data_analysis::descriptive::{summarize_groups, GroupSummary};
use control_anova::data_generation::synthetic::{
    default_profiles, generate_observations, write_observation_csv,
};
use control_anova::data_input::csv_loader::parse_observation_file;
use control_anova::plot_functions::plot_error_box::plot_error_box;
use control_anova::plot_functions::plot_error_strip::plot_error_strip;
use control_anova::report::{write_markdown_report, ReportContext};

struct CliOptions {
    input_file: PathBuf,
    generate: bool,
    alpha: f64,
    value_column: String,
    group_column: String,
    seed: u64,
    samples: usize,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <input_file.csv> [options]");
    eprintln!("       {program} --generate <output_file.csv> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --alpha <a>        significance level in (0,1), default {DEFAULT_ALPHA}");
    eprintln!("  --value-col <name> measurement column name, default '{DEFAULT_VALUE_COLUMN}'");
    eprintln!("  --group-col <name> category column name, default '{DEFAULT_GROUP_COLUMN}'");
    eprintln!("  --seed <n>         generator seed, default {DEFAULT_SEED} (with --generate)");
    eprintln!(
        "  --samples <n>      samples per algorithm, default {DEFAULT_SAMPLES_PER_ALGORITHM} (with --generate)"
    );
    eprintln!("  --version          print version and exit");
}

fn parse_cli(args: &[String]) -> Result<CliOptions, String> {
    let mut input_file: Option<PathBuf> = None;
    let mut generate = false;
    let mut alpha = DEFAULT_ALPHA;
    let mut value_column = DEFAULT_VALUE_COLUMN.to_string();
    let mut group_column = DEFAULT_GROUP_COLUMN.to_string();
    let mut seed = DEFAULT_SEED;
    let mut samples = DEFAULT_SAMPLES_PER_ALGORITHM;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--generate" => generate = true,
            "--alpha" => {
                let raw = iter.next().ok_or("--alpha requires a value")?;
                alpha = raw.parse().map_err(|_| format!("invalid alpha '{raw}'"))?;
            }
            "--value-col" => {
                value_column = iter.next().ok_or("--value-col requires a name")?.clone();
            }
            "--group-col" => {
                group_column = iter.next().ok_or("--group-col requires a name")?.clone();
            }
            "--seed" => {
                let raw = iter.next().ok_or("--seed requires a value")?;
                seed = raw.parse().map_err(|_| format!("invalid seed '{raw}'"))?;
            }
            "--samples" => {
                let raw = iter.next().ok_or("--samples requires a value")?;
                samples = raw.parse().map_err(|_| format!("invalid sample count '{raw}'"))?;
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{other}'"));
            }
            path => {
                if input_file.is_some() {
                    return Err(format!("unexpected extra argument '{path}'"));
                }
                input_file = Some(PathBuf::from(path));
            }
        }
    }

    if !(0.0 < alpha && alpha < 1.0) {
        return Err(format!("alpha must lie strictly between 0 and 1, got {alpha}"));
    }

    let input_file = input_file.ok_or("missing CSV file path")?;
    Ok(CliOptions {
        input_file,
        generate,
        alpha,
        value_column,
        group_column,
        seed,
        samples,
    })
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--version") {
        println!("control-anova {}", control_anova::crate_version());
        return;
    }
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        process::exit(1);
    }

    let options = match parse_cli(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    println!("{}", "=".repeat(60));
    println!("Robot Control Algorithm ANOVA Analysis");
    println!("{}", "=".repeat(60));

    // --- Step 1: Obtain the observation table ---
    let table = if options.generate {
        println!("\n[Step 1] Generating synthetic benchmark data...");
        let profiles = default_profiles();
        let table = generate_observations(&profiles, options.samples, options.seed)?;
        write_observation_csv(
            &table,
            &options.input_file,
            &options.value_column,
            &options.group_column,
        )?;
        println!(
            "  Wrote {} rows ({} per algorithm, seed {}) to '{}'.",
            table.len(),
            options.samples,
            options.seed,
            options.input_file.display()
        );
        table
    } else {
        println!("\n[Step 1] Loading data...");
        let table = parse_observation_file(
            &options.input_file,
            &options.value_column,
            &options.group_column,
        )?;
        println!("  Loaded {} observations from '{}'.", table.len(), options.input_file.display());
        table
    };

    // --- Step 2: Descriptive statistics ---
    println!("\n[Step 2] Descriptive statistics per algorithm...");
    let summaries = summarize_groups(&table);
    println!(
        "  {:<12} {:>7} {:>10} {:>10} {:>10} {:>10}",
        "Algorithm", "Count", "Mean", "Std Dev", "Min", "Max"
    );
    for s in &summaries {
        println!(
            "  {:<12} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            s.label, s.count, s.mean, s.std_dev, s.min, s.max
        );
    }

    // --- Step 3: One-way ANOVA ---
    println!("\n[Step 3] Running one-way ANOVA...");
    println!("{}", "-".repeat(60));
    let labels: Vec<&str> = table.labels().iter().map(|s| s.as_str()).collect();
    let (result, breakdown) = match one_way_anova(table.values(), &labels, options.alpha) {
        Ok(outcome) => outcome,
        Err(AnovaError::InvalidInput(message)) => {
            return Err(format!(
                "the benchmark table cannot support the test: {message}. \
                 Collect more samples or check the group column."
            )
            .into());
        }
        Err(AnovaError::DegenerateData(message)) => {
            return Err(format!(
                "the benchmark table is degenerate: {message}. \
                 Every measurement is constant within its group; ANOVA needs within-group scatter."
            )
            .into());
        }
    };

    println!("  Groups:                {}", breakdown.group_count);
    println!("  Total samples:         {}", breakdown.sample_count);
    println!("  Total variation:       {:.4}", breakdown.total_ss);
    println!("  Within-group:          {:.4}", breakdown.within_ss);
    println!("  Between-group:         {:.4}", breakdown.between_ss);
    println!("  Effect size (eta^2):   {:.4}", breakdown.effect_size);
    println!("  Degrees of freedom:    ({}, {})", breakdown.dfn, breakdown.dfd);
    println!();
    println!("  F-statistic:           {:.4}", result.f_value);
    println!(
        "  Critical value (a={}): {:.4}",
        options.alpha, result.critical_value
    );
    println!("  p-value:               {:.4}", result.p_value);
    println!(
        "  Significant:           {}",
        if result.is_significant { "yes" } else { "no" }
    );

    // --- Step 4: Interpretation ---
    println!("\n[Step 4] Interpretation...");
    println!("{}", "-".repeat(60));
    if result.is_significant {
        println!("  Reject H0: at least one algorithm's control error differs");
        println!(
            "  significantly from the others (F = {:.4} >= {:.4}).",
            result.f_value, result.critical_value
        );
    } else {
        println!("  Cannot reject H0: no significant difference in control error");
        println!("  between the algorithms at this significance level.");
    }

    // --- Step 5: Plots ---
    println!("\n[Step 5] Rendering plots...");
    let root_name = options
        .input_file
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let value_axis_label = format!("Control Error ({})", options.value_column);
    plot_error_box(&summaries, &root_name, &value_axis_label)?;
    plot_error_strip(&table.grouped(), &root_name, &value_axis_label)?;
    let plot_files = vec![
        format!("{root_name}_error_boxplot.png"),
        format!("{root_name}_error_strip.png"),
    ];

    // --- Step 6: Markdown report ---
    println!("\n[Step 6] Writing report...");
    // Like the plots, the report lands in the working directory.
    let report_path = PathBuf::from(format!("{root_name}_anova_report.md"));
    let data_file = options.input_file.display().to_string();
    let context = ReportContext {
        data_file: &data_file,
        alpha: options.alpha,
        value_column: &options.value_column,
        plot_files: &plot_files,
    };
    write_markdown_report(&report_path, &summaries, &result, &breakdown, &context)?;
    println!("  Report saved as '{}'.", report_path.display());

    // --- Step 7: Recommendation ---
    println!("\n[Step 7] Recommendation...");
    println!("{}", "-".repeat(60));
    print_recommendation(&summaries, result.is_significant);

    println!("\n{}", "=".repeat(60));
    println!("Analysis complete.");
    println!("{}", "=".repeat(60));
    Ok(())
}

fn print_recommendation(summaries: &[GroupSummary], is_significant: bool) {
    if !is_significant {
        println!("  The algorithms perform comparably; choose by computational cost,");
        println!("  implementation effort, and robustness requirements.");
        return;
    }

    let best = summaries
        .iter()
        .min_by(|a, b| a.mean.partial_cmp(&b.mean).unwrap_or(std::cmp::Ordering::Equal));
    let worst = summaries
        .iter()
        .max_by(|a, b| a.mean.partial_cmp(&b.mean).unwrap_or(std::cmp::Ordering::Equal));

    if let (Some(best), Some(worst)) = (best, worst) {
        println!(
            "  Recommended: {} (lowest mean control error, {:.2})",
            best.label, best.mean
        );
        println!(
            "  Not recommended: {} (highest mean control error, {:.2})",
            worst.label, worst.mean
        );
        println!("  Consider retuning the weaker algorithms before a rematch, and weigh");
        println!("  computational cost and real-time constraints alongside raw accuracy.");
    }
}
