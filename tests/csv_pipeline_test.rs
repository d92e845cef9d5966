// tests/csv_pipeline_test.rs

use std::fs;
use std::path::PathBuf;

use control_anova::data_analysis::anova::one_way_anova;
use control_anova::data_analysis::descriptive::summarize_groups;
use control_anova::data_generation::synthetic::{
    default_profiles, generate_observations, write_observation_csv,
};
use control_anova::data_input::csv_loader::{parse_observation_file, parse_observation_records};

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("control_anova_{}_{}", std::process::id(), name));
    path
}

#[test]
fn csv_text_flows_through_to_a_test_result() {
    let csv = "\
error,algorithm
14.2,PID
16.1,PID
15.3,PID
10.1,LQR
9.4,LQR
10.8,LQR
7.2,MPC
6.8,MPC
7.5,MPC
";
    let table = parse_observation_records(csv.as_bytes(), "error", "algorithm").unwrap();
    assert_eq!(table.len(), 9);
    assert_eq!(table.group_labels(), vec!["PID", "LQR", "MPC"]);

    let labels: Vec<&str> = table.labels().iter().map(|s| s.as_str()).collect();
    let (result, breakdown) = one_way_anova(table.values(), &labels, 0.05).unwrap();
    assert_eq!(breakdown.dfn, 2);
    assert_eq!(breakdown.dfd, 6);
    assert!(result.is_significant);
}

#[test]
fn generated_file_round_trips_through_the_loader() {
    let path = temp_path("roundtrip.csv");
    let profiles = default_profiles();
    let generated = generate_observations(&profiles, 12, 42).unwrap();
    write_observation_csv(&generated, &path, "error", "algorithm").unwrap();

    let loaded = parse_observation_file(&path, "error", "algorithm").unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded.len(), generated.len());
    assert_eq!(loaded.labels(), generated.labels());
    for (a, b) in loaded.values().iter().zip(generated.values().iter()) {
        assert!((a - b).abs() < 1e-12, "value drifted through CSV: {a} vs {b}");
    }
}

#[test]
fn default_benchmark_profiles_separate_significantly() {
    // With 30 samples per algorithm and means 15/10/7 mm, the difference
    // must be detected at the default significance level.
    let profiles = default_profiles();
    let table = generate_observations(&profiles, 30, 42).unwrap();
    let labels: Vec<&str> = table.labels().iter().map(|s| s.as_str()).collect();
    let (result, breakdown) = one_way_anova(table.values(), &labels, 0.05).unwrap();

    assert_eq!(breakdown.group_count, 3);
    assert_eq!(breakdown.sample_count, 90);
    assert_eq!(breakdown.dfn, 2);
    assert_eq!(breakdown.dfd, 87);
    assert!(result.is_significant);
    assert!(result.p_value < 0.001);

    // Descriptive statistics must mirror the profile ordering.
    let summaries = summarize_groups(&table);
    let mean_of = |label: &str| {
        summaries
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.mean)
            .unwrap()
    };
    assert!(mean_of("PID") > mean_of("LQR"));
    assert!(mean_of("LQR") > mean_of("MPC"));
}

#[test]
fn missing_file_error_mentions_the_generator() {
    let missing = temp_path("does_not_exist.csv");
    let err = parse_observation_file(&missing, "error", "algorithm")
        .err()
        .expect("must fail");
    assert!(err.to_string().contains("--generate"));
}
