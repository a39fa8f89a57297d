//! rulebench - eval vs indexed matching benchmark entry point
//!
//! One run, end to end:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Dataset  │───▶│  Driver  │───▶│  Report  │
//! │  (YAML)  │    │ (seeded) │    │ (verify) │    │ (txt/json)│
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//!
//! Driver responsibilities:
//! - Fresh session per iteration (insert + one evaluate_all)
//! - Satisfied-rule count checked against the known-match count,
//!   warm-up iterations included
//! - Single-shot timing only for the measured iterations
//! ```

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use rulebench::bench::{BenchParams, ScenarioReport, run_scenario};
use rulebench::config::AppConfig;
use rulebench::engine::ReferenceEngine;
use rulebench::scenario::Scenario;

// ============================================================
// ARGUMENTS
// ============================================================

fn arg_value(name: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn has_flag(name: &str) -> bool {
    std::env::args().any(|a| a == name)
}

fn get_env() -> Option<String> {
    arg_value("--env").or_else(|| arg_value("-e"))
}

fn get_output_dir() -> String {
    if has_flag("--baseline") {
        "baseline/default".to_string()
    } else {
        arg_value("--output").unwrap_or_else(|| "output".to_string())
    }
}

/// Fold CLI overrides into the loaded config
fn apply_overrides(config: &mut AppConfig) -> anyhow::Result<()> {
    if let Some(s) = arg_value("--scenario") {
        config.bench.scenario = s;
    }
    if let Some(n) = arg_value("--population").or_else(|| arg_value("-n")) {
        config.bench.population = n.parse().context("--population must be an integer")?;
    }
    if let Some(w) = arg_value("--warmup") {
        config.bench.warmup_iterations = w.parse().context("--warmup must be an integer")?;
    }
    if let Some(m) = arg_value("--iterations") {
        config.bench.measured_iterations =
            m.parse().context("--iterations must be an integer")?;
    }
    if let Some(s) = arg_value("--seed") {
        config.bench.seed = match s.as_str() {
            "random" => None,
            v => Some(v.parse().context("--seed must be an integer or 'random'")?),
        };
    }
    Ok(())
}

/// Resolve the scenario list: "both" runs eval then indexed
fn resolve_scenarios(name: &str) -> anyhow::Result<Vec<Scenario>> {
    if name.trim().eq_ignore_ascii_case("both") {
        return Ok(Scenario::ALL.to_vec());
    }
    Ok(vec![name.parse()?])
}

// ============================================================
// REPORTS
// ============================================================

fn print_summary(report: &ScenarioReport, measured: u32) {
    let stats = &report.stats;
    let (insert_pct, evaluate_pct) = stats.breakdown_pct();
    let summary = format!(
        r#"=== Scenario Summary: {} ===
Population: {} linked pairs
Known Matches: {} (verified every iteration)
Iterations: {} warm-up + {} measured

=== Single-Shot Latency (insert + evaluate) ===
  Min:   {:>10} ns
  Avg:   {:>10} ns
  P50:   {:>10} ns
  P99:   {:>10} ns
  Max:   {:>10} ns
Samples: {}

=== Phase Breakdown ===
  Insert:   {:>6.1}% ({} ns)
  Evaluate: {:>6.1}% ({} ns)
"#,
        report.scenario,
        report.population,
        report.expected_matches,
        report.warmup_iterations,
        measured,
        stats.min().unwrap_or(0),
        stats.avg().unwrap_or(0),
        stats.percentile(50.0).unwrap_or(0),
        stats.percentile(99.0).unwrap_or(0),
        stats.max().unwrap_or(0),
        stats.len(),
        insert_pct,
        stats.total_insert_ns,
        evaluate_pct,
        stats.total_evaluate_ns,
    );
    println!("\n{}", summary);
}

fn seed_label(seed: Option<u64>) -> String {
    match seed {
        Some(s) => s.to_string(),
        None => "random".to_string(),
    }
}

/// Write the key=value baseline file for regression tracking
fn write_baseline(
    output_dir: &str,
    report: &ScenarioReport,
    params: &BenchParams,
) -> anyhow::Result<String> {
    let path = format!("{}/bench_{}.txt", output_dir, report.scenario);
    let mut file = File::create(&path).with_context(|| format!("Failed to create {}", path))?;
    let stats = &report.stats;

    writeln!(file, "# Benchmark Baseline - rulebench")?;
    writeln!(
        file,
        "# Generated: {} (build {})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        env!("BUILD_GIT_HASH")
    )?;
    writeln!(file, "scenario={}", report.scenario)?;
    writeln!(file, "population={}", report.population)?;
    writeln!(file, "known_matches={}", report.expected_matches)?;
    writeln!(file, "warmup_iterations={}", params.warmup_iterations)?;
    writeln!(file, "measured_iterations={}", params.measured_iterations)?;
    writeln!(file, "seed={}", seed_label(params.seed))?;
    writeln!(file, "single_shot_min_ns={}", stats.min().unwrap_or(0))?;
    writeln!(file, "single_shot_avg_ns={}", stats.avg().unwrap_or(0))?;
    writeln!(
        file,
        "single_shot_p50_ns={}",
        stats.percentile(50.0).unwrap_or(0)
    )?;
    writeln!(
        file,
        "single_shot_p99_ns={}",
        stats.percentile(99.0).unwrap_or(0)
    )?;
    writeln!(file, "single_shot_max_ns={}", stats.max().unwrap_or(0))?;
    writeln!(file, "insert_ns={}", stats.total_insert_ns)?;
    writeln!(file, "evaluate_ns={}", stats.total_evaluate_ns)?;
    writeln!(file, "samples={}", stats.len())?;

    Ok(path)
}

/// Machine-readable copy of one scenario report
#[derive(Serialize)]
struct JsonReport<'a> {
    scenario: &'a str,
    population: usize,
    known_matches: usize,
    warmup_iterations: u32,
    measured_iterations: u32,
    seed: Option<u64>,
    build: &'static str,
    samples_ns: &'a [u64],
    insert_ns: u64,
    evaluate_ns: u64,
    single_shot_min_ns: u64,
    single_shot_avg_ns: u64,
    single_shot_p50_ns: u64,
    single_shot_p99_ns: u64,
    single_shot_max_ns: u64,
}

fn write_json(
    output_dir: &str,
    report: &ScenarioReport,
    params: &BenchParams,
) -> anyhow::Result<String> {
    let stats = &report.stats;
    let json = JsonReport {
        scenario: report.scenario.as_str(),
        population: report.population,
        known_matches: report.expected_matches,
        warmup_iterations: params.warmup_iterations,
        measured_iterations: params.measured_iterations,
        seed: params.seed,
        build: env!("BUILD_GIT_HASH"),
        samples_ns: &stats.samples,
        insert_ns: stats.total_insert_ns,
        evaluate_ns: stats.total_evaluate_ns,
        single_shot_min_ns: stats.min().unwrap_or(0),
        single_shot_avg_ns: stats.avg().unwrap_or(0),
        single_shot_p50_ns: stats.percentile(50.0).unwrap_or(0),
        single_shot_p99_ns: stats.percentile(99.0).unwrap_or(0),
        single_shot_max_ns: stats.max().unwrap_or(0),
    };

    let path = format!("{}/bench_{}.json", output_dir, report.scenario);
    let content = serde_json::to_string_pretty(&json)?;
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path))?;
    Ok(path)
}

fn print_comparison(reports: &[ScenarioReport]) {
    let eval = reports.iter().find(|r| r.scenario == Scenario::Eval);
    let indexed = reports.iter().find(|r| r.scenario == Scenario::Indexed);
    let (Some(eval), Some(indexed)) = (eval, indexed) else {
        return;
    };
    let (Some(eval_p50), Some(indexed_p50)) =
        (eval.stats.percentile(50.0), indexed.stats.percentile(50.0))
    else {
        return;
    };

    println!("=== Comparison (median single-shot) ===");
    println!("  eval:    {:>10} ns", eval_p50);
    println!("  indexed: {:>10} ns", indexed_p50);
    if indexed_p50 > 0 {
        println!(
            "  indexed is {:.2}x faster than eval",
            eval_p50 as f64 / indexed_p50 as f64
        );
    }
}

// ============================================================
// MAIN
// ============================================================

fn main() -> anyhow::Result<()> {
    let mut config = match get_env() {
        Some(env) => AppConfig::load(&env)?,
        None => AppConfig::default(),
    };
    apply_overrides(&mut config)?;
    let _log_guard = rulebench::logging::init_logging(&config);

    println!("=== rulebench: eval vs indexed matching ===");

    // Step 1: Resolve the run plan
    println!("[1] Resolving run plan...");
    let scenarios = resolve_scenarios(&config.bench.scenario)?;
    let output_dir = get_output_dir();
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output dir {}", output_dir))?;
    println!(
        "    scenarios: {:?} | population: {} | warmup: {} | measured: {} | seed: {}",
        scenarios.iter().map(Scenario::as_str).collect::<Vec<_>>(),
        config.bench.population,
        config.bench.warmup_iterations,
        config.bench.measured_iterations,
        seed_label(config.bench.seed),
    );
    println!("    output directory: {}/", output_dir);

    // Step 2+: One step per scenario
    let engine = ReferenceEngine;
    let mut reports: Vec<ScenarioReport> = Vec::with_capacity(scenarios.len());
    for (i, scenario) in scenarios.iter().enumerate() {
        println!("\n[{}] Running scenario: {}...", i + 2, scenario);
        let params = BenchParams {
            scenario: *scenario,
            population: config.bench.population,
            warmup_iterations: config.bench.warmup_iterations,
            measured_iterations: config.bench.measured_iterations,
            seed: config.bench.seed,
        };

        let report = match run_scenario(&engine, &params, &config.bench.known_matches) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(scenario = %scenario, error = %e, "run aborted");
                return Err(e.into());
            }
        };
        print_summary(&report, params.measured_iterations);

        let baseline_path = write_baseline(&output_dir, &report, &params)?;
        println!("Baseline written to {}", baseline_path);
        if has_flag("--json") {
            let json_path = write_json(&output_dir, &report, &params)?;
            println!("JSON report written to {}", json_path);
        }

        reports.push(report);
    }

    if reports.len() == 2 {
        println!();
        print_comparison(&reports);
    }

    println!("\n=== Done ===");
    Ok(())
}
