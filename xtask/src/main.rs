use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "ring-deque workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the RingDeque vs std::VecDeque benchmarks and write a report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCH: &str = "ring_deque_benchmark";
const BASELINE: &str = "std::VecDeque";

/// workload -> implementation -> ops/s (or elements/s when throughput is set)
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--bench", BENCH, "--release"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    println!("\n>>> Running {BENCH}");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("bench").arg("--bench").arg(BENCH);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context(format!("Failed to run {BENCH}"))?;
    if !status.success() {
        anyhow::bail!("Benchmark {BENCH} failed");
    }
    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let implementations: BTreeSet<&String> = results.values().flat_map(BTreeMap::keys).collect();

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;

    writeln!(file, "# RingDeque Benchmark Report")?;
    writeln!(file)?;

    write!(file, "| Workload |")?;
    for name in &implementations {
        write!(file, " {name} (Ops/s) | vs {BASELINE} |")?;
    }
    writeln!(file)?;

    write!(file, "|---|")?;
    for _ in &implementations {
        write!(file, "---|---|")?;
    }
    writeln!(file)?;

    for (workload, by_impl) in &results {
        write!(file, "| {workload} |")?;
        let baseline = by_impl.get(BASELINE).copied().unwrap_or(0.0);
        for name in &implementations {
            match by_impl.get(*name) {
                Some(ops) => {
                    let rel = if baseline > 0.0 { ops / baseline } else { 0.0 };
                    write!(file, " {} | **{rel:.2}x** |", format_ops(*ops))?;
                }
                None => write!(file, " N/A | - |")?,
            }
        }
        writeln!(file)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|s| s.to_str())
}

/// The parts of criterion's `benchmark.json` the report needs.
#[derive(Deserialize)]
struct BenchmarkMeta {
    group_id: String,
    function_id: Option<String>,
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Bytes(u64),
    BytesDecimal(u64),
    Elements(u64),
}

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Walks criterion's output tree. Layout:
/// `target/criterion/<group>/<function>/new/{estimates,benchmark}.json`.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if file_name(&path) != Some("report") {
                collect_results(&path, results)?;
            }
            continue;
        }
        if file_name(&path) != Some("estimates.json") {
            continue;
        }
        let Some(run_dir) = path.parent() else { continue };
        if file_name(run_dir) != Some("new") {
            continue;
        }

        let meta: BenchmarkMeta = read_json(&run_dir.join("benchmark.json"))?;
        let Some(function) = meta.function_id else { continue };
        let units = match meta.throughput {
            Some(Throughput::Elements(n) | Throughput::Bytes(n) | Throughput::BytesDecimal(n)) => n as f64,
            None => 1.0,
        };

        let estimates: Estimates = read_json(&path)?;
        let time_ns = estimates.mean.point_estimate;
        if time_ns <= 0.0 {
            continue;
        }
        results
            .entry(meta.group_id)
            .or_default()
            .insert(function, units * 1e9 / time_ns);
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
