mod config;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod shuffle;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::EvalConfig;
use crate::input::corpus::{read_gold_triples, read_parallel};
use crate::input::source::DumpSource;
use crate::input::translate::build_translators;
use crate::pipeline::stage1_gold::run_stage1;
use crate::pipeline::stage2_units::run_stage2;
use crate::pipeline::stage3_aggregate::run_stage3;
use crate::pipeline::stage4_report::{build_summary, write_reports};
use crate::pipeline::write_jsonl;
use crate::report::csv::CsvWriter;
use crate::shuffle::Shuffler;

const GOLD_UNITS_FILE: &str = "gold_units.jsonl";
const DATA_UNITS_FILE: &str = "units.jsonl";
const RESULTS_CSV_FILE: &str = "results.csv";

#[derive(Debug, Parser)]
#[command(
    name = "crowd-transeval",
    version,
    about = "Crowdsourced machine-translation evaluation: gold units and inter-rater agreement reports"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Build gold units with shuffled distractors from a gold file.
    Gold(GoldArgs),
    /// Translate source sentences with every configured service.
    Units(UnitsArgs),
    /// Aggregate judgments into the audit CSV and agreement reports.
    Report(ReportArgs),
}

#[derive(Debug, Args)]
struct GoldArgs {
    #[arg(long)]
    config: PathBuf,
    /// Line triples: source, reference, correct translation.
    #[arg(long)]
    gold: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Maximum block swaps per distractor (1-5).
    #[arg(long)]
    degree: Option<u8>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct UnitsArgs {
    #[arg(long)]
    config: PathBuf,
    #[arg(long)]
    source: PathBuf,
    #[arg(long)]
    reference: PathBuf,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct ReportArgs {
    #[arg(long)]
    config: PathBuf,
    /// Job export (JSON, optionally gzipped).
    #[arg(long)]
    judgments: PathBuf,
    #[arg(long)]
    out: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Cmd) -> Result<(), String> {
    match command {
        Cmd::Gold(args) => run_gold(&args),
        Cmd::Units(args) => run_units(&args),
        Cmd::Report(args) => run_report(&args),
    }
}

fn run_gold(args: &GoldArgs) -> Result<(), String> {
    let config = EvalConfig::load(&args.config).map_err(|e| e.to_string())?;
    let degree = args.degree.unwrap_or(config.shuffle_degree);
    let shuffler = Shuffler::new(degree).map_err(|e| e.to_string())?;
    let mut rng = make_rng(args.seed.or(config.seed));

    let triples = read_gold_triples(&args.gold).map_err(|e| e.to_string())?;
    let stage1 =
        run_stage1(&triples, &config.services(), &shuffler, &mut rng).map_err(|e| e.to_string())?;

    std::fs::create_dir_all(&args.out).map_err(|e| e.to_string())?;
    let path = args.out.join(GOLD_UNITS_FILE);
    write_jsonl(&path, &stage1.documents()).map_err(|e| e.to_string())?;
    println!("gold units: {} -> {}", stage1.units.len(), path.display());
    Ok(())
}

fn run_units(args: &UnitsArgs) -> Result<(), String> {
    let config = EvalConfig::load(&args.config).map_err(|e| e.to_string())?;
    let translators = build_translators(&config.services).map_err(|e| e.to_string())?;
    let pairs = read_parallel(&args.source, &args.reference).map_err(|e| e.to_string())?;

    let stage2 = run_stage2(&pairs, &translators, &config.source_lang, &config.target_lang);

    std::fs::create_dir_all(&args.out).map_err(|e| e.to_string())?;
    let path = args.out.join(DATA_UNITS_FILE);
    write_jsonl(&path, &stage2.documents).map_err(|e| e.to_string())?;
    println!(
        "data units: {} -> {} (skipped sentences: {})",
        stage2.documents.len(),
        path.display(),
        stage2.skipped.len()
    );
    for skipped in &stage2.skipped {
        println!("  line {}: {}", skipped.line, skipped.reason);
    }
    Ok(())
}

fn run_report(args: &ReportArgs) -> Result<(), String> {
    let config = EvalConfig::load(&args.config).map_err(|e| e.to_string())?;
    let services = config.services();
    let source = DumpSource::open(&args.judgments).map_err(|e| e.to_string())?;

    std::fs::create_dir_all(&args.out).map_err(|e| e.to_string())?;
    let csv_path = results_csv_path(&args.out);
    let mut csv = CsvWriter::create(&csv_path).map_err(|e| e.to_string())?;
    let stage3 = run_stage3(&source, &services, &mut csv).map_err(|e| e.to_string())?;
    let rows = csv.rows();
    csv.finish().map_err(|e| e.to_string())?;
    tracing::info!(path = %csv_path.display(), rows, "results written");

    let summary = build_summary(&stage3);
    write_reports(&summary, &args.out).map_err(|e| e.to_string())?;

    if !stage3.skipped.is_empty() {
        tracing::warn!(skipped = stage3.skipped.len(), "some units were skipped");
    }
    println!(
        "units aggregated: {}, skipped: {}",
        stage3.units_processed,
        stage3.skipped.len()
    );
    Ok(())
}

fn results_csv_path(out_dir: &Path) -> PathBuf {
    out_dir.join(RESULTS_CSV_FILE)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
