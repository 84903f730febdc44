use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use phazegen::config::Config;
use phazegen::error::PhazeError;
use phazegen::pipeline::Pipeline;
use phazegen::therapy::{CrisprStatus, DefenseProfile};
use phazegen::{report, seqio, trial};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// PhazeGen CLI
#[derive(Parser)]
#[command(name = "phazegen")]
#[command(version = phazegen::VERSION)]
#[command(about = "Genome analysis and phage/antibiotic trial ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the therapeutic catalog
    Catalog {
        /// Emit CSV to stdout
        #[arg(long)]
        csv: bool,
    },

    /// Describe a therapeutic by name (e.g., "Meropenem")
    Describe {
        /// Therapeutic name (case-insensitive)
        name: String,
    },

    /// Analyze a genome and rank therapeutics against it
    Analyze {
        /// Input file (FASTA/FASTQ/plain text)
        file: Option<PathBuf>,
        /// Analyze this sequence instead of a file
        #[arg(long, conflicts_with = "file")]
        sequence: Option<String>,
        /// Analyze each record of FILE separately
        #[arg(long, requires = "file")]
        per_record: bool,
        /// Seed for reproducible random draws
        #[arg(long)]
        seed: Option<u64>,
        /// Emit CSV to stdout instead of JSON
        #[arg(long)]
        csv: bool,
        /// Also write the JSON result to this file
        #[arg(long)]
        json: Option<PathBuf>,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Threads (0 = all)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Run the therapeutic trial engine against a defense profile
    Trial {
        /// Comma-separated resistance genes (e.g., "blaKPC,aac(6')")
        #[arg(long, value_delimiter = ',')]
        genes: Vec<String>,
        /// CRISPR status: present or absent
        #[arg(long, default_value = "absent")]
        crispr: CrisprStatus,
        /// Seed for reproducible random draws
        #[arg(long)]
        seed: Option<u64>,
        /// Emit CSV to stdout
        #[arg(long)]
        csv: bool,
    },
}

fn main() {
    let log_level = std::env::var("PHAZEGEN_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        let exit_code = match e.downcast_ref::<PhazeError>() {
            Some(PhazeError::Configuration(_)) => 2,
            Some(PhazeError::Io(_)) => 3,
            Some(PhazeError::Parse(_)) => 4,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Catalog { csv } => cmd_catalog(csv),
        Commands::Describe { name } => cmd_describe(&name),
        Commands::Analyze { file, sequence, per_record, seed, csv, json, config, threads } => {
            let mut config = match config {
                Some(p) => Config::from_file(&p).with_context(|| format!("loading config {}", p.display()))?,
                None => Config::default(),
            };
            if let Some(t) = threads {
                config.execution.threads = t;
            }
            let threads = config.threads();
            let pipeline = Pipeline::new(config)?;

            if per_record {
                let file = file.ok_or_else(|| PhazeError::InvalidInput("--per-record needs a FILE".into()))?;
                let records = seqio::read_records(&file)?;
                let analyses = seqio::analyze_records(&pipeline, &records, Some(threads), seed)?;
                if let Some(out) = json {
                    write_json(&out, &analyses)?;
                }
                if csv {
                    let mut df = report::summary_frame(&analyses)?;
                    report::write_csv(&mut df, std::io::stdout())?;
                } else {
                    println!("{}", serde_json::to_string_pretty(&analyses).map_err(PhazeError::from)?);
                }
                return Ok(());
            }

            let raw = match (sequence, file) {
                (Some(s), _) => s,
                (None, Some(f)) => seqio::read_raw(&f)?,
                (None, None) => return Err(PhazeError::InvalidInput("give a FILE or --sequence".into()).into()),
            };
            let payload = match seed {
                Some(s) => pipeline.run_with_rng(&raw, &mut StdRng::seed_from_u64(s))?,
                None => pipeline.run(&raw)?,
            };
            if let Some(out) = json {
                write_json(&out, &payload)?;
            }
            if csv {
                let mut df = report::trials_frame(&payload.therapeutics)?;
                report::write_csv(&mut df, std::io::stdout())?;
            } else {
                println!("{}", serde_json::to_string_pretty(&payload).map_err(PhazeError::from)?);
            }
            Ok(())
        }
        Commands::Trial { genes, crispr, seed, csv } => {
            let genes = genes.into_iter().map(|g| g.trim().to_string()).filter(|g| !g.is_empty());
            let profile = DefenseProfile::new(genes, crispr);
            let results = match seed {
                Some(s) => trial::run_trials(&profile, &mut StdRng::seed_from_u64(s)),
                None => trial::run_trials_default(&profile),
            };
            if csv {
                let mut df = report::trials_frame(&results)?;
                report::write_csv(&mut df, std::io::stdout())?;
            } else {
                set_table_env();
                println!("{}", report::trials_frame(&results)?);
            }
            Ok(())
        }
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(PhazeError::from)?;
    std::fs::write(path, text).map_err(PhazeError::from).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn set_table_env() {
    // Read by the polars pretty-printer: show every row and column untruncated.
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_COLS", "100000");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "100000");
    std::env::set_var("POLARS_TABLE_WIDTH", "65535");
}

fn cmd_catalog(csv: bool) -> anyhow::Result<()> {
    let mut df = report::catalog_frame()?;
    if csv {
        report::write_csv(&mut df, std::io::stdout())?;
    } else {
        set_table_env();
        println!("{}", df);
    }
    Ok(())
}

fn cmd_describe(name: &str) -> anyhow::Result<()> {
    let t = phazegen::get_therapeutic(name)
        .ok_or_else(|| PhazeError::InvalidInput(format!("Unknown therapeutic: {name}")))?;
    println!("name: {}", t.name);
    println!("type: {}", t.kind());
    println!("target: {}", t.target);
    if let Some(e) = t.efficiency() {
        println!("efficiency: {e:?}");
    }
    if let Some(c) = t.class() {
        println!("class: {c}");
    }
    Ok(())
}
