use std::path::{Path, PathBuf};

use anyhow::Context;
use attendance_streaks::{
    assemble_report, detect_from_entries, loader, report, sample, track_attendance, AnalysisConfig,
    GuardianDirectory, ReportRow,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "attendance-streaks")]
#[command(about = "Flags prolonged absence streaks and drafts guardian notices", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect absence streaks and print report rows
    Analyze {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long, default_value = "absence-report.md")]
        out: PathBuf,
    },
    /// Run the analysis on the built-in sample data
    Sample {
        #[arg(long)]
        threshold: Option<u32>,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Args)]
struct Inputs {
    /// CSV with student_id,attendance_date,status
    #[arg(long)]
    attendance: PathBuf,
    /// CSV with student_id,student_name,parent_email
    #[arg(long)]
    guardians: PathBuf,
    /// Report streaks strictly longer than this many recorded absences
    #[arg(long)]
    threshold: Option<u32>,
    /// TOML file with analysis settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, threshold: Option<u32>) -> anyhow::Result<AnalysisConfig> {
    let mut config = AnalysisConfig::load(path).context("failed to load analysis config")?;
    if let Some(threshold) = threshold {
        config.min_days_exclusive = threshold;
    }
    Ok(config)
}

fn analyze(inputs: &Inputs) -> anyhow::Result<(AnalysisConfig, GuardianDirectory, Vec<ReportRow>)> {
    let config = load_config(inputs.config.as_deref(), inputs.threshold)?;
    let entries = loader::read_attendance_file(&inputs.attendance)
        .with_context(|| format!("failed to read {}", inputs.attendance.display()))?;
    let directory: GuardianDirectory = loader::read_guardians_file(&inputs.guardians)
        .with_context(|| format!("failed to read {}", inputs.guardians.display()))?
        .into_iter()
        .collect();

    let episodes = detect_from_entries(&entries, &config)?;
    let rows = assemble_report(&episodes, &directory);
    Ok((config, directory, rows))
}

fn print_rows(rows: &[ReportRow], format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => loader::write_rows_json(std::io::stdout().lock(), rows)?,
        Format::Csv => loader::write_rows_csv(std::io::stdout().lock(), rows)?,
        Format::Table => {
            if rows.is_empty() {
                println!("No prolonged absences found.");
                return Ok(());
            }

            println!("Prolonged absences:");
            for row in rows {
                println!(
                    "- student {} absent {} to {} ({} days), contact {}",
                    row.student_id,
                    row.start_date,
                    row.end_date,
                    row.days_missed,
                    row.contact_email.as_deref().unwrap_or("none")
                );
                if let Some(message) = &row.message {
                    println!("  {message}");
                }
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze { inputs, format } => {
            let (_, _, rows) = analyze(&inputs)?;
            print_rows(&rows, format)?;
        }
        Commands::Report { inputs, out } => {
            let (config, directory, rows) = analyze(&inputs)?;
            let markdown = report::build_markdown(config.min_days_exclusive, &rows, &directory);
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Sample { threshold, format } => {
            let config = load_config(None, threshold)?;
            let rows = track_attendance(&sample::attendance(), sample::guardians(), &config)?;
            print_rows(&rows, format)?;
        }
    }

    Ok(())
}
