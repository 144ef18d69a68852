//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides an interactive exploration session, a one-shot report command and
//! a listing of the available city datasets.

use anyhow::{Context, Result};
use bikeshare_stats::{
    city::City,
    dataset::{dataset_path, load_city},
    filter::{DaySelector, MonthSelector},
    output::{SummaryRow, append_record, print_pretty, render_rows, render_text, to_json},
    prompt::Prompter,
    record::RecordSet,
    report::{Query, QueryOutcome},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const PEEK_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a city, month and day and show statistics (default)
    Explore,
    /// Compute statistics for one city/month/day selection
    Report {
        /// Chicago, "New York City" or Washington
        #[arg(short, long)]
        city: City,

        /// Full month name, or "all" for no month filter
        #[arg(short, long, default_value = "all")]
        month: MonthSelector,

        /// Full day name, or "all" for no day filter
        #[arg(short, long, default_value = "all")]
        day: DaySelector,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Optional: CSV file to append a summary row to
        #[arg(short, long)]
        output: Option<String>,

        /// Also print the first N raw rows of the selection
        #[arg(long, default_value_t = 0)]
        peek: usize,
    },
    /// List the known city datasets
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);
    debug!(data_dir = %data_dir.display(), "Data directory resolved");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => explore(&data_dir)?,
        Commands::Report {
            city,
            month,
            day,
            format,
            output,
            peek,
        } => {
            let records = load(&data_dir, city)?;
            let query = Query::new(city, month, day);
            let outcome = query.run(&records)?;
            print_pretty(&outcome);

            let mut stdout = io::stdout().lock();
            match format {
                Format::Text => write!(stdout, "{}", render_text(&outcome))?,
                Format::Json => writeln!(stdout, "{}", to_json(&outcome)?)?,
            }
            if peek > 0 {
                let subset = query.select(&records);
                write!(stdout, "{}", render_rows(subset.records(), 0, peek))?;
            }

            if let Some(path) = output {
                append_record(&path, &SummaryRow::from_outcome(&outcome))?;
                info!(path = %path, "Summary row appended");
            }
        }
        Commands::Cities => {
            let mut stdout = io::stdout().lock();
            for city in City::ALL {
                let path = dataset_path(&data_dir, city);
                writeln!(
                    stdout,
                    "{:<14} {:<40} demographics: {:<3} present: {}",
                    city.display_name(),
                    path.display(),
                    if city.has_demographics() { "yes" } else { "no" },
                    if path.exists() { "yes" } else { "no" },
                )?;
            }
        }
    }

    Ok(())
}

/// `--data-dir`, else `BIKESHARE_DATA_DIR`, else `./data`.
fn resolve_data_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn load(data_dir: &Path, city: City) -> Result<RecordSet> {
    load_city(data_dir, city).with_context(|| {
        format!(
            "failed to load {} data from {}",
            city,
            dataset_path(data_dir, city).display()
        )
    })
}

/// Prompt, report, optionally page through raw rows, and offer to restart.
///
/// Datasets are loaded at most once per session.
fn explore(data_dir: &Path) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut loaded: HashMap<City, RecordSet> = HashMap::new();

    loop {
        let query = prompter.ask_query()?;

        let records = match loaded.entry(query.city) {
            std::collections::hash_map::Entry::Occupied(e) => e.into_mut(),
            std::collections::hash_map::Entry::Vacant(e) => e.insert(load(data_dir, query.city)?),
        };

        let outcome = query.run(records)?;
        print_pretty(&outcome);
        write!(prompter.output(), "{}", render_text(&outcome))?;

        if let QueryOutcome::Report(_) = outcome {
            let subset = query.select(records);
            let mut offset = 0;
            while offset < subset.len()
                && prompter.confirm("Would you like to view 5 rows of data?: ")?
            {
                let page = render_rows(subset.records(), offset, PEEK_ROWS);
                write!(prompter.output(), "{}", page)?;
                offset += PEEK_ROWS;
            }
        }

        if !prompter.confirm("\nWould you like to restart? Enter yes or no.\n")? {
            break;
        }
    }

    Ok(())
}
