use clap::{Parser, Subcommand};
use quote_compare::config::{self, Config};
use quote_compare::pdf_extract::load_document;
use quote_compare::sentiment::{Lexicon, TextStats};
use quote_compare::{Rubric, pipeline, report, score_quote};
use std::path::PathBuf;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quote-compare", version, about = "Score and compare supplier quotes")]
struct Cli {
    /// TOML config file (missing file means defaults)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score two quotes and recommend the better one
    Compare {
        /// First quote (defaults to `documents.first` from the config)
        first: Option<PathBuf>,
        /// Second quote (defaults to `documents.second` from the config)
        second: Option<PathBuf>,
        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Score an empty record for a single unreadable document instead of failing
        #[arg(long)]
        allow_partial: bool,
        /// Evaluate validity dates as of this day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        as_of: Option<Date>,
    },
    /// Extract and score a single quote
    Extract {
        file: PathBuf,
        #[arg(long)]
        json: bool,
        #[arg(long, value_parser = parse_date)]
        as_of: Option<Date>,
    },
    /// Word statistics and sentiment for a single document
    Analyze {
        file: PathBuf,
        /// How many of the most frequent tokens to list
        #[arg(long, default_value_t = 3)]
        top: usize,
        #[arg(long)]
        json: bool,
    },
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_or_default(&cli.config)?;

    // init tracing; RUST_LOG wins over the config file
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let today = |as_of: Option<Date>| as_of.unwrap_or_else(|| OffsetDateTime::now_utc().date());

    match cli.command {
        Command::Compare {
            first,
            second,
            json,
            allow_partial,
            as_of,
        } => {
            let first = first.unwrap_or_else(|| PathBuf::from(&cfg.documents.first));
            let second = second.unwrap_or_else(|| PathBuf::from(&cfg.documents.second));
            info!(first = %first.display(), second = %second.display(), "Comparing quotes");

            // The two documents are independent; decode them side by side.
            let (ingest_a, ingest_b) = (cfg.ingest.clone(), cfg.ingest.clone());
            let (text_a, text_b) = tokio::try_join!(
                tokio::task::spawn_blocking(move || load_document(&first, &ingest_a)),
                tokio::task::spawn_blocking(move || load_document(&second, &ingest_b)),
            )?;

            let eval = pipeline::evaluate_pair(
                text_a,
                text_b,
                allow_partial,
                &Rubric::default(),
                today(as_of),
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&eval)?);
            } else {
                print!("{}", report::render_comparison(&eval));
            }
        }
        Command::Extract { file, json, as_of } => {
            let text = load_document(&file, &cfg.ingest)?;
            let record = pipeline::extract_logged("document", &text);
            let result = score_quote(&record, &Rubric::default(), today(as_of));

            if json {
                let out = serde_json::json!({ "record": record, "score": result });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", report::render_record(&record, &result));
            }
        }
        Command::Analyze { file, top, json } => {
            let text = load_document(&file, &cfg.ingest)?;
            let stats = TextStats::from_text(&text, &Lexicon, top);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", report::render_stats(&stats));
            }
        }
    }

    Ok(())
}
