//! Command-line interface for seqscan

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use seqscan::{CsvSink, MatchSink, TextSink};

#[derive(Parser)]
#[command(
    name = "seqscan",
    version,
    about = "Query NCBI sequence records and scan XML content with regular expressions"
)]
struct Cli {
    /// NCBI database name (e.g. "nucleotide")
    #[arg(short = 'd', long)]
    database: String,

    /// Record identifier within the database
    #[arg(short = 'i', long)]
    id: String,

    /// Pattern matched against element content
    #[arg(short = 'r', long = "regexp")]
    regexp: String,

    /// Pattern selecting which element names to scan
    #[arg(short = 't', long = "tag-regexp", default_value = r"^TSeq_sequence$")]
    tag_regexp: String,

    /// Also write matches to this CSV file
    #[arg(short = 'o', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Parse the response incrementally, reporting matches as they are found
    #[arg(long)]
    stream: bool,

    /// Response chunk size in bytes for streaming mode
    #[arg(long, default_value_t = seqscan::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Show a live match counter instead of per-match lines (implies --stream)
    #[cfg(feature = "dashboard")]
    #[arg(long)]
    dashboard: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> seqscan::Result<()> {
    #[cfg(feature = "dashboard")]
    let dashboard = cli.dashboard;
    #[cfg(not(feature = "dashboard"))]
    let dashboard = false;

    if cli.stream || dashboard {
        let mut sinks: Vec<Box<dyn MatchSink>> = Vec::new();
        if !dashboard {
            sinks.push(Box::new(TextSink::stdout()));
        }
        if let Some(path) = &cli.output_file {
            sinks.push(Box::new(CsvSink::create(path)?));
        }
        #[cfg(feature = "dashboard")]
        if cli.dashboard {
            sinks.push(Box::new(seqscan::DashboardSink::new()));
        }
        seqscan::query_stream(
            &cli.database,
            &cli.id,
            &cli.tag_regexp,
            &cli.regexp,
            &mut sinks,
            cli.chunk_size,
        )
    } else {
        let matches = seqscan::query(&cli.database, &cli.id, &cli.tag_regexp, &cli.regexp)?;
        if let Some(path) = &cli.output_file {
            let mut csv = CsvSink::create(path)?;
            for m in &matches {
                csv.accept(m)?;
            }
        }
        let mut console = TextSink::stdout();
        for m in &matches {
            console.accept(m)?;
        }
        Ok(())
    }
}
