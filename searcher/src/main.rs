use anyhow::Result;
use clap::{Parser, Subcommand};
use engine::{Index, QueryOptions, Scoring, TokenizerConfig};
use searcher::{load_documents, run_query, stats};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "searcher")]
#[command(about = "Keyword search over a JSON document corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from the input and run one or more queries against it
    Query {
        /// Input path (.json, .jsonl, or a directory of them)
        #[arg(long)]
        input: PathBuf,
        /// Keyword query; repeat to run several against the same index
        #[arg(long = "query", short = 'q', required = true)]
        queries: Vec<String>,
        /// Keep only the top N results
        #[arg(long)]
        limit: Option<usize>,
        /// Flat score added per matching occurrence
        #[arg(long, default_value_t = 1.0)]
        base: f64,
        /// Weight of the lead-in bonus lead_weight / (position + 1)
        #[arg(long, default_value_t = 1.0)]
        lead_weight: f64,
        /// Apply NFKC normalization to documents and queries
        #[arg(long, default_value_t = false)]
        nfkc: bool,
    },
    /// Print document and vocabulary counts for the input
    Stats {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = false)]
        nfkc: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { input, queries, limit, base, lead_weight, nfkc } => {
            let opts = QueryOptions::new(Scoring::new(base, lead_weight)?, limit)?;
            let index = build_index(&input, nfkc)?;
            let mut out = io::stdout().lock();
            for q in &queries {
                let report = run_query(&index, q, &opts);
                tracing::info!(
                    query = %q,
                    total_hits = report.total_hits,
                    took_s = report.took_s,
                    "query complete"
                );
                serde_json::to_writer(&mut out, &report)?;
                out.write_all(b"\n")?;
            }
            Ok(())
        }
        Commands::Stats { input, nfkc } => {
            let index = build_index(&input, nfkc)?;
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, &stats(&index))?;
            out.write_all(b"\n")?;
            Ok(())
        }
    }
}

fn build_index(input: &Path, nfkc: bool) -> Result<Index> {
    let docs = load_documents(input)?;
    let index = Index::build_with(&docs, TokenizerConfig { nfkc })?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_terms = index.vocabulary().len(),
        "index built"
    );
    Ok(index)
}
