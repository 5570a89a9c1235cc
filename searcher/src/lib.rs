use anyhow::{Context, Result};
use engine::{Document, Index, QueryOptions, ScoredResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<ScoredResult>,
}

#[derive(Debug, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_postings: usize,
}

/// Load documents from a `.json`/`.jsonl` file, or every such file under a directory.
pub fn load_documents(input: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", input.display()))?;
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", input.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if extension(&file) == Some("jsonl") {
            load_jsonl(&file, &mut docs)?;
        } else {
            load_json(&file, &mut docs)?;
        }
    }
    tracing::info!(num_docs = docs.len(), input = %input.display(), "loaded documents");
    Ok(docs)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn load_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("{}:{}: unreadable line", file.display(), lineno + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn load_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("{}: invalid JSON", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.into_iter().enumerate() {
                let doc: Document = serde_json::from_value(v)
                    .with_context(|| format!("{}: invalid document at index {i}", file.display()))?;
                docs.push(doc);
            }
        }
        serde_json::Value::Object(_) => {
            let doc: Document = serde_json::from_value(json)
                .with_context(|| format!("{}: invalid document", file.display()))?;
            docs.push(doc);
        }
        _ => anyhow::bail!("{}: expected a document or an array of documents", file.display()),
    }
    Ok(())
}

pub fn run_query(index: &Index, query: &str, opts: &QueryOptions) -> QueryReport {
    let start = Instant::now();
    let hits = index.hits(query, opts);
    let elapsed = start.elapsed();
    QueryReport {
        query: query.to_string(),
        took_s: elapsed.as_secs_f64(),
        total_hits: hits.total_hits,
        results: hits.results,
    }
}

pub fn stats(index: &Index) -> IndexStats {
    IndexStats {
        num_docs: index.num_docs(),
        num_terms: index.vocabulary().len(),
        num_postings: index.num_postings(),
    }
}
