//! In-memory keyword search over a corpus of documents.
//!
//! Build an [`Index`] once per corpus, then run any number of queries against
//! it. Query terms match every vocabulary token that contains them; each
//! occurrence adds `1 + 1 / (position + 1)` to its document's score.

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use cache::IndexCache;
pub use config::{QueryOptions, Scoring, TokenizerConfig};
pub use error::{Result, SearchError};
pub use index::{build, DocId, Document, Index, Posting, TermId};
pub use query::{query, Hits, ScoredResult};
pub use tokenizer::{tokenize, Tokenizer};

/// Build a fresh index over `documents` and run one query against it.
pub fn search(documents: &[Document], keywords: &str) -> Result<Vec<ScoredResult>> {
    Ok(Index::build(documents)?.query(keywords))
}
