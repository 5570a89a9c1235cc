use crate::config::TokenizerConfig;
use crate::error::{Result, SearchError};
use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), content: content.into() }
    }
}

/// One occurrence of a term. `doc_id` is the document's ordinal in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub position: u32,
}

/// Immutable inverted index over one corpus.
///
/// Postings for all terms live in a single arena, grouped by term in
/// vocabulary order. `offsets[t]..offsets[t + 1]` is the slice for term `t`,
/// ordered by doc id then position.
#[derive(Debug, Clone, Default)]
pub struct Index {
    doc_ids: Vec<String>,
    doc_lookup: HashMap<String, DocId>,
    vocabulary: Vec<String>,
    offsets: Vec<u32>,
    postings: Vec<Posting>,
    tokenizer: TokenizerConfig,
}

/// Build an index with the default tokenizer configuration.
pub fn build(documents: &[Document]) -> Result<Index> {
    Index::build(documents)
}

impl Index {
    pub fn build(documents: &[Document]) -> Result<Self> {
        Self::build_with(documents, TokenizerConfig::default())
    }

    pub fn build_with(documents: &[Document], config: TokenizerConfig) -> Result<Self> {
        // Reject bad input before any index state exists.
        for (i, doc) in documents.iter().enumerate() {
            if doc.id.is_empty() {
                return Err(SearchError::InvalidInput(format!(
                    "document at position {i} has an empty id"
                )));
            }
        }

        let tokenizer = Tokenizer::new(config);
        let mut doc_ids: Vec<String> = Vec::with_capacity(documents.len());
        let mut doc_lookup: HashMap<String, DocId> = HashMap::with_capacity(documents.len());
        let mut postings_raw: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut num_postings: usize = 0;

        for doc in documents {
            if doc_lookup.contains_key(&doc.id) {
                tracing::warn!(id = %doc.id, "duplicate document id, keeping first occurrence");
                continue;
            }
            let doc_id = DocId::try_from(doc_ids.len()).map_err(|_| {
                SearchError::InvalidInput("corpus exceeds u32::MAX documents".into())
            })?;
            doc_lookup.insert(doc.id.clone(), doc_id);
            doc_ids.push(doc.id.clone());

            for (term, pos) in tokenizer.tokenize(&doc.content) {
                let position = u32::try_from(pos).map_err(|_| {
                    SearchError::InvalidInput(format!("document {} has too many tokens", doc.id))
                })?;
                // Documents are visited in doc id order, so each list stays sorted.
                postings_raw.entry(term).or_default().push(Posting { doc_id, position });
                num_postings += 1;
            }
        }

        let mut terms: Vec<(String, Vec<Posting>)> = postings_raw.into_iter().collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut vocabulary = Vec::with_capacity(terms.len());
        let mut offsets = Vec::with_capacity(terms.len() + 1);
        let mut postings = Vec::with_capacity(num_postings);
        offsets.push(0u32);
        for (term, plist) in terms {
            postings.extend(plist);
            let end = u32::try_from(postings.len()).map_err(|_| {
                SearchError::InvalidInput("corpus exceeds u32::MAX postings".into())
            })?;
            offsets.push(end);
            vocabulary.push(term);
        }

        tracing::debug!(
            num_docs = doc_ids.len(),
            num_terms = vocabulary.len(),
            num_postings = postings.len(),
            "index built"
        );

        Ok(Self { doc_ids, doc_lookup, vocabulary, offsets, postings, tokenizer: config })
    }

    pub fn num_docs(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn num_postings(&self) -> usize {
        self.postings.len()
    }

    /// Distinct tokens in ascending byte order. A term's position here is its `TermId`.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn term(&self, term_id: TermId) -> Option<&str> {
        self.vocabulary.get(term_id as usize).map(String::as_str)
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
            .map(|i| i as TermId)
    }

    pub fn postings(&self, term_id: TermId) -> &[Posting] {
        let t = term_id as usize;
        if t >= self.vocabulary.len() {
            return &[];
        }
        &self.postings[self.offsets[t] as usize..self.offsets[t + 1] as usize]
    }

    pub fn doc_id(&self, external_id: &str) -> Option<DocId> {
        self.doc_lookup.get(external_id).copied()
    }

    pub fn external_id(&self, doc_id: DocId) -> Option<&str> {
        self.doc_ids.get(doc_id as usize).map(String::as_str)
    }

    pub fn tokenizer_config(&self) -> TokenizerConfig {
        self.tokenizer
    }

    pub(crate) fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.tokenizer)
    }
}
