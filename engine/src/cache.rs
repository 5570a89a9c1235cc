use crate::config::TokenizerConfig;
use crate::error::Result;
use crate::index::{Document, Index};
use parking_lot::RwLock;
use sha1::{Digest, Sha1};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

pub const DEFAULT_CAPACITY: usize = 8;

type Fingerprint = [u8; 20];

#[derive(Default)]
struct Entries {
    by_key: HashMap<Fingerprint, Arc<Index>>,
    order: VecDeque<Fingerprint>,
}

/// Shares built indexes between callers that search the same corpus.
///
/// Keys are a SHA-1 over every document (length-prefixed id and content) and
/// the tokenizer config. Indexes are built with no lock held and published
/// whole, so readers never see a partial build.
pub struct IndexCache {
    entries: RwLock<Entries>,
    capacity: usize,
    tokenizer: TokenizerConfig,
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            capacity: capacity.max(1),
            tokenizer: TokenizerConfig::default(),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerConfig) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn get_or_build(&self, documents: &[Document]) -> Result<Arc<Index>> {
        let key = fingerprint(documents, self.tokenizer);
        if let Some(index) = self.entries.read().by_key.get(&key) {
            tracing::trace!(num_docs = index.num_docs(), "index cache hit");
            return Ok(Arc::clone(index));
        }

        let built = Arc::new(Index::build_with(documents, self.tokenizer)?);

        let mut entries = self.entries.write();
        if let Some(existing) = entries.by_key.get(&key) {
            return Ok(Arc::clone(existing));
        }
        while entries.order.len() >= self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.by_key.remove(&oldest);
            }
        }
        entries.order.push_back(key);
        entries.by_key.insert(key, Arc::clone(&built));
        Ok(built)
    }

    pub fn len(&self) -> usize {
        self.entries.read().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.by_key.clear();
        entries.order.clear();
    }
}

fn fingerprint(documents: &[Document], tokenizer: TokenizerConfig) -> Fingerprint {
    let mut hasher = Sha1::new();
    hasher.update([tokenizer.nfkc as u8]);
    hasher.update((documents.len() as u64).to_le_bytes());
    for doc in documents {
        hasher.update((doc.id.len() as u64).to_le_bytes());
        hasher.update(doc.id.as_bytes());
        hasher.update((doc.content.len() as u64).to_le_bytes());
        hasher.update(doc.content.as_bytes());
    }
    let mut key = [0u8; 20];
    key.copy_from_slice(&hasher.finalize());
    key
}
