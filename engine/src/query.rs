use crate::config::{QueryOptions, Scoring};
use crate::index::{Index, TermId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: String,
    pub score: f64,
}

/// Ranked results plus the number of matches before any limit was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    pub total_hits: usize,
    pub results: Vec<ScoredResult>,
}

/// Run a keyword query with the default scoring and no limit.
pub fn query(index: &Index, keywords: &str) -> Vec<ScoredResult> {
    index.query(keywords)
}

impl Index {
    pub fn query(&self, keywords: &str) -> Vec<ScoredResult> {
        self.query_with(keywords, &QueryOptions::default())
    }

    pub fn query_with(&self, keywords: &str, opts: &QueryOptions) -> Vec<ScoredResult> {
        self.hits(keywords, opts).results
    }

    /// Score every document matching any query term, best first.
    pub fn hits(&self, keywords: &str, opts: &QueryOptions) -> Hits {
        let terms = self.tokenizer().tokenize(keywords);
        if terms.is_empty() || self.num_docs() == 0 {
            return Hits { total_hits: 0, results: Vec::new() };
        }

        let mut scores: Vec<f64> = vec![0.0; self.num_docs()];
        let mut matched_terms = 0usize;
        for (term, _pos) in &terms {
            for tid in self.resolve(term) {
                matched_terms += 1;
                accumulate(&mut scores, self, tid, opts.scoring());
            }
        }

        let mut results: Vec<ScoredResult> = scores
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score > 0.0)
            .filter_map(|(doc_id, score)| {
                self.external_id(doc_id as u32)
                    .map(|id| ScoredResult { id: id.to_string(), score })
            })
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        let total_hits = results.len();
        if let Some(k) = opts.limit() {
            results.truncate(k);
        }

        tracing::debug!(
            terms = terms.len(),
            matched_terms,
            hits = total_hits,
            returned = results.len(),
            "query evaluated"
        );
        Hits { total_hits, results }
    }

    /// Vocabulary terms containing `term` as a contiguous substring, exact match first.
    ///
    /// `term` must already be normalized. Each vocabulary term appears at most once.
    pub fn resolve(&self, term: &str) -> Vec<TermId> {
        if term.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<TermId> = self.term_id(term).into_iter().collect();
        // Only strictly longer terms can contain `term` without equalling it.
        out.extend(
            self.vocabulary()
                .iter()
                .enumerate()
                .filter(|(_, t)| t.len() > term.len() && t.contains(term))
                .map(|(i, _)| i as TermId),
        );
        out
    }
}

fn accumulate(scores: &mut [f64], index: &Index, tid: TermId, scoring: &Scoring) {
    for p in index.postings(tid) {
        scores[p.doc_id as usize] += scoring.contribution(p.position);
    }
}
