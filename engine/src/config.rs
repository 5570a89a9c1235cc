use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Smallest accepted scoring weight.
pub const MIN_WEIGHT: f64 = 1e-12;
/// Largest accepted scoring weight. Keeps accumulated scores over any
/// `u32`-addressable postings arena finite.
pub const MAX_WEIGHT: f64 = 1e12;

/// Text normalization applied identically to documents and queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Apply NFKC compatibility normalization before lower-casing.
    pub nfkc: bool,
}

/// Per-occurrence contribution: `base + lead_weight / (position + 1)`.
///
/// Only constructible through validation, so every contribution is positive,
/// finite and strictly decreasing in position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoringFields")]
pub struct Scoring {
    base: f64,
    lead_weight: f64,
}

#[derive(Deserialize)]
#[serde(default)]
struct ScoringFields {
    base: f64,
    lead_weight: f64,
}

impl Default for ScoringFields {
    fn default() -> Self {
        let s = Scoring::default();
        Self { base: s.base, lead_weight: s.lead_weight }
    }
}

impl TryFrom<ScoringFields> for Scoring {
    type Error = SearchError;

    fn try_from(f: ScoringFields) -> Result<Self> {
        Scoring::new(f.base, f.lead_weight)
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self { base: 1.0, lead_weight: 1.0 }
    }
}

fn check_weight(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(MIN_WEIGHT..=MAX_WEIGHT).contains(&value) {
        return Err(SearchError::InvalidConfig(format!(
            "scoring {name} must be within [{MIN_WEIGHT:e}, {MAX_WEIGHT:e}], got {value}"
        )));
    }
    Ok(())
}

impl Scoring {
    pub fn new(base: f64, lead_weight: f64) -> Result<Self> {
        check_weight("base", base)?;
        check_weight("lead_weight", lead_weight)?;
        Ok(Self { base, lead_weight })
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn lead_weight(&self) -> f64 {
        self.lead_weight
    }

    #[inline]
    pub fn contribution(&self, position: u32) -> f64 {
        self.base + self.lead_weight / (position as f64 + 1.0)
    }
}

/// Options for a single query run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QueryOptionsFields")]
pub struct QueryOptions {
    scoring: Scoring,
    limit: Option<usize>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct QueryOptionsFields {
    scoring: Scoring,
    limit: Option<usize>,
}

impl TryFrom<QueryOptionsFields> for QueryOptions {
    type Error = SearchError;

    fn try_from(f: QueryOptionsFields) -> Result<Self> {
        QueryOptions::new(f.scoring, f.limit)
    }
}

impl QueryOptions {
    pub fn new(scoring: Scoring, limit: Option<usize>) -> Result<Self> {
        if limit == Some(0) {
            return Err(SearchError::InvalidConfig("limit must be at least 1".into()));
        }
        Ok(Self { scoring, limit })
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Keep only the top `limit` results. `None` returns every match.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
