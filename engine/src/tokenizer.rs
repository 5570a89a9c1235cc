use crate::config::TokenizerConfig;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Combining marks continue a word but never start one.
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{N}][\p{L}\p{M}\p{N}]*").expect("valid regex");
}

/// Tokenize text into (token, position) with the default configuration.
///
/// Runs of letters and numbers, with any combining marks attached to them,
/// become lower-cased tokens; everything else is a separator. Positions are
/// token ordinals, not byte offsets.
pub fn tokenize(text: &str) -> Vec<(String, usize)> {
    Tokenizer::default().tokenize(text)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    pub fn tokenize(&self, text: &str) -> Vec<(String, usize)> {
        let text: Cow<'_, str> = if self.config.nfkc {
            Cow::Owned(text.nfkc().collect())
        } else {
            Cow::Borrowed(text)
        };
        WORD.find_iter(&text)
            .enumerate()
            .map(|(pos, mat)| (mat.as_str().to_lowercase(), pos))
            .collect()
    }
}
