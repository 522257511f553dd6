//! Splits text into lowercased word tokens.
//!
//! A token is a maximal run of non-separator characters. Runs of separators
//! produce nothing, so the sequence never contains empty words. Lowercasing is
//! ASCII only; other characters pass through unchanged.

use crate::config::{LongWordPolicy, TokenizerConfig};
use crate::error::{Result, TopWordsError};
use std::iter::FusedIterator;

/// Lazy, single-pass token iterator over borrowed text
#[derive(Debug)]
pub struct Tokenizer<'a> {
    rest: &'a str,
    config: &'a TokenizerConfig,
    truncated: u64,
    skipped: u64,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `text`
    pub fn new(text: &'a str, config: &'a TokenizerConfig) -> Self {
        Self {
            rest: text,
            config,
            truncated: 0,
            skipped: 0,
        }
    }

    /// Number of tokens shortened so far under `LongWordPolicy::Truncate`
    pub fn truncated(&self) -> u64 {
        self.truncated
    }

    /// Number of tokens dropped so far for being too long
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn next_run(&mut self) -> Option<&'a str> {
        let config = self.config;
        let start = self.rest.find(|c: char| !config.is_separator(c))?;
        let run = &self.rest[start..];
        let end = run
            .find(|c: char| config.is_separator(c))
            .unwrap_or(run.len());
        self.rest = &run[end..];
        Some(&run[..end])
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let limit = self.config.max_word_len;
        loop {
            let run = self.next_run()?;
            if run.len() <= limit {
                return Some(Ok(run.to_ascii_lowercase()));
            }

            match self.config.long_words {
                LongWordPolicy::Truncate => {
                    let prefix = &run[..floor_char_boundary(run, limit)];
                    // A multi-byte first character wider than the limit leaves nothing
                    if prefix.is_empty() {
                        self.skipped += 1;
                        continue;
                    }
                    self.truncated += 1;
                    return Some(Ok(prefix.to_ascii_lowercase()));
                }
                LongWordPolicy::Skip => {
                    self.skipped += 1;
                }
                LongWordPolicy::Reject => {
                    self.rest = "";
                    return Some(Err(TopWordsError::WordTooLong {
                        len: run.len(),
                        limit,
                    }));
                }
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Largest index `<= max` that lies on a character boundary of `s`
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}
