use crate::error::{Result, TopWordsError};

/// Default number of words reported
pub const DEFAULT_TOP_N: usize = 10;

/// Default input cap in bytes
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1_000_000;

/// Default maximum token length in bytes
pub const DEFAULT_MAX_WORD_LEN: usize = 100;

/// Characters that separate words by default
pub const DEFAULT_SEPARATORS: &str = " \t\n,.?!:;";

/// What to do with a token longer than the configured maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongWordPolicy {
    /// Keep the longest prefix that fits and ends on a character boundary
    #[default]
    Truncate,
    /// Drop the token
    Skip,
    /// Abort the run with `WordTooLong`
    Reject,
}

/// Tokenizer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    pub separators: Vec<char>,
    pub max_word_len: usize,
    pub long_words: LongWordPolicy,
}

impl TokenizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.separators.is_empty() {
            return Err(TopWordsError::invalid("separator set must not be empty"));
        }
        if self.max_word_len == 0 {
            return Err(TopWordsError::invalid("max_word_len must be at least 1"));
        }
        Ok(())
    }

    #[inline]
    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.chars().collect(),
            max_word_len: DEFAULT_MAX_WORD_LEN,
            long_words: LongWordPolicy::default(),
        }
    }
}

/// Settings for one pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub top_n: usize,
    pub max_input_bytes: usize,
    pub tokenizer: TokenizerConfig,
}

impl PipelineConfig {
    /// Check every parameter before any input is touched
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(TopWordsError::invalid("top_n must be at least 1"));
        }
        if self.max_input_bytes == 0 {
            return Err(TopWordsError::invalid("max_input_bytes must be at least 1"));
        }
        self.tokenizer.validate()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.max_input_bytes, 1_000_000);
        assert_eq!(config.tokenizer.max_word_len, 100);
        assert_eq!(config.tokenizer.long_words, LongWordPolicy::Truncate);
    }

    #[test]
    fn test_default_separators() {
        let config = TokenizerConfig::default();
        for c in [' ', '\t', '\n', ',', '.', '?', '!', ':', ';'] {
            assert!(config.is_separator(c), "{:?} should separate", c);
        }
        assert!(!config.is_separator('\''));
        assert!(!config.is_separator('-'));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let config = PipelineConfig {
            top_n: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TopWordsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_separators_rejected() {
        let mut config = PipelineConfig::default();
        config.tokenizer.separators.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_word_len_rejected() {
        let mut config = PipelineConfig::default();
        config.tokenizer.max_word_len = 0;
        assert!(config.validate().is_err());
    }
}
