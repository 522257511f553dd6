use std::path::PathBuf;
use thiserror::Error;

/// Result type for top-words operations
pub type Result<T> = std::result::Result<T, TopWordsError>;

/// Errors that can occur while ranking words
#[derive(Error, Debug)]
pub enum TopWordsError {
    /// Input file could not be opened or read
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is larger than the configured buffer.
    ///
    /// `actual` is known only when the size was reported up front; streams
    /// stop reading one byte past the limit.
    #[error("Input too large: {} the {limit} byte limit", oversize(.actual))]
    InputTooLarge { limit: usize, actual: Option<u64> },

    /// A configuration value was rejected before running
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A token exceeded the maximum word length under the reject policy
    #[error("Word too long: {len} bytes exceeds the {limit} byte limit")]
    WordTooLong { len: usize, limit: usize },
}

fn oversize(actual: &Option<u64>) -> String {
    match actual {
        Some(bytes) => format!("{} bytes exceeds", bytes),
        None => "input exceeds".to_string(),
    }
}

impl TopWordsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = TopWordsError::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_input_too_large_display() {
        let err = TopWordsError::InputTooLarge {
            limit: 10,
            actual: Some(11),
        };
        assert_eq!(
            err.to_string(),
            "Input too large: 11 bytes exceeds the 10 byte limit"
        );
    }

    #[test]
    fn test_input_too_large_unknown_size_display() {
        let err = TopWordsError::InputTooLarge {
            limit: 10,
            actual: None,
        };
        assert_eq!(
            err.to_string(),
            "Input too large: input exceeds the 10 byte limit"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = TopWordsError::invalid("top_n must be at least 1");
        assert_eq!(err.to_string(), "Invalid parameter: top_n must be at least 1");
    }
}
