//! Report the N most frequent words of a text file.
//!
//! Text is split on a fixed separator set, lowercased, and counted in a
//! chained hash table. A bounded min-heap then keeps the N highest counts,
//! so ranking costs O(text length + distinct words × log N) without sorting
//! the whole vocabulary.
//!
//! # Features
//!
//! - Hard input size limit; oversized input is an error, never truncated
//! - Configurable separators, word length limit and long-word policy
//! - Deterministic ties: equal counts rank by first occurrence
//! - Per-stage metrics: items processed, items dropped, elapsed time
//! - Builder pattern for pipeline construction
//!
//! # Example
//!
//! ```
//! use top_words::PipelineBuilder;
//!
//! let mut pipeline = PipelineBuilder::new().top_n(2).build()?;
//! let report = pipeline.run_text("the cat and the hat and the bat")?;
//!
//! let words: Vec<&str> = report.words().collect();
//! assert_eq!(words, vec!["the", "and"]);
//! # Ok::<(), top_words::TopWordsError>(())
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod pipeline;
pub mod selector;
pub mod stage;
pub mod tokenizer;

// Re-exports for convenience
pub use buffer::InputBuffer;
pub use config::{LongWordPolicy, PipelineConfig, TokenizerConfig};
pub use error::{Result, TopWordsError};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use metrics::{MetricsSnapshot, StageMetrics};
pub use pipeline::{find_frequent_words, Pipeline, PipelineBuilder, Report, RunStats};
pub use selector::{Offer, TopNSelector};
pub use stage::{PipelineState, Stage, StageRunner};
pub use tokenizer::Tokenizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
