use crate::buffer::InputBuffer;
use crate::config::{LongWordPolicy, PipelineConfig};
use crate::error::Result;
use crate::frequency::{FrequencyEntry, FrequencyTable};
use crate::metrics::StageMetrics;
use crate::selector::{Offer, TopNSelector};
use crate::stage::{PipelineState, Stage, StageRunner};
use crate::tokenizer::Tokenizer;
use std::io::Read;
use std::path::Path;

/// Builder for constructing pipelines
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Number of words to report
    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    /// Largest input accepted, in bytes
    pub fn max_input_bytes(mut self, bytes: usize) -> Self {
        self.config.max_input_bytes = bytes;
        self
    }

    /// Longest token kept as-is, in bytes
    pub fn max_word_len(mut self, len: usize) -> Self {
        self.config.tokenizer.max_word_len = len;
        self
    }

    /// Characters that split words
    pub fn separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.config.tokenizer.separators = separators.into_iter().collect();
        self
    }

    /// How to handle tokens over the length limit
    pub fn long_words(mut self, policy: LongWordPolicy) -> Self {
        self.config.tokenizer.long_words = policy;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;
        Ok(Pipeline {
            config: self.config,
            metrics: [StageMetrics::new(), StageMetrics::new(), StageMetrics::new()],
            state: PipelineState::Idle,
        })
    }
}

/// Counters gathered during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub bytes_read: usize,
    pub tokens: u64,
    pub distinct_words: usize,
    pub truncated_words: u64,
    pub skipped_words: u64,
    pub rejected_candidates: u64,
}

/// The outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    ranking: Vec<FrequencyEntry>,
    stats: RunStats,
}

impl Report {
    /// Ranked entries, most frequent first
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.ranking
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.ranking.iter().map(|e| e.word.as_str())
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        self.ranking
    }
}

/// Read → count → select pipeline that ranks the most frequent words
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    metrics: [StageMetrics; 3],
    state: PipelineState,
}

impl Pipeline {
    /// Shorthand for `PipelineBuilder::new()`
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// State reached by the most recent run
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Get metrics for a specific stage
    pub fn stage_metrics(&self, stage: Stage) -> &StageMetrics {
        &self.metrics[stage.index()]
    }

    /// Get all stage metrics
    pub fn all_metrics(&self) -> Vec<(Stage, &StageMetrics)> {
        Stage::ALL
            .iter()
            .map(|&stage| (stage, self.stage_metrics(stage)))
            .collect()
    }

    /// Get a summary of all metrics
    pub fn metrics_summary(&self) -> String {
        let mut summary = String::from("Pipeline Metrics Summary:\n");
        for (stage, metrics) in self.all_metrics() {
            summary.push_str(&format!(
                "  {:<10} {}\n",
                stage.name(),
                metrics.snapshot().format()
            ));
        }
        summary
    }

    /// Rank the words of a file
    pub fn run_path(&mut self, path: impl AsRef<Path>) -> Result<Report> {
        let path = path.as_ref();
        log::info!("ranking words in {}", path.display());
        self.run_with(|limit| InputBuffer::read_path(path, limit))
    }

    /// Rank the words read from `reader`
    pub fn run_reader<R: Read>(&mut self, reader: R) -> Result<Report> {
        self.run_with(|limit| InputBuffer::read_from(reader, limit))
    }

    /// Rank the words of in-memory bytes
    pub fn run_bytes(&mut self, bytes: Vec<u8>) -> Result<Report> {
        self.run_with(|limit| InputBuffer::from_bytes(bytes, limit))
    }

    /// Rank the words of a string
    pub fn run_text(&mut self, text: &str) -> Result<Report> {
        self.run_bytes(text.as_bytes().to_vec())
    }

    fn run_with<F>(&mut self, read: F) -> Result<Report>
    where
        F: FnOnce(usize) -> Result<InputBuffer>,
    {
        for metrics in &self.metrics {
            metrics.reset();
        }
        self.state = PipelineState::Idle;

        let mut runner = StageRunner::new(&self.metrics);
        let result = execute(&self.config, &mut runner, read);
        self.state = runner.state();

        if let Ok(report) = &result {
            let stats = report.stats();
            log::info!(
                "ranked {} of {} distinct words from {} tokens ({} bytes)",
                report.len(),
                stats.distinct_words,
                stats.tokens,
                stats.bytes_read
            );
        }
        result
    }
}

fn execute<F>(config: &PipelineConfig, runner: &mut StageRunner, read: F) -> Result<Report>
where
    F: FnOnce(usize) -> Result<InputBuffer>,
{
    let mut stats = RunStats::default();

    let input = runner.run(Stage::Reading, |metrics| {
        let input = read(config.max_input_bytes)?;
        metrics.add_processed(input.len() as u64);
        Ok(input)
    })?;
    stats.bytes_read = input.len();

    let table = runner.run(Stage::Counting, |metrics| {
        let text = input.text();
        let mut tokenizer = Tokenizer::new(&text, &config.tokenizer);
        let mut table = FrequencyTable::new();

        for token in tokenizer.by_ref() {
            table.insert_or_increment(&token?);
            metrics.record_processed();
        }

        stats.truncated_words = tokenizer.truncated();
        stats.skipped_words = tokenizer.skipped();
        metrics.add_dropped(tokenizer.skipped());
        Ok(table)
    })?;
    drop(input);

    if stats.truncated_words > 0 || stats.skipped_words > 0 {
        log::warn!(
            "{} words truncated and {} skipped for exceeding {} bytes",
            stats.truncated_words,
            stats.skipped_words,
            config.tokenizer.max_word_len
        );
    }
    stats.tokens = table.total_words();
    stats.distinct_words = table.len();
    log::debug!(
        "frequency table: {} words in {} buckets, longest chain {}",
        table.len(),
        table.bucket_count(),
        table.longest_chain()
    );

    let selector = runner.run(Stage::Selecting, |metrics| {
        let mut selector = TopNSelector::new(config.top_n)?;
        for entry in table.into_entries() {
            match selector.offer(entry) {
                Offer::Rejected => {
                    stats.rejected_candidates += 1;
                    metrics.record_dropped();
                }
                Offer::Inserted | Offer::Replaced(_) => metrics.record_processed(),
            }
        }
        Ok(selector)
    })?;

    let ranking = selector.into_ranked();
    runner.finish();

    Ok(Report { ranking, stats })
}

/// Rank the `n` most frequent words of the file at `path` with default limits
pub fn find_frequent_words(path: impl AsRef<Path>, n: usize) -> Result<Vec<FrequencyEntry>> {
    let mut pipeline = PipelineBuilder::new().top_n(n).build()?;
    Ok(pipeline.run_path(path)?.into_entries())
}
