//! Word frequency report over stdin
//!
//! Reads text from stdin, ranks the words, and prints them with their counts
//! followed by the per-stage metrics.
//!
//! Usage: cargo run --example word_count --release < book.txt
//!        (or type lines of text and press Ctrl-D to finish)

use std::io;
use top_words::{LongWordPolicy, PipelineBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Word Frequency Counter Pipeline");
    println!("================================");

    let mut pipeline = PipelineBuilder::new()
        .top_n(10)
        .max_input_bytes(16 * 1024 * 1024)
        .long_words(LongWordPolicy::Skip)
        .build()?;

    let stdin = io::stdin();
    let report = pipeline.run_reader(stdin.lock())?;

    println!("\n=== Top {} Words ===", report.len());
    for (i, entry) in report.entries().iter().enumerate() {
        println!("{:2}. {} ({})", i + 1, entry.word, entry.count);
    }

    let stats = report.stats();
    println!(
        "\n{} tokens, {} distinct, {} skipped",
        stats.tokens, stats.distinct_words, stats.skipped_words
    );
    println!("\n{}", pipeline.metrics_summary());

    Ok(())
}
