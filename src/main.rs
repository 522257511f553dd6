use clap::{Parser, ValueEnum};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use top_words::config::{
    DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_WORD_LEN, DEFAULT_SEPARATORS, DEFAULT_TOP_N,
};
use top_words::{LongWordPolicy, PipelineBuilder, Report};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LongWords {
    Truncate,
    Skip,
    Reject,
}

impl From<LongWords> for LongWordPolicy {
    fn from(value: LongWords) -> Self {
        match value {
            LongWords::Truncate => LongWordPolicy::Truncate,
            LongWords::Skip => LongWordPolicy::Skip,
            LongWords::Reject => LongWordPolicy::Reject,
        }
    }
}

/// Print the N most frequent words of a text file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Text file to read
    path: PathBuf,

    /// Number of words to report
    #[arg(short = 'n', long = "top", value_name = "N", default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Largest accepted input, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    max_bytes: usize,

    /// Longest word kept as-is, in bytes
    #[arg(long, value_name = "LEN", default_value_t = DEFAULT_MAX_WORD_LEN)]
    max_word_len: usize,

    /// What to do with words over the length limit
    #[arg(long, value_enum, default_value_t = LongWords::Truncate)]
    long_words: LongWords,

    /// Characters that separate words
    #[arg(long, value_name = "CHARS", default_value = DEFAULT_SEPARATORS)]
    separators: String,

    /// Print each word with its count
    #[arg(short, long)]
    counts: bool,

    /// Print per-stage metrics to stderr
    #[arg(long)]
    stats: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = try_main(cli) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn try_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut pipeline = PipelineBuilder::new()
        .top_n(cli.top)
        .max_input_bytes(cli.max_bytes)
        .max_word_len(cli.max_word_len)
        .long_words(cli.long_words.into())
        .separators(cli.separators.chars())
        .build()?;

    let report = pipeline.run_path(&cli.path)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&mut out, &report, cli.counts)?;
    out.flush()?;

    if cli.stats {
        eprint!("{}", pipeline.metrics_summary());
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &Report, counts: bool) -> io::Result<()> {
    writeln!(out, "{} most frequent words:", report.len())?;
    for entry in report.entries() {
        if counts {
            writeln!(out, "{}", entry)?;
        } else {
            writeln!(out, "{}", entry.word)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["top-words", "input.txt"]).unwrap();
        assert_eq!(cli.top, 10);
        assert_eq!(cli.max_bytes, 1_000_000);
        assert_eq!(cli.max_word_len, 100);
        assert_eq!(cli.separators, " \t\n,.?!:;");
        assert!(!cli.counts);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "top-words",
            "-n",
            "3",
            "--long-words",
            "reject",
            "--counts",
            "book.txt",
        ])
        .unwrap();
        assert_eq!(cli.top, 3);
        assert!(matches!(cli.long_words, LongWords::Reject));
        assert!(cli.counts);
        assert_eq!(cli.path, PathBuf::from("book.txt"));
    }

    #[test]
    fn test_write_report() {
        let mut pipeline = PipelineBuilder::new().top_n(2).build().unwrap();
        let report = pipeline.run_text("b a b c b a").unwrap();

        let mut plain = Vec::new();
        write_report(&mut plain, &report, false).unwrap();
        assert_eq!(String::from_utf8(plain).unwrap(), "2 most frequent words:\nb\na\n");

        let mut counted = Vec::new();
        write_report(&mut counted, &report, true).unwrap();
        assert_eq!(
            String::from_utf8(counted).unwrap(),
            "2 most frequent words:\nb\t3\na\t2\n"
        );
    }
}
