// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use djibly::{
    filter_confident, load_corpus, load_or_train, store, DjiblyError, LoadOutcome, SearchEngine,
    TrainingConfig, TrainingSummary,
};

mod cli;
use cli::display::{self, paint, paint_bold, Tone};
use cli::{Cli, Commands, DEMO_QUERIES};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Train {
            corpus,
            output,
            training,
        } => training
            .to_config()
            .and_then(|config| run_train(&corpus, &output, &config)),
        Commands::Search {
            artifact,
            query,
            limit,
            threshold,
            json,
        } => run_search(&artifact, &query, limit, threshold, json),
        Commands::Demo {
            artifact,
            corpus,
            threshold,
        } => run_demo(&artifact, corpus.as_deref(), threshold),
        Commands::Inspect { file } => run_inspect(&file),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("   caused by: {}", cause);
            source = std::error::Error::source(cause);
        }
        std::process::exit(1);
    }
}

/// `DJIBLY_LOG` wins when set; otherwise `-v` picks the level. Logs go to
/// stderr so `search --json` output stays clean.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("DJIBLY_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "parallel")]
fn spinner(message: &str) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn train_from(corpus: &Path, config: &TrainingConfig) -> djibly::Result<(djibly::TrainedPipeline, TrainingSummary)> {
    let examples = load_corpus(corpus)?;

    #[cfg(feature = "parallel")]
    let pb = spinner(&format!("Training on {} rows", examples.len()));

    let result = djibly::train_with(&examples, config);

    #[cfg(feature = "parallel")]
    pb.finish_and_clear();

    result
}

fn run_train(corpus: &Path, output: &Path, config: &TrainingConfig) -> djibly::Result<()> {
    let (pipeline, summary) = train_from(corpus, config)?;
    djibly::save(&pipeline, output)?;
    print_summary(&summary);
    println!(
        "{} Model saved to '{}'",
        paint_bold(Tone::Good, "✓"),
        output.display()
    );
    Ok(())
}

fn print_summary(summary: &TrainingSummary) {
    display::heading("TRAINING");
    display::field("rows", &format!("{} ({} relevant, {} not)", summary.rows, summary.positives, summary.negatives));
    display::field("vocabulary", &format!("{} n-grams", summary.vocabulary_size));
    display::field("catalog", &format!("{} products", summary.catalog_size));
    let fit = if summary.converged {
        format!("{} epochs, loss {:.4}", summary.epochs, summary.final_loss)
    } else {
        format!("{} epochs, loss {:.4} (not converged)", summary.epochs, summary.final_loss)
    };
    display::field("fit", &fit);
}

fn run_search(artifact: &Path, query: &str, limit: usize, threshold: f64, json: bool) -> djibly::Result<()> {
    let engine = SearchEngine::new();
    engine.load(artifact)?;
    let hits = engine.search(query, limit)?;

    if json {
        match display::hits_json(&hits) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("❌ could not encode results as JSON: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    display::query_header(query);
    display::print_hits(&filter_confident(hits, threshold));
    Ok(())
}

fn run_demo(artifact: &Path, corpus: Option<&Path>, threshold: f64) -> djibly::Result<()> {
    let engine = SearchEngine::new();

    match corpus {
        Some(corpus) => {
            let (pipeline, outcome) = load_or_train(artifact, corpus, &TrainingConfig::default())?;
            if let LoadOutcome::Trained(summary) = &outcome {
                print_summary(summary);
                println!("Model saved to '{}'", artifact.display());
            }
            engine.install(pipeline);
        }
        None => match engine.load(artifact) {
            Ok(()) => {}
            // The demo still runs so the not-ready path is visible.
            Err(DjiblyError::ArtifactNotFound { path }) => {
                eprintln!(
                    "{}",
                    paint(Tone::Bad, &format!("'{}' not found. Train first, or pass --corpus.", path.display()))
                );
            }
            Err(e) => return Err(e),
        },
    }

    display::banner("DJIBLY INTELLIGENT SEARCH DEMO");
    for query in DEMO_QUERIES {
        display::query_header(query);
        match engine.search(query, djibly::SearchConfig::default().top_k) {
            Ok(hits) => display::print_hits(&filter_confident(hits, threshold)),
            Err(DjiblyError::EngineNotReady) => display::print_not_ready(),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn run_inspect(file: &Path) -> djibly::Result<()> {
    let info = store::inspect(file)?;
    let h = &info.header;

    display::heading("HEADER");
    display::field("file", &file.display().to_string());
    display::field("size", &display::format_size(info.file_size));
    display::field("version", &h.version.to_string());
    display::field(
        "normalization",
        if h.flags.unicode_nfc() { "NFC + lowercase" } else { "lowercase" },
    );
    display::field("n-grams", &format!("{}..={} (char_wb)", h.ngram_min, h.ngram_max));
    display::field("fingerprint", &format!("{:08x}", h.fingerprint));

    display::heading("SECTIONS");
    let sections = [
        ("vocabulary", info.offsets.vocabulary, format!("{} terms", h.vocab_count)),
        ("weights", info.offsets.weights, format!("{} + intercept", h.vocab_count)),
        ("catalog", info.offsets.catalog, format!("{} products", h.product_count)),
    ];
    for (name, (start, end), detail) in sections {
        let size = display::format_size(end.saturating_sub(start));
        display::field(name, &format!("{:<10} @{:<8} {}", size, start, paint(Tone::Muted, &detail)));
    }

    display::heading("INTEGRITY");
    let crc = match info.stored_crc32 {
        Some(stored) if stored == info.computed_crc32 => {
            paint(Tone::Good, &format!("{:08x} ok", stored))
        }
        Some(stored) => paint(
            Tone::Bad,
            &format!("{:08x} stored, {:08x} computed", stored, info.computed_crc32),
        ),
        None => paint(Tone::Bad, "footer missing"),
    };
    display::field("crc32", &crc);
    match &info.problem {
        None => display::field("status", &paint_bold(Tone::Good, "valid")),
        Some(problem) => display::field("status", &paint_bold(Tone::Bad, problem)),
    }

    if info.is_valid() {
        Ok(())
    } else {
        Err(DjiblyError::ArtifactCorrupt {
            reason: info.problem.unwrap_or_default(),
        })
    }
}
