//! # chatstat CLI
//!
//! Command-line interface for the chatstat library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstat::cli::Args;
use chatstat::diagnose::{Diagnosis, diagnose_file};
use chatstat::error::ImageErrorKind;
use chatstat::format::write_to_format;
use chatstat::ocr::TesseractExtractor;
use chatstat::{Analyzer, ChatstatError, Summary};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays the report.
fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatError> {
    if args.check_ocr {
        return check_ocr(args);
    }

    let Some(source) = args.source() else {
        return Err(ChatstatError::invalid_format(
            "input",
            "an input file is required (--file)",
        ));
    };

    if args.diagnose {
        if let Some(path) = source.path() {
            return run_diagnose(path, args);
        }
    }

    let start = Instant::now();

    println!("📊 chatstat v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if let Some(path) = source.path() {
        println!("📂 Input:   {}", path.display());
    }
    if source.is_image() {
        println!("🖼️  Mode:    OCR (Tesseract)");
    }

    let analyzer = Analyzer::with_config(args.analysis_config());
    let summary = analyzer.analyze(&source)?;

    print_summary(&summary);

    let targets = args.report_targets();
    if !targets.is_empty() {
        println!();
    }
    for (format, path) in targets {
        write_to_format(&summary, path, format)?;
        println!("💾 Exported {} to {}", format, path.display());
    }

    println!();
    println!("✅ Done in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!();
    println!("=== Summary ===");
    println!("Total messages: {}", summary.total_messages);
    println!("Media messages: {}", summary.media_count);
    println!("Emoji count (approx): {}", summary.emoji_count);

    println!();
    println!("Messages per user:");
    for (user, count) in summary.ranked_users() {
        println!("  {}: {}", user, count);
    }

    println!();
    println!("Top words:");
    for word in &summary.top_words {
        println!("  {}: {}", word.word, word.count);
    }

    if !summary.insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &summary.insights {
            println!("  {}", insight);
        }
    }
}

fn run_diagnose(path: &Path, args: &Args) -> Result<(), ChatstatError> {
    println!("🔍 chatstat diagnostics");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", path.display());
    println!();

    let report = diagnose_file(path)?;
    print_diagnosis(&report);

    if report.is_empty() || !report.is_supported() {
        return Ok(());
    }

    println!();
    println!("Trying full analysis...");
    let analyzer = Analyzer::with_config(args.analysis_config().with_top_n(5));
    match analyzer.analyze_path(path) {
        Ok(summary) => {
            let users: Vec<&str> = summary.per_user.iter().map(|(u, _)| u.as_str()).collect();
            println!("✅ Full analysis completed");
            println!("   Total messages: {}", summary.total_messages);
            println!("   Users found:    {}", users.join(", "));
        }
        Err(e) => println!("❌ Analysis failed: {}", e),
    }
    Ok(())
}

fn print_diagnosis(report: &Diagnosis) {
    println!("Total lines in file: {}", report.total_lines);
    println!();

    if report.is_empty() {
        println!("⚠️  No non-empty lines found in file!");
        return;
    }

    println!("First {} non-empty lines:", report.preview.len());
    for (number, line) in &report.preview {
        println!("  Line {}: {}", number, line);
    }

    println!();
    println!(
        "Parsed {} of {} non-empty lines among the first lines",
        report.parsed, report.sampled
    );

    if report.is_supported() {
        println!("✅ The file format is recognised");
    } else {
        println!("⚠️  No messages could be parsed!");
        println!();
        println!("Unparsed line samples:");
        for line in &report.unparsed_samples {
            println!("  - {}", line);
        }
        println!();
        println!("This suggests the file format is not supported.");
        println!("Please check that the file is a valid WhatsApp export.");
    }
}

fn check_ocr(args: &Args) -> Result<(), ChatstatError> {
    let extractor = TesseractExtractor::with_config(args.ocr_config());
    match extractor.version() {
        Some(version) => {
            println!("✅ Tesseract OCR is available: {}", version);
            Ok(())
        }
        None => {
            println!("Install Tesseract OCR, then run this check again:");
            println!("  Windows: https://github.com/UB-Mannheim/tesseract/wiki");
            println!("  macOS:   brew install tesseract");
            println!("  Linux:   sudo apt-get install tesseract-ocr");
            Err(ChatstatError::image(ImageErrorKind::EngineNotFound, None))
        }
    }
}
