//! # igdigest CLI
//!
//! Command-line interface for the igdigest library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use igdigest::DigestError;
use igdigest::activity::{ListLoader, ListReport, not_following_back};
use igdigest::cli::{Args, Format, Section};
use igdigest::loader::Loader;
use igdigest::normalize::TextNormalizer;
use igdigest::output::{write_csv, write_json, write_list_csv};
use igdigest::pipeline::{ThreadAnalyzer, ThreadReport};
use igdigest::time::TimeBucketer;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Installs a stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "igdigest=info",
        _ => "igdigest=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), DigestError> {
    let total_start = Instant::now();
    let config = args.analysis_config()?;
    let output_path = args.output_path();

    println!("📦 igdigest v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Section: {}", args.section);
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    println!("🕒 Zone:    {}", config.timezone.name());
    println!();

    match args.section {
        Section::Messages => {
            println!("⏳ Analyzing thread...");
            let report = ThreadAnalyzer::with_config(config).analyze_file(&args.input)?;
            print_thread_summary(&report);

            match args.format {
                Format::Json => write_json(&report, &output_path, true)?,
                Format::Csv => write_csv(&report, &output_path)?,
            }
        }
        Section::Following | Section::LikedComments => {
            let normalizer = if config.fix_encoding {
                TextNormalizer::new(config.decode_policy)
            } else {
                TextNormalizer::disabled()
            };
            let bucketer = TimeBucketer::new(config.timezone);

            let loader = match args.section {
                Section::Following => ListLoader::following(),
                _ => ListLoader::liked_comments(),
            }
            .with_normalizer(normalizer);

            println!("⏳ Loading {}...", loader.name());
            let entries = loader.load(Path::new(&args.input))?;
            let mut report = ListReport::new(loader.name(), &entries, config.window, &bucketer);

            if let Some(followers_path) = &args.followers {
                if args.section != Section::Following {
                    return Err(DigestError::invalid_config(
                        "--followers only applies to the following section",
                    ));
                }
                let followers = ListLoader::followers()
                    .with_normalizer(normalizer)
                    .load(Path::new(followers_path))?;
                let missing = not_following_back(&followers, &entries);
                report = report.with_not_following_back(&missing, &bucketer);
            }

            print_list_summary(&report);

            match args.format {
                Format::Json => write_json(&report, &output_path, true)?,
                Format::Csv => write_list_csv(&report, &output_path)?,
            }
        }
    }

    println!();
    println!("✅ Done! Output saved to {}", output_path);
    println!(
        "⚡ Total time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn print_thread_summary(report: &ThreadReport) {
    if let Some(title) = &report.title {
        println!("   Thread:   {}", title);
    }
    println!(
        "   Found {} messages, {} with content",
        report.total_messages, report.content_messages
    );
    if report.skipped_records > 0 {
        println!("   Skipped {} unreadable records", report.skipped_records);
    }

    println!();
    println!("📊 Summary:");
    let words: Vec<String> = report
        .word_frequency
        .iter()
        .map(|w| format!("{} ({})", w.word, w.count))
        .collect();
    println!("   Top words:   {}", words.join(", "));
    let senders: Vec<String> = report
        .sender_counts
        .iter()
        .map(|s| format!("{} ({:.1}%)", s.sender, s.percentage))
        .collect();
    println!("   Top senders: {}", senders.join(", "));
    if let (Some(first), Some(last)) = (report.daily_series.first(), report.daily_series.last()) {
        println!(
            "   Active days: {} ({} → {})",
            report.daily_series.len(),
            first.date,
            last.date
        );
    }
}

fn print_list_summary(report: &ListReport) {
    println!("   Found {} entries", report.total);
    if let Some(first) = report.first.first() {
        println!("   Oldest:      {} ({})", first.value, first.time);
    }
    if let Some(last) = report.recent.last() {
        println!("   Newest:      {} ({})", last.value, last.time);
    }
    if let Some(missing) = &report.not_following_back {
        println!("   Not following back: {}", missing.len());
    }
}
