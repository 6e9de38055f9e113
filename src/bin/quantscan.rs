//! quantscan CLI — find the largest quantities in documents.

use clap::{Parser, ValueEnum};
use colored::Colorize;
use quantscan::report::RunReport;
use quantscan::{Document, Pipeline, PipelineConfig, PlainTextSource, UnitTable};
use rayon::prelude::*;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Extract, normalize, and rank numeric quantities in documents.
#[derive(Parser)]
#[command(name = "quantscan", version, about)]
struct Cli {
    /// Input text files (form feed separates pages); reads stdin if omitted
    files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Confidence threshold for bonus-case inclusion
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Context window size, in words per side of a numeral
    #[arg(long, default_value_t = 5)]
    window: usize,

    /// Length of the top-N report lists
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Suppress progress messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = PipelineConfig::default()
        .with_confidence_threshold(cli.threshold)
        .with_context_window(cli.window)
        .with_top_n(cli.top);
    let table = UnitTable::default();

    let pipeline = match Pipeline::new(&table, config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    let mut failed = false;

    if cli.files.is_empty() {
        match run_stdin(&pipeline, cli.format) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                eprintln!("{} stdin: {}", "error:".red().bold(), e);
                failed = true;
            }
        }
    } else {
        if !cli.quiet && cli.files.len() > 1 {
            eprintln!("processing {} files", cli.files.len());
        }
        // Each document run is independent; process files in parallel but
        // print in input order.
        let outputs: Vec<(String, quantscan::Result<String>)> = cli
            .files
            .par_iter()
            .map(|path| {
                let name = path.display().to_string();
                let rendered = run_file(&pipeline, path, cli.format);
                (name, rendered)
            })
            .collect();

        for (name, rendered) in outputs {
            match rendered {
                Ok(output) => print!("{output}"),
                Err(e) => {
                    eprintln!("{} {}: {}", "error:".red().bold(), name, e);
                    failed = true;
                }
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn run_file(pipeline: &Pipeline<'_>, path: &PathBuf, format: Format) -> quantscan::Result<String> {
    let source = PlainTextSource::new(path);
    let doc = Document::from_source(&source)?;
    render(pipeline, &doc, &path.display().to_string(), format)
}

fn run_stdin(pipeline: &Pipeline<'_>, format: Format) -> quantscan::Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    let doc = Document::from_text(&text);
    render(pipeline, &doc, "stdin", format)
}

fn render(
    pipeline: &Pipeline<'_>,
    doc: &Document,
    source: &str,
    format: Format,
) -> quantscan::Result<String> {
    let start = Instant::now();
    let result = pipeline.run(doc)?;
    let report = RunReport {
        source,
        result: &result,
        elapsed: start.elapsed(),
    };
    match format {
        Format::Text => Ok(report.render_text()),
        Format::Json => {
            let mut json = report.render_json()?;
            json.push('\n');
            Ok(json)
        }
    }
}
