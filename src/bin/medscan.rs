//! CLI binary for medscan-report.
//!
//! A thin shim over the library crate: maps CLI flags to `AnalysisConfig`
//! and `PatientMetadata`, runs one analysis (or re-renders existing text),
//! and writes the PDF.

use anyhow::{Context, Result};
use clap::Parser;
use medscan_report::{
    analyze, list_models, render_report, AnalysisConfig, Gender, PatientMetadata,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyse a scan and write Medical_Report_<name>.pdf
  medscan chest_ct.png --name "John Doe" --age 45 --gender male

  # Pick a model and output path
  medscan scan.jpg --name "Jane Roe" --age 62 --gender female \
      --model gemini-1.5-pro -o report.pdf

  # Re-render saved analysis text without calling the API
  medscan scan.png --name "John Doe" --age 45 --gender male --text analysis.md

  # Which models does this key support?
  medscan --list-models

The API key is read from --api-key or the GEMINI_API_KEY environment variable."#;

/// Analyse a medical scan image and produce a structured PDF report.
#[derive(Parser, Debug)]
#[command(name = "medscan", version, about, after_help = AFTER_HELP)]
struct Cli {
    /// Scan image to analyse (PNG or JPEG)
    #[arg(required_unless_present = "list_models")]
    image: Option<PathBuf>,

    /// Patient name
    #[arg(long, default_value = "John Doe")]
    name: String,

    /// Patient age (0–120)
    #[arg(long, default_value_t = 45)]
    age: u32,

    /// Patient gender: male, female, or other
    #[arg(long, default_value = "male")]
    gender: String,

    /// Model identifier
    #[arg(long, default_value = "gemini-1.5-flash")]
    model: String,

    /// Google API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Output PDF path (default: Medical_Report_<name>.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render this saved analysis text file instead of calling the API
    #[arg(long, value_name = "FILE")]
    text: Option<PathBuf>,

    /// List models supporting generateContent and exit
    #[arg(long)]
    list_models: bool,

    /// Print the raw analysis text to stdout as well
    #[arg(long)]
    print_text: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AnalysisConfig::builder()
        .api_key(cli.api_key.clone().unwrap_or_default())
        .model(&cli.model)
        .build();

    if cli.list_models {
        let config = config.context("a valid API key is required to list models")?;
        let models = list_models(&config).await;
        if models.is_empty() {
            eprintln!("{}", red("No models found. Check your API key."));
        } else {
            println!("{}", green("API key is working. Available models:"));
            for m in &models {
                println!(" - {m}");
            }
        }
        return Ok(());
    }

    let image_path = cli.image.as_ref().expect("clap enforces image presence");
    let image_filename = image_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_path.display().to_string());

    let gender: Gender = cli.gender.parse()?;
    let patient = PatientMetadata::new(cli.name.clone(), cli.age, gender)?;

    // Saved-text mode skips the API entirely.
    let report_text = match &cli.text {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read analysis text '{}'", path.display()))?,
        None => {
            let config = config?;
            let bytes = std::fs::read(image_path)
                .with_context(|| format!("could not read image '{}'", image_path.display()))?;
            eprintln!("{}", dim(&format!("Analysing {image_filename} with {}…", cli.model)));
            analyze(&bytes, &image_filename, &config).await
        }
    };

    if report_text.starts_with("Error: ") {
        eprintln!("{}", red("Analysis failed; the report will contain the error text."));
    }
    if cli.print_text {
        println!("{report_text}");
    }

    let pdf = render_report(&report_text, &patient, &image_filename)?;
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(patient.report_filename()));
    std::fs::write(&output, &pdf)
        .with_context(|| format!("could not write '{}'", output.display()))?;

    eprintln!(
        "{} {} {}",
        green("✔"),
        output.display(),
        dim(&format!("({} bytes)", pdf.len()))
    );
    Ok(())
}
