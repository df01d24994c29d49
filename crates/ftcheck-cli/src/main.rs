//! ftcheck - identify file content types by magic number
//!
//! This tool inspects the leading bytes of each file against a database of
//! known signatures and reports when a file's extension disagrees with its
//! detected type.

use anyhow::{Context, Result};
use clap::Parser;
use ftcheck_core::{
    detect, expand_paths, ext, DetectionReport, ExtensionTable, MagicMatch, Problem,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

/// Identify file content types by magic number, independent of extension
#[derive(Parser, Debug)]
#[command(name = "ftcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files or directories to check
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Emit one JSON document instead of human-readable lines
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Per-item outcome of the check pipeline
#[derive(Debug)]
enum Outcome {
    /// File was inspected; extension comparison already applied
    Checked {
        report: DetectionReport,
        ext: String,
        mismatch: bool,
    },
    /// Input could not be resolved or the file could not be inspected
    Failed(Problem),
}

/// Aggregate counters across all inputs
#[derive(Debug, Default, Serialize)]
struct Summary {
    inputs: usize,
    files_scanned: usize,
    matched: usize,
    unknown: usize,
    errors: usize,
}

impl Summary {
    /// Three-tier severity: all recognized, some unrecognized, or inputs
    /// that could not be processed
    fn exit_code(&self) -> u8 {
        if self.errors > 0 {
            2
        } else if self.unknown > 0 {
            1
        } else {
            0
        }
    }
}

/// Top-level JSON document
#[derive(Debug, Serialize)]
struct Document {
    ok: bool,
    summary: Summary,
    results: Vec<FileRecord>,
}

/// One entry in the JSON `results` array
#[derive(Debug, Serialize)]
struct FileRecord {
    ok: bool,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    magic: Option<MagicMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mismatch: Option<bool>,
    error: Option<Problem>,
}

impl From<&Outcome> for FileRecord {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Checked {
                report,
                ext,
                mismatch,
            } => Self {
                ok: true,
                path: report.path.display().to_string(),
                file_type: Some(report.file_type.clone()),
                size_bytes: Some(report.size_bytes),
                magic: Some(report.magic.clone()),
                ext: Some(ext.clone()),
                mismatch: Some(*mismatch),
                error: None,
            },
            Outcome::Failed(problem) => Self {
                ok: false,
                path: problem
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                file_type: None,
                size_bytes: None,
                magic: None,
                ext: None,
                mismatch: None,
                error: Some(problem.clone()),
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays parseable
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (summary, outcomes) = run(&cli);
    let code = summary.exit_code();

    if let Err(e) = emit(&cli, summary, &outcomes) {
        eprintln!("ftcheck: error: [EPIPE] {e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(code)
}

/// Expands inputs, detects each resolved file, and tallies the summary
fn run(cli: &Cli) -> (Summary, Vec<Outcome>) {
    let table = default_extension_table();
    let (files, problems) = expand_paths(&cli.paths, cli.recursive);

    debug!(
        "resolved {} file(s) from {} input(s)",
        files.len(),
        cli.paths.len()
    );

    let mut summary = Summary {
        inputs: cli.paths.len(),
        ..Summary::default()
    };
    let mut outcomes = Vec::with_capacity(problems.len() + files.len());

    for problem in problems {
        summary.errors += 1;
        outcomes.push(Outcome::Failed(problem));
    }

    for file in files {
        match detect(&file) {
            Ok(report) => {
                summary.files_scanned += 1;
                if report.magic.matched {
                    summary.matched += 1;
                } else {
                    summary.unknown += 1;
                }
                let (ext, mismatch) =
                    ext::check(&file, &report.file_type, report.magic.matched, &table);
                outcomes.push(Outcome::Checked {
                    report,
                    ext,
                    mismatch,
                });
            }
            Err(err) => {
                warn!("failed to inspect {}: {}", file.display(), err);
                summary.errors += 1;
                outcomes.push(Outcome::Failed(err.to_problem()));
            }
        }
    }

    (summary, outcomes)
}

/// Writes results to stdout in the selected format
fn emit(cli: &Cli, summary: Summary, outcomes: &[Outcome]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        let doc = Document {
            ok: summary.errors == 0,
            summary,
            results: outcomes.iter().map(FileRecord::from).collect(),
        };
        let json = serde_json::to_string(&doc).context("failed to encode results as JSON")?;
        writeln!(out, "{json}").context("failed to write output")?;
    } else {
        for outcome in outcomes {
            let line = match outcome {
                Outcome::Checked {
                    report,
                    ext,
                    mismatch,
                } => format_report_line(report, ext, *mismatch),
                Outcome::Failed(problem) => format_problem_line(problem),
            };
            writeln!(out, "{line}").context("failed to write output")?;
        }
    }

    Ok(())
}

/// Human-readable line for one inspected file
fn format_report_line(report: &DetectionReport, ext: &str, mismatch: bool) -> String {
    let matched = if report.magic.matched { "yes" } else { "no" };
    let offset = report
        .magic
        .offset
        .map(|o| o.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let signature = report.magic.signature_hex.as_deref().unwrap_or("N/A");

    let mut line = format!(
        "{}: {}, matched={}, size={}, offset={}, signature={}",
        report.path.display(),
        report.file_type,
        matched,
        report.size_bytes,
        offset,
        signature
    );
    if mismatch {
        line.push_str(&format!(" (extension mismatch: {ext})"));
    }
    line
}

/// Human-readable line for one problem
fn format_problem_line(problem: &Problem) -> String {
    match &problem.path {
        Some(path) => format!(
            "ftcheck: error: [{}] {} {}",
            problem.code,
            path.display(),
            problem.message
        ),
        None => format!("ftcheck: error: [{}] {}", problem.code, problem.message),
    }
}

/// Conventional extensions for each detected label.
///
/// Labels without an entry (ELF binaries, bare RIFF containers) never
/// produce a mismatch.
fn default_extension_table() -> ExtensionTable {
    ExtensionTable::from_entries(&[
        ("JPEG Image", &[".jpg", ".jpeg", ".jpe"]),
        ("PNG Image", &[".png"]),
        ("GIF Image", &[".gif"]),
        ("PDF Document", &[".pdf"]),
        ("ZIP Archive", &[".zip", ".jar", ".war", ".ear"]),
        ("RAR Archive", &[".rar"]),
        ("GZIP Archive", &[".gz", ".tgz"]),
        ("BZip2 Archive", &[".bz2"]),
        ("7-Zip Archive", &[".7z"]),
        ("TAR Archive", &[".tar"]),
        ("WAV Audio", &[".wav"]),
        ("AVI Video", &[".avi"]),
    ])
}
