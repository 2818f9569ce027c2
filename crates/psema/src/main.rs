//! PSema - semantic analyzer for the pseudocode token stream
//!
//! Usage: psema [OPTIONS] [input] -o <out-dir>

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use pseudo_sema::common::DiagnosticReporter;
use pseudo_sema::driver::{AnalysisContext, OutputConfig, Pipeline};
use pseudo_sema::sema::{AnalyzerConfig, AssignmentScan, TypeDialect};
use pseudo_sema::tables::OutputFormat;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Type names used in declarations
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Dialect {
    /// int, real, string, boolean
    #[default]
    English,
    /// entero, real, cadena, logico
    Spanish,
}

/// Table output format
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Format {
    /// symbolTable.txt, addressesTable.txt, tokensTable.txt
    #[default]
    Text,
    /// tables.json
    Json,
}

#[derive(ClapParser, Debug)]
#[command(name = "psema")]
#[command(author = "PSema Team")]
#[command(version = "0.1.0")]
#[command(about = "Semantic analyzer for the Pascal-like pseudocode token stream", long_about = None)]
struct Args {
    /// Token-record file produced by the lexer
    #[arg(default_value = "tokens.txt")]
    input: PathBuf,

    /// Directory receiving the output tables
    #[arg(short, long, default_value = "tables")]
    out_dir: PathBuf,

    /// Type names expected at the end of declarations
    #[arg(short, long, value_enum, default_value = "english")]
    dialect: Dialect,

    /// Output format for the tables
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Judge every assignment by the first statement of the stream
    #[arg(long)]
    legacy_assignment_scan: bool,

    /// Scope label for variables declared before the program name
    #[arg(long, default_value = "Main")]
    default_scope: String,

    /// Analyze only; do not write tables
    #[arg(long)]
    check: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read token records from {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    // Set up diagnostic reporter
    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    let config = AnalyzerConfig {
        dialect: match args.dialect {
            Dialect::English => TypeDialect::English,
            Dialect::Spanish => TypeDialect::Spanish,
        },
        assignment_scan: if args.legacy_assignment_scan {
            AssignmentScan::Leading
        } else {
            AssignmentScan::Statement
        },
        default_scope: args.default_scope.clone(),
    };
    let output = OutputConfig {
        format: match args.format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        },
        dump_tokens: args.dump_tokens,
    };

    let pipeline = Pipeline::new(config, output);
    let ctx = AnalysisContext::new(filename.clone(), file_id, &reporter);

    let analysis = pipeline
        .analyze_source(&source, &ctx)
        .with_context(|| format!("semantic analysis of {} failed", filename))?;

    let stats = analysis.stats;
    println!(
        "semantic analysis complete: {} tokens, {} symbols, {} references, {} assignments, {} conditions",
        stats.tokens,
        analysis.symbols.len(),
        stats.references,
        stats.assignments_checked,
        stats.conditions_checked
    );

    if args.check {
        return Ok(());
    }

    pipeline.write_tables(&analysis, &args.out_dir)?;

    Ok(())
}
