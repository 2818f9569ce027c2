//! Analysis driver and pipeline orchestration

use crate::common::{AnalysisResult, DiagnosticReporter};
use crate::sema::{self, Analysis, AnalyzerConfig};
use crate::tables::{OutputFormat, Tables, JSON_TABLES_FILE};
use crate::token::read_tokens;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration options for table output
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub dump_tokens: bool,
}

/// Analysis context providing access to diagnostics and file info
pub struct AnalysisContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self { filename, file_id, reporter }
    }
}

/// Pipeline that reads a token-record file, analyzes it and writes the tables
pub struct Pipeline {
    config: AnalyzerConfig,
    output: OutputConfig,
}

impl Pipeline {
    pub fn new(config: AnalyzerConfig, output: OutputConfig) -> Self {
        Self { config, output }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze token records, reporting any fault through the context
    pub fn analyze_source(&self, source: &str, ctx: &AnalysisContext) -> AnalysisResult<Analysis> {
        log::info!("reading token records from {}", ctx.filename);
        let tokens = match read_tokens(source) {
            Ok(tokens) => tokens,
            Err(e) => {
                ctx.reporter.report_error(ctx.file_id, &e);
                return Err(e);
            }
        };

        if self.output.dump_tokens {
            eprintln!("=== Tokens ===");
            for token in &tokens {
                eprintln!("{:?}", token);
            }
            eprintln!("=== End Tokens ===\n");
        }

        log::info!("analyzing {} tokens", tokens.len());
        match sema::analyze(tokens, &self.config) {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                ctx.reporter.report_error(ctx.file_id, &e);
                Err(e)
            }
        }
    }

    /// Write the tables of a finished analysis into `out_dir`
    pub fn write_tables(&self, analysis: &Analysis, out_dir: &Path) -> AnalysisResult<Vec<PathBuf>> {
        Tables::remove_stale(out_dir)?;

        let written = match self.output.format {
            OutputFormat::Text => Tables::build(analysis).write_to(out_dir)?,
            OutputFormat::Json => {
                fs::create_dir_all(out_dir)?;
                let json = Tables::to_json(analysis).map_err(std::io::Error::other)?;
                let path = out_dir.join(JSON_TABLES_FILE);
                fs::write(&path, json)?;
                vec![path]
            }
        };

        for path in &written {
            log::info!("wrote {}", path.display());
        }
        Ok(written)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default(), OutputConfig::default())
    }
}
