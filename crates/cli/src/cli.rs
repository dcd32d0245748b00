use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Segment OAE inspection reports and analyse them in batch.
///
/// `conclusion` checks the chapter IV ratings against a reference standard;
/// `audit` cross-checks chapter 3 anomalies against the annexes.
#[derive(Parser, Debug)]
#[command(name = "oae-audit", about = "Batch analysis of OAE inspection reports")]
pub struct CliArgs {
    /// Config profile; keys are looked up as {PROFILE}_{KEY} first
    #[arg(long, global = true, env = "OAE_PROFILE")]
    pub profile: Option<String>,

    /// Model name override (uses GEMINI_MODEL if not set)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API key (overrides GEMINI_API_KEY / API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract chapter IV. CONCLUSÃO and compare its ratings with the standard
    Conclusion {
        /// Report files (PDF or plain text), processed in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Reference standard document (falls back to OAE_STANDARD_PATH, then a placeholder)
        #[arg(long)]
        standard: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Cross-check chapter 3 anomalies against annexes II and VII
    Audit {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the scanner output for one file without calling the model
    Sections { file: PathBuf },
}

#[derive(clap::Args, Debug, Default)]
pub struct OutputArgs {
    /// Write the JSON report to this path instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Write the report into OAE_OUTPUT_DIR with a generated name
    #[arg(long, conflicts_with = "output")]
    pub save: bool,
}
