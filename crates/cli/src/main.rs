mod cli;
mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use oae_batch::{
    AuditProcessor, Batch, BatchKind, DocumentProcessor, InputDocument, Progress, TherapyProcessor,
};
use oae_core::{Config, ErrorRecord};
use oae_ingest::{
    extract_audit_sections, extract_conclusion, ExtensionPageTexts, PageTextProvider,
    ReferenceStandard,
};
use oae_llm::{LlmAnalyzer, ReportAnalyzer};

use crate::cli::{CliArgs, Command, OutputArgs};
use crate::report::BatchReport;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    oae_core::config::load_dotenv();
    let args = CliArgs::parse();
    let config = resolve_config(&args);
    config.log_summary();

    match args.command {
        Command::Conclusion { files, standard, output } => {
            run_conclusion(&config, &files, standard, &output).await
        }
        Command::Audit { files, output } => run_audit(&config, &files, &output).await,
        Command::Sections { file } => dump_sections(&file).await,
    }
}

/// Env config with CLI overrides applied.
fn resolve_config(args: &CliArgs) -> Config {
    let mut config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(&profile.to_uppercase()),
        None => Config::from_env(),
    };
    if let Some(ref model) = args.model {
        config.llm.gemini_model = model.clone();
    }
    if let Some(ref key) = args.api_key {
        config.llm.gemini_api_key = Some(key.clone());
    }
    config
}

fn build_analyzer(config: &Config) -> Result<Arc<dyn ReportAnalyzer>> {
    let analyzer = LlmAnalyzer::from_config(&config.llm)
        .context("failed to create LLM provider")?;
    Ok(Arc::new(analyzer))
}

async fn run_conclusion(
    config: &Config,
    files: &[PathBuf],
    standard_path: Option<PathBuf>,
    output: &OutputArgs,
) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let pages: Arc<dyn PageTextProvider> = Arc::new(ExtensionPageTexts::new());
    let (docs, mut notices) = read_documents(files).await;

    let standard_path = standard_path.or_else(|| config.batch.standard_path.clone());
    let standard = match standard_path {
        Some(path) => match load_standard(pages.as_ref(), &path).await {
            Ok(standard) => Some(standard),
            Err(e) => {
                let name = display_name(&path);
                warn!(file = %name, error = %e, "reference standard unavailable, using placeholder");
                notices.push(ErrorRecord::warning(
                    name,
                    format!("reference standard could not be read, using placeholder: {e:#}"),
                ));
                None
            }
        },
        None => None,
    };

    let processor = TherapyProcessor::new(pages, analyzer, standard);
    let report = run_batch(BatchKind::Therapy, &docs, &processor, notices).await;
    emit(config, &report, output)
}

async fn run_audit(config: &Config, files: &[PathBuf], output: &OutputArgs) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let pages: Arc<dyn PageTextProvider> = Arc::new(ExtensionPageTexts::new());
    let (docs, notices) = read_documents(files).await;

    let processor = AuditProcessor::new(pages, analyzer);
    let report = run_batch(BatchKind::Audit, &docs, &processor, notices).await;
    emit(config, &report, output)
}

/// Run one batch with a stderr progress printer and Ctrl-C cancellation.
///
/// `notices` (unreadable inputs, standard warnings) are listed ahead of the
/// per-document errors in the report.
async fn run_batch<R>(
    kind: BatchKind,
    docs: &[InputDocument],
    processor: &dyn DocumentProcessor<R>,
    mut notices: Vec<ErrorRecord>,
) -> BatchReport<R>
where
    R: Send + Serialize,
{
    let (progress_tx, printer) = spawn_progress_printer();
    let cancel = cancel_on_ctrl_c();

    let mut batch = Batch::new(kind);
    let summary = batch.run(docs, processor, &progress_tx, Some(cancel)).await;

    stop_progress_printer(progress_tx, printer).await;

    let (results, errors) = batch.into_parts();
    notices.extend(errors);
    let mut report = BatchReport::new(kind, results, notices);
    report.cancelled = summary.cancelled;
    report
}

fn emit<R: Serialize>(config: &Config, report: &BatchReport<R>, output: &OutputArgs) -> Result<()> {
    let path = match (&output.output, output.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(config.batch.output_dir.join(report.default_file_name())),
        (None, false) => None,
    };
    if let Some(written) = report.write(path.as_deref())? {
        info!(path = %written.display(), "report written");
    }
    Ok(())
}

/// Read every input; unreadable paths become error records instead of aborting.
async fn read_documents(files: &[PathBuf]) -> (Vec<InputDocument>, Vec<ErrorRecord>) {
    let mut docs = Vec::with_capacity(files.len());
    let mut errors = Vec::new();
    for path in files {
        match InputDocument::from_path(path).await {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read input");
                errors.push(ErrorRecord::error(display_name(path), format!("failed to read file: {e}")));
            }
        }
    }
    (docs, errors)
}

async fn load_standard(pages: &dyn PageTextProvider, path: &Path) -> Result<ReferenceStandard> {
    let doc = InputDocument::from_path(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let standard = ReferenceStandard::load(pages, &doc.file_name, &doc.bytes)
        .await
        .with_context(|| format!("failed to extract {}", doc.file_name))?;
    Ok(standard)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn spawn_progress_printer() -> (mpsc::UnboundedSender<Progress>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Progress>();
    let handle = tokio::spawn(async move {
        while let Some(p) = rx.recv().await {
            eprintln!("[{}/{}] {}", p.current, p.total, p.current_file_name);
        }
    });
    (tx, handle)
}

/// Close the channel and wait for the printer to drain. Returns false if the task died.
async fn stop_progress_printer(tx: mpsc::UnboundedSender<Progress>, printer: JoinHandle<()>) -> bool {
    drop(tx);
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "progress printer task failed");
            false
        }
    }
}

/// Flips to `true` on Ctrl-C; the batch stops after the document in flight.
fn cancel_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current document");
            let _ = tx.send(true);
        }
    });
    rx
}

#[derive(Serialize)]
struct SectionsDump {
    file_name: String,
    pages: usize,
    conclusion: oae_core::ConclusionExtraction,
    audit: oae_core::AuditSections,
}

/// Debug view of both scans for one file.
async fn dump_sections(path: &Path) -> Result<()> {
    let doc = InputDocument::from_path(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let pages = ExtensionPageTexts::new()
        .page_texts(&doc.file_name, &doc.bytes)
        .await
        .with_context(|| format!("failed to extract {}", doc.file_name))?;

    let dump = SectionsDump {
        file_name: doc.file_name.clone(),
        pages: pages.len(),
        conclusion: extract_conclusion(&pages),
        audit: extract_audit_sections(&doc.file_name, &pages),
    };
    info!(
        file = %dump.file_name,
        pages = dump.pages,
        conclusion_found = dump.conclusion.is_found(),
        populated = ?dump.audit.populated(),
        "sections extracted"
    );
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}
