//! `gram build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use gram_config::{CliSettings, Config};
use gram_tag::tag::TagProcessor;
use gram_tag::{GramOptions, GramTag, MediaFetcher};
use rayon::prelude::*;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover gram.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for processed documents (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Media endpoint base URL (overrides config).
    #[arg(long, env = "GRAM_BASE_URL")]
    base_url: Option<String>,

    /// Timeout for each media lookup in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of processing one document.
#[derive(Debug)]
struct DocumentReport {
    path: PathBuf,
    rendered: usize,
    warnings: Vec<String>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source directory is
    /// missing, or any document fails to process.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            base_url: self.base_url,
            timeout_secs: self.timeout,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source_dir = &config.docs_resolved.source_dir;
        let output_dir = &config.docs_resolved.output_dir;
        if !source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Source directory not found: {}",
                source_dir.display()
            )));
        }

        output.info(&format!("Source: {}", source_dir.display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let documents = find_documents(source_dir, output_dir);
        tracing::info!(count = documents.len(), "Found documents");

        let gram = GramTag::new(
            GramOptions {
                base_url: config.media.base_url.clone(),
                escape_attributes: config.media.escape_attributes,
            },
            config.media.timeout(),
        );

        let results: Vec<Result<DocumentReport, CliError>> = documents
            .par_iter()
            .map(|rel_path| process_document(&gram, source_dir, output_dir, rel_path))
            .collect();

        let mut rendered = 0;
        let mut failed = 0;
        for result in results {
            match result {
                Ok(report) => {
                    for warning in &report.warnings {
                        output.warning(&format!("{}: {warning}", report.path.display()));
                    }
                    rendered += report.rendered;
                }
                Err(e) => {
                    output.error(&e.to_string());
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} documents failed",
                documents.len()
            )));
        }

        output.success(&format!(
            "Processed {} documents ({rendered} gram tags) to {}",
            documents.len(),
            output_dir.display()
        ));
        Ok(())
    }
}

/// Collect markdown documents under `source_dir`, relative to it.
///
/// Hidden entries and the output directory are skipped. Results are sorted.
fn find_documents(source_dir: &Path, output_dir: &Path) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    scan_directory(source_dir, Path::new(""), output_dir, &mut documents);
    documents.sort();
    documents
}

fn scan_directory(dir_path: &Path, rel_prefix: &Path, exclude: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let rel_path = rel_prefix.join(&name);
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

        if is_dir {
            if path != exclude {
                scan_directory(&path, &rel_path, exclude, out);
            }
        } else if path.extension().is_some_and(|e| e == "md") {
            out.push(rel_path);
        }
    }
}

/// Expand tags in one document and write it to the mirrored output path.
fn process_document<F>(
    gram: &GramTag<F>,
    source_dir: &Path,
    output_dir: &Path,
    rel_path: &Path,
) -> Result<DocumentReport, CliError>
where
    F: MediaFetcher + Clone + 'static,
{
    let source = source_dir.join(rel_path);
    let input = fs::read_to_string(&source).map_err(|e| CliError::File {
        path: source.clone(),
        source: e,
    })?;

    let mut processor = TagProcessor::new()
        .with_source_path(source.clone())
        .with_handler(gram.clone());
    let processed = processor
        .process(&input)
        .map_err(|e| CliError::Process {
            path: source.clone(),
            source: e,
        })?;

    let target = output_dir.join(rel_path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError::File {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(&target, processed).map_err(|e| CliError::File {
        path: target.clone(),
        source: e,
    })?;

    tracing::info!(path = %rel_path.display(), rendered = processor.rendered(), "Processed document");

    Ok(DocumentReport {
        path: rel_path.to_path_buf(),
        rendered: processor.rendered(),
        warnings: processor.warnings().to_vec(),
    })
}
