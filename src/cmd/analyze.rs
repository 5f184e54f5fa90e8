//! The `analyze` subcommand.

use clap::Args;

use crate::{ocr::OcrService, prelude::*};

/// Options for the `analyze` subcommand.
#[derive(Debug, Args)]
pub struct AnalyzeOpts {
    /// The path or URL of the document to analyze.
    document_path: String,
}

/// Run the `analyze` subcommand.
#[instrument(level = "debug", skip_all)]
pub fn cmd_analyze(opts: &AnalyzeOpts) -> Result<()> {
    let service = OcrService::new(None);
    let result = service.analyze_document(&opts.document_path)?;
    println!("{}", result);
    Ok(())
}
