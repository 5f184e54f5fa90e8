use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::Directive};

use self::prelude::*;

mod cmd;
mod ocr;
mod prelude;

/// Analyze documents with OCR.
#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    after_help = r#"
Environment Variables:
  - RUST_LOG (optional): Override the default log filter.

  These variables may be set in a standard `.env` file.
"#
)]
struct Opts {
    #[clap(subcommand)]
    subcmd: Cmd,
}

/// The subcommands we support.
#[derive(Debug, Subcommand)]
enum Cmd {
    /// Analyze a document and print the raw OCR result as JSON.
    Analyze(cmd::analyze::AnalyzeOpts),
}

/// Our entry point, which can return an error. [`anyhow::Result`] will
/// automatically print a nice error message with optional backtrace.
fn main() -> Result<()> {
    // Initialize tracing. Logs go to stderr, leaving stdout for results.
    let directive =
        Directive::from_str("info").expect("built-in directive should be valid");
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Call our real `main` function now that logging is set up.
    real_main()
}

/// Our real entry point.
#[instrument(level = "debug", name = "main", skip_all)]
fn real_main() -> Result<()> {
    // Load environment variables from a `.env` file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let opts = Opts::parse();
    debug!("Parsed options: {:?}", opts);

    // Run the appropriate subcommand.
    match &opts.subcmd {
        Cmd::Analyze(opts) => cmd::analyze::cmd_analyze(opts),
    }
}
