// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into an AuditConfig
// 3. Start the link source (headless Chrome, or plain HTTP with --static)
// 4. Run the audit, printing to stdout
// 5. Exit with proper code (0 = done, 1 = bad links with --strict, 2 = error)
// =============================================================================

use clap::Parser;
use link_audit::cli::Cli;
use link_audit::config::AuditConfig;
use link_audit::{logging, open_source, run_audit};

use anyhow::Result;

// The multi-thread flavor is required: the browser source blocks inside
// tokio::task::block_in_place, which panics on a current-thread runtime.
#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = audit finished (bad links or not, unless --strict)
//   Ok(1) = bad links found and --strict was given
//   Err = something went wrong before the report was complete
async fn run() -> Result<i32> {
    // A missing URL ends the process right here with clap's usage message
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let config = AuditConfig::from_cli(&cli)?;

    // The source (and the browser inside it) is dropped when run() returns,
    // on the error path as well
    let source = open_source(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = run_audit(&source, &config, &mut out).await?;

    if config.strict && report.has_bad_links() {
        Ok(1)
    } else {
        Ok(0)
    }
}
