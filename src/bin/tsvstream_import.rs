use std::io::Write;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use tsvstream::cli::{ImportArgs, LogFormat, ensure_all_imported};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = args.builder()?.build()?;
    if engine.inputs().is_empty() {
        return Err("no inputs given; pass file paths, \"-\" or --config".into());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let reports = engine
        .import_all(|target, offer| match serde_json::to_string(&offer) {
            Ok(json) => {
                if let Err(e) = writeln!(out, "{json}") {
                    error!(input = %target, error = %e, "failed to write offer");
                }
            }
            Err(e) => error!(input = %target, error = %e, "failed to encode offer"),
        })
        .await?;

    let imported: usize = reports.iter().map(|r| r.summary.imported).sum();
    let failed: usize = reports.iter().map(|r| r.summary.failures.len()).sum();
    info!(inputs = reports.len(), imported, failed, "import complete");
    ensure_all_imported(&reports)?;
    Ok(())
}

fn main() {
    let args = ImportArgs::parse();
    init_tracing(args.log_format);

    if let Err(e) = run_blocking(args) {
        error!("{e}");
        eprintln!("tsvstream-import error: {e}");
        std::process::exit(1);
    }
}

fn run_blocking(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run(args))
}
