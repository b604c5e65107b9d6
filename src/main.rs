// ==========================================
// Abrazaderas - command line
// ==========================================
// Usage:
//   abrazaderas <encode|decode|parse|quote|diameters> <json-or-text>
//   abrazaderas import <file>... [--dry-run]
//
// Results are printed to stdout as JSON; logs go to stderr.
// The CLI has no catalog to write to, so imports always run as dry runs.
// ==========================================

use abrazaderas::api::ClampApi;
use abrazaderas::catalog::MemoryCatalog;
use abrazaderas::config::ConfigManager;
use abrazaderas::domain::ClampImportReport;
use abrazaderas::importer::{ClampImporter, ClampImporterImpl};
use abrazaderas::{i18n, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "usage:\n  abrazaderas <encode|decode|parse|quote|diameters> <json-or-text>\n  abrazaderas import <file>... [--dry-run]   (validation only, nothing is stored)";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    i18n::init_from_env();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    tracing::info!(version = abrazaderas::VERSION, command = %command, "{}", abrazaderas::APP_NAME);

    if command == "import" {
        return run_import(&args[1..]).await;
    }

    let config = match ConfigManager::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "config load failed");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let body = args[1..].join(" ");
    let api = ClampApi::new(config);
    let output = api.handle_json(command, &body);
    println!("{}", output);

    let ok = serde_json::from_str::<serde_json::Value>(&output)
        .ok()
        .and_then(|v| v.get("ok").and_then(|ok| ok.as_bool()))
        .unwrap_or(false);
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Files to import; flags are ignored.
fn import_files(args: &[String]) -> Vec<PathBuf> {
    args.iter()
        .filter(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .collect()
}

/// Dry-run every file against `catalog`.
async fn validate_imports(
    catalog: Arc<MemoryCatalog>,
    files: Vec<PathBuf>,
) -> Vec<Result<ClampImportReport, String>> {
    ClampImporterImpl::new(catalog)
        .batch_import(files, true)
        .await
}

async fn run_import(args: &[String]) -> ExitCode {
    let files = import_files(args);
    if files.is_empty() {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }
    if !args.iter().any(|a| a == "--dry-run") {
        tracing::warn!("no catalog is attached to the CLI; running the import as a dry run");
    }

    let results = validate_imports(Arc::new(MemoryCatalog::new()), files).await;

    let mut failed = false;
    for result in results {
        match result {
            Ok(report) => match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("{}", e);
                    failed = true;
                }
            },
            Err(message) => {
                eprintln!("{}", message);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
