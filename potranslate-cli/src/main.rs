use std::{io, process::ExitCode};

use clap::Parser;
use potranslate::{Console, GengoClient, RunOutcome, run};
use potranslate_cli::{
    Args,
    ui::{outcome_message, terminal_width},
    validation::validate_catalog_path,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match execute(&args) {
        Ok(outcome) => {
            println!("{}", outcome_message(&outcome));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("warn,potranslate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn execute(args: &Args) -> Result<RunOutcome, String> {
    // Credentials are checked before the catalog is touched.
    let config = args.client_config().map_err(|e| e.to_string())?;
    validate_catalog_path(&args.catalog)?;

    let client = GengoClient::new(config).map_err(|e| e.to_string())?;
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), terminal_width());

    run(&args.catalog, &client, &args.submit_options(), &mut console).map_err(|e| e.to_string())
}
