mod cli;
mod error;
mod output;

use crate::cli::Args;
use crate::error::{ErrorKind, Result};
use crate::output::Printer;
use clap::{CommandFactory, Parser};
use exn::ResultExt;
use follina_config::Config;
use follina_inspect::{HttpFetcher, Inspector};
use follina_scan::{ScanOptions, scan};
use futures::StreamExt;
use std::io::IsTerminal;
use std::pin::pin;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.paths.is_empty() {
        // Printing help to stdout cannot meaningfully fail.
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("follina-scanner: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_logging(verbose: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("follina=debug,follina_inspect=debug,follina_scan=debug,follina_config=debug")
    } else {
        EnvFilter::new("follina=warn,follina_inspect=warn,follina_scan=warn,follina_config=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn configure(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .or_raise(|| ErrorKind::Config)?;
    if args.strict {
        config.manifest.strict = true;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    config.validate().or_raise(|| ErrorKind::Config)?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = configure(&args)?;
    let fetcher = HttpFetcher::new(config.timeout(), config.user_agent.as_deref())
        .or_raise(|| ErrorKind::HttpClient)?
        .with_max_body_bytes(config.max_body_bytes);
    let inspector = Inspector::new(Arc::new(fetcher))
        .with_selector(config.selector())
        .with_signature(config.signature.clone())
        .with_max_manifest_bytes(config.max_manifest_bytes);
    let options = ScanOptions { recursive: args.recursive };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .or_raise(|| ErrorKind::Runtime)?;
    let stdout = std::io::stdout();
    let colors = stdout.is_terminal();
    let mut printer = Printer::new(stdout.lock(), args.verbose, colors);

    runtime.block_on(async {
        let mut events = pin!(scan(&inspector, &args.paths, options));
        while let Some(event) = events.next().await {
            printer.event(&event).or_raise(|| ErrorKind::Output)?;
        }
        Ok::<_, error::Error>(())
    })
}
