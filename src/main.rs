//! Oral-Eval CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use oral_eval::cli::{
    app::{load_merged_config, run_evaluation, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    EvaluateOptions,
};
use oral_eval::domain::config::{AppConfig, Provider};
use oral_eval::infrastructure::XdgConfigStore;

/// Install the stderr log subscriber; `RUST_LOG` wins over `-v`
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,oral_eval=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Clap enforces both outside of subcommands
    let (Some(audio), Some(material)) = (cli.audio, cli.material) else {
        presenter.error("--audio and --material are required");
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        provider: cli.provider.map(|p| Provider::from(p).as_str().to_string()),
        language: cli.language.clone(),
        normalize: if cli.no_normalize { Some(false) } else { None },
        ..Default::default()
    };

    let config = load_merged_config(cli_config).await;

    let options = EvaluateOptions {
        audio,
        material,
        rubric: cli.rubric,
        json: cli.json,
        export: cli.export,
        timeout: cli.timeout.map(std::time::Duration::from_secs),
    };

    run_evaluation(config, options).await
}
