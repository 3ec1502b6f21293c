//! Main app runner for evaluation mode

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tokio::fs;
use tracing::{info, warn};

use crate::application::ports::ConfigStore;
use crate::application::{EvaluateExamUseCase, EvaluateInput};
use crate::domain::config::{AppConfig, Provider};
use crate::domain::evaluation::EvaluationEnvelope;
use crate::domain::transcription::{AudioData, AudioMimeType, MAX_UPLOAD_BYTES};
use crate::infrastructure::{create_gateway, create_transcriber, XdgConfigStore};

use super::args::EvaluateOptions;
use super::presenter::Presenter;
use super::progress::SpinnerObserver;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable selecting the provider
pub const PROVIDER_ENV: &str = "ORAL_EVAL_PROVIDER";

/// Run one evaluation end to end
pub async fn run_evaluation(config: AppConfig, options: EvaluateOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let provider = match config.selected_provider() {
        Ok(provider) => provider,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    // Adapters are built before reading any input so a missing key fails fast
    let adapters = create_transcriber(provider, &config)
        .and_then(|t| create_gateway(provider, &config).map(|g| (t, g)));
    let (transcriber, gateway) = match adapters {
        Ok(adapters) => adapters,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let input = match read_input(&options, &config, &presenter).await {
        Ok(input) => input,
        Err((message, code)) => {
            presenter.error(&message);
            return ExitCode::from(code);
        }
    };

    info!(
        provider = %provider,
        audio = %options.audio.display(),
        normalize = input.normalize,
        "starting evaluation"
    );

    let spinner = presenter.start_spinner("Starting evaluation...");
    let use_case = EvaluateExamUseCase::new(transcriber, gateway, SpinnerObserver::new(spinner));

    let envelope = tokio::select! {
        envelope = with_timeout(use_case.execute(input), options.timeout) => envelope,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("evaluation interrupted");
            EvaluationEnvelope::failure("Evaluation cancelled")
        }
    };

    if envelope.success {
        presenter.spinner_success("Evaluation complete");
    } else {
        presenter.spinner_fail("Evaluation failed");
    }

    report(&presenter, &envelope, &options).await
}

async fn with_timeout(
    evaluation: impl std::future::Future<Output = EvaluationEnvelope>,
    timeout: Option<std::time::Duration>,
) -> EvaluationEnvelope {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, evaluation)
            .await
            .unwrap_or_else(|_| {
                EvaluationEnvelope::failure(format!(
                    "Evaluation timed out after {} seconds",
                    limit.as_secs()
                ))
            }),
        None => evaluation.await,
    }
}

/// Read the audio, material and rubric files named on the command line
async fn read_input(
    options: &EvaluateOptions,
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<EvaluateInput, (String, u8)> {
    let mime_type =
        AudioMimeType::from_path(&options.audio).map_err(|e| (e.to_string(), EXIT_USAGE_ERROR))?;
    let bytes = fs::read(&options.audio)
        .await
        .map_err(|e| (read_failure(&options.audio, e), EXIT_ERROR))?;
    let audio = AudioData::new(bytes, mime_type);

    if audio.exceeds_upload_limit() {
        presenter.warn(&format!(
            "Audio is {}; providers may reject uploads over {} MB",
            audio.human_readable_size(),
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ));
    }

    let reference_material = fs::read_to_string(&options.material)
        .await
        .map_err(|e| (read_failure(&options.material, e), EXIT_ERROR))?;
    if reference_material.trim().is_empty() {
        return Err((
            format!("Reference material is empty: {}", options.material.display()),
            EXIT_USAGE_ERROR,
        ));
    }

    let rubric = match &options.rubric {
        Some(path) => fs::read_to_string(path)
            .await
            .map_err(|e| (read_failure(path, e), EXIT_ERROR))?,
        None => String::new(),
    };

    Ok(EvaluateInput {
        audio,
        reference_material,
        rubric,
        normalize: config.normalize_or_default(),
        language_hint: config.language_hint().map(str::to_string),
    })
}

fn read_failure(path: &Path, err: std::io::Error) -> String {
    format!("Failed to read {}: {}", path.display(), err)
}

/// Print or export the envelope and pick the exit code
async fn report(
    presenter: &Presenter,
    envelope: &EvaluationEnvelope,
    options: &EvaluateOptions,
) -> ExitCode {
    if options.json {
        if let Err(e) = presenter.envelope_json(envelope) {
            presenter.error(&format!("Failed to serialize result: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let Some(evaluation) = envelope.evaluation.as_ref().filter(|_| envelope.success) else {
        if !options.json {
            presenter.error(envelope.error.as_deref().unwrap_or("Evaluation failed"));
        }
        return ExitCode::from(EXIT_ERROR);
    };

    if !options.json {
        presenter.evaluation(evaluation, envelope.raw_response.as_deref());
    }

    if let Some(path) = &options.export {
        let written = match serde_json::to_string_pretty(evaluation) {
            Ok(json) => fs::write(path, json).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match written {
            Ok(()) => presenter.success(&format!("Evaluation exported to {}", path.display())),
            Err(e) => {
                presenter.error(&format!("Failed to export to {}: {}", path.display(), e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Configuration read from the environment
pub fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.trim().is_empty());
    AppConfig {
        provider: var(PROVIDER_ENV),
        groq_api_key: var(Provider::Groq.api_key_env()),
        gemini_api_key: var(Provider::Gemini.api_key_env()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}
