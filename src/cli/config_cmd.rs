//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, Provider};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    let shown = if is_secret(key) {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    presenter.output(&display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn is_secret(key: &str) -> bool {
    key.ends_with("api_key")
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "provider" => {
            let provider: Provider = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.provider = Some(provider.as_str().to_string());
        }
        "groq_api_key" => config.groq_api_key = Some(required(value).map_err(invalid)?),
        "gemini_api_key" => config.gemini_api_key = Some(required(value).map_err(invalid)?),
        "llm_model" => config.llm_model = Some(required(value).map_err(invalid)?),
        "transcription_model" => {
            config.transcription_model = Some(required(value).map_err(invalid)?)
        }
        "language" => {
            let code = value.trim().to_lowercase();
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(invalid(format!(
                    "Invalid value '{}'. Use a two-letter ISO-639-1 code such as es or en",
                    value
                )));
            }
            config.language = Some(code);
        }
        "normalize" => {
            config.normalize = Some(
                parse_bool(value)
                    .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?,
            )
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "provider" => config.provider.clone(),
        "groq_api_key" => config.groq_api_key.as_deref().map(mask_api_key),
        "gemini_api_key" => config.gemini_api_key.as_deref().map(mask_api_key),
        "llm_model" => config.llm_model.clone(),
        "transcription_model" => config.transcription_model.clone(),
        "language" => config.language.clone(),
        "normalize" => config.normalize.map(|b| b.to_string()),
        _ => None,
    }
}

fn required(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("Value must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn mask_api_key_long() {
        assert_eq!(mask_api_key("gsk_abcdefghijklmnop"), "gsk_...mnop");
    }

    #[test]
    fn mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "*****");
    }

    #[test]
    fn provider_is_normalized() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "provider", " Gemini ").unwrap();
        assert_eq!(config.provider.as_deref(), Some("gemini"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "provider", "openai").is_err());
        assert!(apply_value(&mut config, "normalize", "sometimes").is_err());
        assert!(apply_value(&mut config, "language", "spanish").is_err());
        assert!(apply_value(&mut config, "groq_api_key", "  ").is_err());
    }

    #[test]
    fn api_keys_are_masked_on_display() {
        let config = AppConfig {
            groq_api_key: Some("gsk_1234567890abcd".to_string()),
            ..AppConfig::empty()
        };
        assert_eq!(
            display_value(&config, "groq_api_key").as_deref(),
            Some("gsk_...abcd")
        );
        assert!(display_value(&config, "gemini_api_key").is_none());
    }

    #[tokio::test]
    async fn set_persists_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "language".to_string(),
                value: "ES".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.language.as_deref(), Some("es"));
    }

    #[tokio::test]
    async fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let result = handle_config_command(
            ConfigAction::Get {
                key: "api_key".to_string(),
            },
            &store,
            &Presenter::new(),
        )
        .await;
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
