//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::Provider;

/// Oral-Eval - AI-assisted grading of spoken exams
#[derive(Parser, Debug)]
#[command(name = "oral-eval")]
#[command(version)]
#[command(about = "Grade a recorded oral exam against reference material using Groq or Gemini")]
#[command(long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Recording of the student's answer (mp3, wav, m4a, ogg, flac, webm)
    #[arg(short = 'a', long, value_name = "FILE", required = true)]
    pub audio: Option<PathBuf>,

    /// Reference material the answer is graded against (plain text)
    #[arg(short = 'm', long, value_name = "FILE", required = true)]
    pub material: Option<PathBuf>,

    /// Teacher's rubric (plain text); the default weighting applies without one
    #[arg(short = 'r', long, value_name = "FILE")]
    pub rubric: Option<PathBuf>,

    /// Provider for transcription and completion
    #[arg(short = 'p', long, value_name = "PROVIDER")]
    pub provider: Option<ProviderArg>,

    /// Spoken language hint for transcription (ISO-639-1, e.g. es, en)
    #[arg(short = 'l', long, value_name = "CODE")]
    pub language: Option<String>,

    /// Grade the raw transcript without the normalization pass
    #[arg(long)]
    pub no_normalize: bool,

    /// Print the result envelope as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the evaluation as pretty JSON to a file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Abort the evaluation after this many seconds
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Show debug logs on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Provider argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Groq,
    Gemini,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Groq => Provider::Groq,
            ProviderArg::Gemini => Provider::Gemini,
        }
    }
}

/// Parsed evaluation options
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    pub audio: PathBuf,
    pub material: PathBuf,
    pub rubric: Option<PathBuf>,
    pub json: bool,
    pub export: Option<PathBuf>,
    pub timeout: Option<std::time::Duration>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "provider",
    "groq_api_key",
    "gemini_api_key",
    "llm_model",
    "transcription_model",
    "language",
    "normalize",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_required_inputs() {
        let cli = Cli::parse_from(["oral-eval", "--audio", "answer.mp3", "--material", "notes.txt"]);
        assert_eq!(cli.audio, Some(PathBuf::from("answer.mp3")));
        assert_eq!(cli.material, Some(PathBuf::from("notes.txt")));
        assert!(cli.rubric.is_none());
        assert!(cli.provider.is_none());
        assert!(!cli.no_normalize);
        assert!(!cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_requires_audio_and_material() {
        let result = Cli::try_parse_from(["oral-eval", "--audio", "answer.mp3"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_options() {
        let cli = Cli::parse_from([
            "oral-eval", "-a", "a.wav", "-m", "m.txt", "-r", "rubric.txt", "-p", "gemini", "-l",
            "es", "--no-normalize", "--json", "-o", "out.json", "-t", "90", "-v",
        ]);
        assert_eq!(cli.rubric, Some(PathBuf::from("rubric.txt")));
        assert_eq!(cli.provider, Some(ProviderArg::Gemini));
        assert_eq!(cli.language.as_deref(), Some("es"));
        assert!(cli.no_normalize);
        assert!(cli.json);
        assert_eq!(cli.export, Some(PathBuf::from("out.json")));
        assert_eq!(cli.timeout, Some(90));
        assert!(cli.verbose);
    }

    #[test]
    fn cli_rejects_unknown_provider() {
        let result =
            Cli::try_parse_from(["oral-eval", "-a", "a.mp3", "-m", "m.txt", "-p", "openai"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_subcommand_needs_no_inputs() {
        let cli = Cli::parse_from(["oral-eval", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["oral-eval", "config", "set", "provider", "gemini"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "provider");
            assert_eq!(value, "gemini");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn provider_arg_converts() {
        assert_eq!(Provider::from(ProviderArg::Groq), Provider::Groq);
        assert_eq!(Provider::from(ProviderArg::Gemini), Provider::Gemini);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("groq_api_key"));
        assert!(is_valid_config_key("normalize"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
