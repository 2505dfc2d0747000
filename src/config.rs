//! Config handling

use std::path::PathBuf;
use std::time::Duration;

use tracing::log::LevelFilter;
use tracing::{debug, warn};
use url::Url;

use crate::cli::CliOptions;
use crate::constants::KNOWN_IMAGE_MODELS;
use crate::error::GenerateError;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("reqwest", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Validated input for a single generation.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// PPQ.ai API key
    pub api_key: String,
    /// Destination file
    pub output_path: PathBuf,
    /// Model identifier
    pub model: String,
    /// Prompt text, never empty
    pub prompt: String,
    /// Chat completions endpoint
    pub endpoint: Url,
    /// Request timeout
    pub timeout: Duration,
}

impl GenerateConfig {
    /// Checks the API key, then the output path, then the prompt.
    ///
    /// `program` is only used for the usage line.
    pub fn from_cli(cli: CliOptions, program: &str) -> Result<Self, GenerateError> {
        let api_key = cli
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(GenerateError::MissingApiKey)?;

        let output_path = cli
            .output_path
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| GenerateError::MissingOutputPath(program.to_string()))?;

        let prompt = cli
            .prompt
            .filter(|prompt| !prompt.is_empty())
            .ok_or(GenerateError::MissingPrompt)?;

        if !cli.extra.is_empty() {
            debug!("Ignoring extra arguments after the prompt: {:?}", cli.extra);
        }

        let endpoint = Url::parse(&cli.endpoint)?;

        if !KNOWN_IMAGE_MODELS.contains(&cli.model.as_str()) {
            warn!(
                "Model {} is not a known image model, it may not return an image",
                cli.model
            );
        }

        Ok(Self {
            api_key,
            output_path,
            model: cli.model,
            prompt,
            endpoint,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
