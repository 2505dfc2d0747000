use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ppq_imagegen::cli::{CliOptions, argument_error, is_informational};
use ppq_imagegen::config::{GenerateConfig, setup_logging};
use ppq_imagegen::constants::API_KEY_ENV;
use ppq_imagegen::error::GenerateError;
use ppq_imagegen::requester::ImageRequester;
use tracing::debug;

fn run() -> Result<()> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let program = args
        .first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ppq-imagegen".to_string());

    let cli = match CliOptions::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) if is_informational(&err) => err.exit(),
        Err(err) => {
            let env_api_key = std::env::var(API_KEY_ENV).ok();
            return Err(argument_error(&err, &args, env_api_key.as_deref()).into());
        }
    };

    setup_logging(cli.debug).context("Failed to set up logging")?;

    let config = GenerateConfig::from_cli(cli, &program)?;
    let requester = ImageRequester::from_config(&config)?;

    println!("Generating with {}...", config.model);
    debug!("Timeout {:?}, endpoint {}", config.timeout, config.endpoint);

    let generated = requester.generate(&config.output_path, &config.model, &config.prompt)?;
    println!("{generated}");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<GenerateError>() {
                Some(generate_err) => eprintln!("{}", generate_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
