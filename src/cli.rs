//! CLI parser
use clap::Parser;
use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::constants::{API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::error::GenerateError;

#[derive(Parser, Debug)]
#[command(name = "ppq-imagegen")]
#[command(about = "Generate an image via PPQ.ai and save it to a file")]
/// CLI Options
///
/// Positional arguments and the API key are checked by
/// [`crate::config::GenerateConfig::from_cli`] so every problem gets the
/// same exit status. Options go before the positionals, since the model and
/// prompt accept values starting with `-`.
pub struct CliOptions {
    /// Where to write the image, eg `icon.png`
    pub output_path: Option<PathBuf>,

    /// Image model, defaults to `openai/gpt-5-image-mini`
    #[clap(default_value = DEFAULT_MODEL, allow_hyphen_values = true)]
    pub model: String,

    /// What to draw, quote it when it has spaces
    #[clap(allow_hyphen_values = true)]
    pub prompt: Option<String>,

    /// Words after the prompt, ignored
    #[clap(
        hide = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub extra: Vec<String>,

    #[clap(long, env = API_KEY_ENV, hide_env_values = true)]
    /// PPQ.ai API key. Env: PPQ_API_KEY
    pub api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_ENDPOINT, env = "PPQ_API_URL")]
    /// Chat completions endpoint.
    /// Env: PPQ_API_URL
    pub endpoint: String,

    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "PPQ_TIMEOUT_SECS")]
    /// Request timeout in seconds, image generation can take minutes.
    /// Env: PPQ_TIMEOUT_SECS
    pub timeout_secs: u64,

    #[clap(
        long,
        help = "Enable debug logging",
        env = "PPQ_DEBUG",
        action = clap::ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    /// Enable debug logging. Env: PPQ_DEBUG
    pub debug: bool,
}

/// True for clap "errors" that are really `--help` or `--version` output.
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

/// Maps a parse failure onto the same errors validation produces.
///
/// A missing API key is still reported first, ahead of whatever clap
/// disliked.
pub fn argument_error(
    err: &clap::Error,
    args: &[OsString],
    env_api_key: Option<&str>,
) -> GenerateError {
    let key_in_args = args.iter().any(|arg| {
        let arg = arg.to_string_lossy();
        arg == "--api-key" || arg.starts_with("--api-key=")
    });
    let key_in_env = env_api_key.is_some_and(|key| !key.is_empty());
    if !key_in_args && !key_in_env {
        return GenerateError::MissingApiKey;
    }

    let rendered = err.to_string();
    let message = rendered.strip_prefix("error: ").unwrap_or(&rendered);
    GenerateError::InvalidArguments(message.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::try_parse_from(args).expect("parse args")
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn prompt_may_start_with_dash() {
        let cli = parse(&["gen", "out.png", "openai/gpt-5-image", "-dark mode icon"]);
        assert_eq!(cli.prompt.as_deref(), Some("-dark mode icon"));
    }

    #[test]
    fn words_after_prompt_are_ignored() {
        let cli = parse(&["gen", "out.png", "openai/gpt-5-image", "a", "red", "--fox"]);
        assert_eq!(cli.model, "openai/gpt-5-image");
        assert_eq!(cli.prompt.as_deref(), Some("a"));
        assert_eq!(cli.extra, vec!["red".to_string(), "--fox".to_string()]);
    }

    #[test]
    fn help_is_informational() {
        let err = CliOptions::try_parse_from(["gen", "--help"]).expect_err("help");
        assert!(is_informational(&err));
    }

    #[test]
    fn parse_failure_without_key_reports_missing_key() {
        let args = os_args(&["gen", "--timeout-secs", "abc", "out.png", "m", "p"]);
        let err = CliOptions::try_parse_from(&args).expect_err("bad timeout");
        assert!(!is_informational(&err));
        assert!(matches!(
            argument_error(&err, &args, None),
            GenerateError::MissingApiKey
        ));
        assert!(matches!(
            argument_error(&err, &args, Some("")),
            GenerateError::MissingApiKey
        ));
    }

    #[test]
    fn parse_failure_with_key_reports_clap_message() {
        let args = os_args(&["gen", "--timeout-secs", "abc", "out.png", "m", "p"]);
        let err = CliOptions::try_parse_from(&args).expect_err("bad timeout");

        let from_env = argument_error(&err, &args, Some("sk-test"));
        assert!(
            matches!(&from_env, GenerateError::InvalidArguments(message)
                if message.contains("--timeout-secs") && !message.starts_with("error:")),
            "got {from_env:?}"
        );

        let mut with_flag = args.clone();
        with_flag.insert(1, OsString::from("--api-key=sk-test"));
        assert!(matches!(
            argument_error(&err, &with_flag, None),
            GenerateError::InvalidArguments(_)
        ));
    }
}
