//! Error handling

use std::path::PathBuf;

use crate::constants::API_KEY_ENV;

/// Everything that can stop an image from being generated.
#[derive(Debug)]
pub enum GenerateError {
    /// The API key environment variable is unset or empty
    MissingApiKey,
    /// No output path was given, carries the program name for the usage line
    MissingOutputPath(String),
    /// No prompt was given
    MissingPrompt,
    /// clap rejected the command line
    InvalidArguments(String),
    /// The endpoint override could not be parsed
    InvalidEndpoint(url::ParseError),
    /// The request never got a response (connect failure, timeout, ...)
    Transport(reqwest::Error),
    /// The upstream answered with a non-success status
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, already truncated
        body: String,
    },
    /// A success response that was not the JSON we expected
    InvalidJson(serde_json::Error),
    /// The response had no choices at all
    NoChoices,
    /// A `data:` URL without the comma separating header and payload
    MalformedDataUri,
    /// The data URI payload was not valid base64
    Base64(base64::DecodeError),
    /// Neither `images` nor `content` held an inline image
    NoImageFound,
    /// Writing the decoded image failed
    Write {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "{API_KEY_ENV} not set"),
            Self::MissingOutputPath(program) => {
                write!(f, "Usage: {program} <output.png> [model] [prompt]")
            }
            Self::MissingPrompt => write!(f, "prompt required as 3rd argument"),
            Self::InvalidArguments(message) => write!(f, "{message}"),
            Self::InvalidEndpoint(err) => write!(f, "Invalid endpoint URL: {err}"),
            Self::Transport(err) if err.is_timeout() => write!(f, "Request timed out: {err}"),
            Self::Transport(err) => write!(f, "Request failed: {err}"),
            Self::Api { status, body } => write!(f, "API error {status}: {body}"),
            Self::InvalidJson(err) => write!(f, "Failed to parse response JSON: {err}"),
            Self::NoChoices => write!(f, "No choices in response"),
            Self::MalformedDataUri => write!(f, "Image data URI has no payload"),
            Self::Base64(err) => write!(f, "Failed to base64-decode image: {err}"),
            Self::NoImageFound => write!(f, "No image found in response."),
            Self::Write { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
        }
    }
}

impl GenerateError {
    /// The line printed on stderr.
    ///
    /// Usage, API and response-shape failures are printed bare, everything
    /// else gets an `Error: ` prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingOutputPath(_)
            | Self::Api { .. }
            | Self::NoChoices
            | Self::NoImageFound => self.to_string(),
            _ => format!("Error: {self}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEndpoint(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::InvalidJson(err) => Some(err),
            Self::Base64(err) => Some(err),
            Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        GenerateError::Transport(err)
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        GenerateError::InvalidJson(err)
    }
}

impl From<base64::DecodeError> for GenerateError {
    fn from(err: base64::DecodeError) -> Self {
        GenerateError::Base64(err)
    }
}

impl From<url::ParseError> for GenerateError {
    fn from(err: url::ParseError) -> Self {
        GenerateError::InvalidEndpoint(err)
    }
}
