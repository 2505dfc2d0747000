//! Calls the image endpoint and saves what comes back.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::config::GenerateConfig;
use crate::constants::ERROR_BODY_LIMIT;
use crate::data_uri::DataUri;
use crate::error::GenerateError;
use crate::request::ChatRequest;
use crate::response::{ChatResponse, ImageSource};

/// Sends one image generation request per call.
#[derive(Debug, Clone)]
pub struct ImageRequester {
    client: reqwest::blocking::Client,
    endpoint: Url,
    api_key: String,
}

/// An image that was written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    /// Where the bytes went
    pub path: PathBuf,
    /// Number of bytes written
    pub size: usize,
    /// MIME type claimed by the data URI
    pub mime_type: String,
    /// Which part of the message held the image
    pub source: ImageSource,
    /// Cost in USD when the response reported one
    pub cost: Option<f64>,
}

impl fmt::Display for GeneratedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ImageSource::Images => {
                let size_kb = self.size as f64 / 1024.0;
                write!(f, "Saved: {} ({size_kb:.0} KB)", self.path.display())?;
                if let Some(cost) = self.cost {
                    write!(f, "\nCost: ${cost:.4}")?;
                }
                Ok(())
            }
            // content parts are reported in bytes and without cost
            ImageSource::Content => {
                write!(f, "Saved: {} ({} bytes)", self.path.display(), self.size)
            }
        }
    }
}

/// Cuts an error body down to at most [`ERROR_BODY_LIMIT`] characters.
pub fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

impl ImageRequester {
    /// Builds a requester with its own HTTP client.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: Url,
        timeout: Duration,
    ) -> Result<Self, GenerateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    /// Builds a requester from validated CLI input.
    pub fn from_config(config: &GenerateConfig) -> Result<Self, GenerateError> {
        Self::new(
            config.api_key.clone(),
            config.endpoint.clone(),
            config.timeout,
        )
    }

    /// Generates one image for `prompt` with `model` and writes it to `destination`.
    ///
    /// Nothing is written unless an image was found and decoded.
    pub fn generate(
        &self,
        destination: &Path,
        model: &str,
        prompt: &str,
    ) -> Result<GeneratedImage, GenerateError> {
        if prompt.is_empty() {
            return Err(GenerateError::MissingPrompt);
        }

        let body = self.send(model, prompt)?;
        let response = ChatResponse::from_slice(&body)?;
        let located = response.locate_image()?;
        debug!("Found image in {:?}", located.source);

        let decoded = DataUri::decode(located.url)?;
        match image::guess_format(&decoded.bytes) {
            Ok(format) => debug!("Decoded {} bytes of {:?}", decoded.bytes.len(), format),
            Err(_) => debug!(
                "Decoded {} bytes of unrecognised format ({})",
                decoded.bytes.len(),
                decoded.mime_type
            ),
        }

        write_image(destination, &decoded.bytes)?;
        debug!("Wrote {}", destination.display());

        Ok(GeneratedImage {
            path: destination.to_path_buf(),
            size: decoded.bytes.len(),
            mime_type: decoded.mime_type,
            source: located.source,
            cost: response.cost(),
        })
    }

    fn send(&self, model: &str, prompt: &str) -> Result<Vec<u8>, GenerateError> {
        debug!("POST {} model={}", self.endpoint, model);
        let resp = self
            .client
            .post(self.endpoint.as_str())
            .bearer_auth(&self.api_key)
            .json(&ChatRequest::new(model, prompt))
            .send()?;

        let status = resp.status();
        let bytes = resp.bytes()?;
        debug!("Response {} with {} bytes", status, bytes.len());

        if !status.is_success() {
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&bytes)),
            });
        }
        Ok(bytes.to_vec())
    }
}

fn write_image(destination: &Path, bytes: &[u8]) -> Result<(), GenerateError> {
    let write_err = |source| GenerateError::Write {
        path: destination.to_path_buf(),
        source,
    };
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(destination, bytes).map_err(write_err)
}
