//! Inline `data:<mime>;base64,<payload>` image URLs.

use base64::Engine;
use base64::engine::general_purpose;

use crate::constants::DATA_URI_PREFIX;
use crate::error::GenerateError;

/// A decoded inline image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataUri {
    /// MIME type from the header, eg `image/png`. Empty when the header has none.
    pub mime_type: String,
    /// Decoded payload bytes
    pub bytes: Vec<u8>,
}

/// Returns true for URLs carrying their content inline.
pub fn is_data_uri(url: &str) -> bool {
    url.starts_with(DATA_URI_PREFIX)
}

impl DataUri {
    /// Splits on the first comma and base64-decodes everything after it.
    pub fn decode(url: &str) -> Result<Self, GenerateError> {
        let (header, payload) = url
            .split_once(',')
            .ok_or(GenerateError::MalformedDataUri)?;
        let header = header.strip_prefix(DATA_URI_PREFIX).unwrap_or(header);
        let mime_type = header.split(';').next().unwrap_or_default().to_string();

        let cleaned: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = general_purpose::STANDARD.decode(cleaned)?;
        Ok(Self { mime_type, bytes })
    }
}
