//! Response model for /chat/completions and locating the returned image.
//!
//! PPQ returns generated images in `message.images[]` as data URIs. Some models
//! put them in `message.content` as typed parts instead, so that is checked
//! second. Every field is optional. Within a list `content`, parts that are
//! not objects or carry some other `type` are skipped. Entries of `images`
//! must still be objects with an object `image_url` and a string `url`,
//! otherwise the whole body is rejected as invalid JSON.

use serde::Deserialize;
use serde_json::Value;

use crate::data_uri::is_data_uri;
use crate::error::GenerateError;

/// Top level chat completion response.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    /// Candidate responses, only the first is used
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
    /// Billing info, PPQ includes `cost` in USD
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A candidate response.
#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    /// Absent means an empty message
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// The assistant message of a choice.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    /// Generated images
    #[serde(default)]
    pub images: Option<Vec<ImageEntry>>,
    /// Text, or a list of typed parts
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// An entry of `message.images`.
#[derive(Debug, Default, Deserialize)]
pub struct ImageEntry {
    /// Wrapper holding the URL
    #[serde(default)]
    pub image_url: Option<ImageUrl>,
}

/// `{ "url": "..." }`
#[derive(Debug, Default, Deserialize)]
pub struct ImageUrl {
    /// Usually a data URI
    #[serde(default)]
    pub url: Option<String>,
}

/// `message.content` is either plain text or a list of parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text answer
    Text(String),
    /// Typed parts
    Parts(Vec<ContentPart>),
    /// Anything else
    Other(Value),
}

/// One element of a content list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    /// An object with a `type` tag
    Typed(TypedPart),
    /// Non-objects and objects without a usable tag
    Other(Value),
}

/// Content parts we know how to read.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum TypedPart {
    /// `{ "type": "image_url", "image_url": { "url": "..." } }`
    #[serde(rename = "image_url")]
    ImageUrl {
        /// Wrapper holding the URL
        #[serde(default)]
        image_url: Option<ImageUrl>,
    },
    /// Text and every other part type
    #[serde(other)]
    Other,
}

/// Billing details.
#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    /// Cost of the call. Left loose since only numbers are reported.
    #[serde(default)]
    pub cost: Option<Value>,
}

/// Where in the message the image was found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageSource {
    /// `message.images[]`
    Images,
    /// `message.content[]` parts
    Content,
}

/// A data URI picked out of the response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocatedImage<'a> {
    /// The full data URI
    pub url: &'a str,
    /// Which path produced it
    pub source: ImageSource,
}

impl ImageUrl {
    fn data_uri(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| is_data_uri(url))
    }
}

impl ResponseMessage {
    /// First data URI in `images`, in order.
    pub fn image_from_images(&self) -> Option<&str> {
        self.images
            .iter()
            .flatten()
            .filter_map(|entry| entry.image_url.as_ref())
            .find_map(ImageUrl::data_uri)
    }

    /// First data URI among `image_url` parts of a list `content`.
    pub fn image_from_content(&self) -> Option<&str> {
        let Some(MessageContent::Parts(parts)) = &self.content else {
            return None;
        };
        parts.iter().find_map(|part| match part {
            ContentPart::Typed(TypedPart::ImageUrl {
                image_url: Some(image_url),
            }) => image_url.data_uri(),
            _ => None,
        })
    }

    /// Checks `images` first and only then falls back to `content`.
    pub fn locate_image(&self) -> Option<LocatedImage<'_>> {
        if let Some(url) = self.image_from_images() {
            return Some(LocatedImage {
                url,
                source: ImageSource::Images,
            });
        }
        self.image_from_content().map(|url| LocatedImage {
            url,
            source: ImageSource::Content,
        })
    }
}

impl ChatResponse {
    /// Parses a raw response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GenerateError> {
        serde_json::from_slice(bytes).map_err(GenerateError::from)
    }

    /// Message of the first choice, an empty one when the choice has none.
    pub fn first_message(&self) -> Result<&ResponseMessage, GenerateError> {
        static EMPTY: ResponseMessage = ResponseMessage {
            images: None,
            content: None,
        };
        let choice = self
            .choices
            .as_deref()
            .and_then(|choices| choices.first())
            .ok_or(GenerateError::NoChoices)?;
        Ok(choice.message.as_ref().unwrap_or(&EMPTY))
    }

    /// Finds the image to save.
    pub fn locate_image(&self) -> Result<LocatedImage<'_>, GenerateError> {
        self.first_message()?
            .locate_image()
            .ok_or(GenerateError::NoImageFound)
    }

    /// Reported cost when present and non-zero.
    pub fn cost(&self) -> Option<f64> {
        self.usage
            .as_ref()
            .and_then(|usage| usage.cost.as_ref())
            .and_then(Value::as_f64)
            .filter(|cost| *cost != 0.0)
    }
}
