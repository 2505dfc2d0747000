//! Shared constants for talking to PPQ.ai
//!

/// Chat completions endpoint that produces images.
pub const DEFAULT_ENDPOINT: &str = "https://api.ppq.ai/chat/completions";

/// Best value image model, used when no model is given.
pub const DEFAULT_MODEL: &str = "openai/gpt-5-image-mini";

/// Models known to return images. Others are allowed but warned about.
pub const KNOWN_IMAGE_MODELS: &[&str] = &[
    "openai/gpt-5-image",
    "openai/gpt-5-image-mini",
    "google/gemini-3-pro-image-preview",
    "google/gemini-2.5-flash-image",
];

/// Output types requested from the upstream, without `image` no image is returned.
pub const MODALITIES: [&str; 2] = ["image", "text"];

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "PPQ_API_KEY";

/// Default request timeout in seconds, image generation is slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Maximum number of characters of an error body shown to the user.
pub const ERROR_BODY_LIMIT: usize = 2000;

/// Prefix every inline image URL starts with.
pub const DATA_URI_PREFIX: &str = "data:";
