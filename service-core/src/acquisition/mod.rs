//! Source acquisition.
//!
//! Turns raw user input (pasted text, an uploaded file, a URL, an image)
//! into a [`Source`]: the content payload plus a human-readable label.
//! Every strategy is stateless and enforces its own minimum length.

pub mod html;
pub mod relay;

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub use relay::{DEFAULT_RELAY_BASE_URL, RelayFetcher};

/// Minimum characters for uploaded file content.
pub const MIN_FILE_CHARS: usize = 20;
/// Minimum characters for pasted text, after trimming.
pub const MIN_PASTED_CHARS: usize = 50;
/// Minimum characters of readable text extracted from a fetched page.
pub const MIN_URL_CHARS: usize = 100;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcquisitionError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to connect to the fetching service. Please check your internet connection.")]
    RelayUnreachable(String),

    #[error(
        "The URL could not be accessed (Status: {status}). The website might be blocking access or is offline."
    )]
    OriginUnavailable { status: u16 },

    #[error("Failed to read the selected file.")]
    FileRead(String),
}

impl AcquisitionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcquisitionError::Validation(_) | AcquisitionError::FileRead(_) => ErrorKind::Validation,
            AcquisitionError::RelayUnreachable(_) | AcquisitionError::OriginUnavailable { .. } => {
                ErrorKind::Network
            }
        }
    }

    fn validation(message: &str) -> Self {
        AcquisitionError::Validation(message.to_string())
    }
}

/// What kind of payload a source carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Image,
    Url,
}

/// How a source was obtained; decides its minimum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionMode {
    Pasted,
    File,
    Url,
    Image,
}

impl AcquisitionMode {
    /// Minimum payload size: characters for text modes, bytes for images.
    pub fn min_len(self) -> usize {
        match self {
            AcquisitionMode::Pasted => MIN_PASTED_CHARS,
            AcquisitionMode::File => MIN_FILE_CHARS,
            AcquisitionMode::Url => MIN_URL_CHARS,
            AcquisitionMode::Image => 1,
        }
    }

    pub fn media_kind(self) -> MediaKind {
        match self {
            AcquisitionMode::Pasted | AcquisitionMode::File => MediaKind::Text,
            AcquisitionMode::Url => MediaKind::Url,
            AcquisitionMode::Image => MediaKind::Image,
        }
    }

    fn too_short_message(self) -> &'static str {
        match self {
            AcquisitionMode::Pasted => "Please paste more content into the text area.",
            AcquisitionMode::File => "The selected file has very little content.",
            AcquisitionMode::Url => {
                "Could not extract enough readable content from the URL. The page might be empty or heavily reliant on JavaScript."
            }
            AcquisitionMode::Image => "The selected image is empty.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    Text(String),
    Image { mime_type: String, data: Vec<u8> },
}

/// Normalized input for one analysis. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    content: SourceContent,
    description: String,
    mode: AcquisitionMode,
}

impl Source {
    /// Build a source without checking its length; see [`Source::check_minimum`].
    pub fn new(content: SourceContent, description: impl Into<String>, mode: AcquisitionMode) -> Self {
        Self {
            content,
            description: description.into(),
            mode,
        }
    }

    pub fn content(&self) -> &SourceContent {
        &self.content
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn mode(&self) -> AcquisitionMode {
        self.mode
    }

    pub fn media_kind(&self) -> MediaKind {
        self.mode.media_kind()
    }

    /// Text payload, `None` for images.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            SourceContent::Text(text) => Some(text),
            SourceContent::Image { .. } => None,
        }
    }

    /// Characters of text, or bytes of image data.
    pub fn len(&self) -> usize {
        match &self.content {
            SourceContent::Text(text) => text.chars().count(),
            SourceContent::Image { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject sources below their mode's minimum length.
    pub fn check_minimum(&self) -> Result<(), AcquisitionError> {
        if self.len() < self.mode.min_len() {
            return Err(AcquisitionError::validation(self.mode.too_short_message()));
        }
        Ok(())
    }
}

/// Pasted text: trimmed, at least [`MIN_PASTED_CHARS`] characters.
pub fn from_pasted_text(raw: &str) -> Result<Source, AcquisitionError> {
    let source = Source::new(
        SourceContent::Text(raw.trim().to_string()),
        "Pasted Text",
        AcquisitionMode::Pasted,
    );
    source.check_minimum()?;
    Ok(source)
}

/// Uploaded file: decoded as UTF-8 (lossy, untrimmed), at least [`MIN_FILE_CHARS`] characters.
pub fn from_file_bytes(file_name: &str, bytes: &[u8]) -> Result<Source, AcquisitionError> {
    if file_name.trim().is_empty() {
        return Err(AcquisitionError::validation("Please select a file to analyze."));
    }

    let content = String::from_utf8_lossy(bytes).into_owned();
    let source = Source::new(
        SourceContent::Text(content),
        format!("File: {}", file_name),
        AcquisitionMode::File,
    );
    source.check_minimum()?;
    Ok(source)
}

/// Image upload: bytes are passed through untouched with their declared media type.
pub fn from_image(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<Source, AcquisitionError> {
    if !mime_type.starts_with("image/") {
        return Err(AcquisitionError::Validation(format!(
            "Unsupported image type: {}",
            mime_type
        )));
    }

    let source = Source::new(
        SourceContent::Image {
            mime_type: mime_type.to_string(),
            data: bytes,
        },
        file_name,
        AcquisitionMode::Image,
    );
    source.check_minimum()?;
    Ok(source)
}

/// Parse user input as an absolute http(s) URL.
pub fn parse_target_url(raw: &str) -> Result<Url, AcquisitionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AcquisitionError::validation("Please enter a valid URL."));
    }

    let invalid = || {
        AcquisitionError::validation(
            "The URL you entered is not valid. Please check it and try again.",
        )
    };

    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}

/// URL: fetched through the relay, reduced to readable text, at least
/// [`MIN_URL_CHARS`] characters. Labelled with the host name.
pub async fn from_url(fetcher: &RelayFetcher, raw: &str) -> Result<Source, AcquisitionError> {
    let url = parse_target_url(raw)?;
    let page = fetcher.fetch_html(&url).await?;
    let text = html::extract_readable_text(&page);

    let source = Source::new(
        SourceContent::Text(text),
        url.host_str().unwrap_or_default(),
        AcquisitionMode::Url,
    );
    source.check_minimum()?;

    tracing::info!(
        host = %source.description(),
        chars = source.len(),
        "Extracted readable text from URL"
    );
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasted_text_below_minimum_is_rejected() {
        let err = from_pasted_text("ten chars!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Please paste more content into the text area.");
    }

    #[test]
    fn pasted_text_is_trimmed_before_measuring() {
        let padded = format!("   {}   ", "a".repeat(49));
        assert!(from_pasted_text(&padded).is_err());

        let source = from_pasted_text(&format!("  {}  ", "a".repeat(60))).unwrap();
        assert_eq!(source.text(), Some("a".repeat(60).as_str()));
        assert_eq!(source.description(), "Pasted Text");
        assert_eq!(source.media_kind(), MediaKind::Text);
    }

    #[test]
    fn file_content_keeps_whitespace_and_counts_characters() {
        let source = from_file_bytes("notes.txt", "héllo wörld, this is a note".as_bytes()).unwrap();
        assert_eq!(source.description(), "File: notes.txt");
        assert_eq!(source.mode(), AcquisitionMode::File);

        let err = from_file_bytes("tiny.txt", b"  short  ").unwrap_err();
        assert_eq!(err.to_string(), "The selected file has very little content.");
    }

    #[test]
    fn file_without_name_is_rejected() {
        let err = from_file_bytes("", &[b'a'; 40]).unwrap_err();
        assert_eq!(err.to_string(), "Please select a file to analyze.");
    }

    #[test]
    fn image_requires_image_media_type_and_bytes() {
        assert!(from_image("scan.pdf", "application/pdf", vec![1, 2, 3]).is_err());
        assert!(from_image("empty.png", "image/png", Vec::new()).is_err());

        let source = from_image("board.png", "image/png", vec![0x89, 0x50]).unwrap();
        assert_eq!(source.media_kind(), MediaKind::Image);
        assert_eq!(source.text(), None);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn url_parsing_rejects_garbage_and_non_http() {
        assert!(parse_target_url("").is_err());
        assert!(parse_target_url("not a url").is_err());
        assert!(parse_target_url("ftp://example.com/file").is_err());
        assert_eq!(
            parse_target_url(" https://example.com/a?b=c ").unwrap().host_str(),
            Some("example.com")
        );
    }

    #[test]
    fn minimums_follow_mode() {
        let just_enough = Source::new(
            SourceContent::Text("x".repeat(MIN_FILE_CHARS)),
            "File: a",
            AcquisitionMode::File,
        );
        assert!(just_enough.check_minimum().is_ok());

        let same_text_as_url = Source::new(
            SourceContent::Text("x".repeat(MIN_FILE_CHARS)),
            "example.com",
            AcquisitionMode::Url,
        );
        assert!(same_text_as_url.check_minimum().is_err());
    }
}
