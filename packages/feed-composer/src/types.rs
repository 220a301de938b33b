//! Value types exchanged between the composer, the DOM and the posts endpoint

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ComposerError;

// ============================================================================
// Display Strategy
// ============================================================================

/// Visibility level attached to a post. Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DisplayStrategy {
    Public,
    FriendsOnly,
    Private,
}

impl DisplayStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStrategy::Public => "전체 공개",
            DisplayStrategy::FriendsOnly => "친구만",
            DisplayStrategy::Private => "나만 보기",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            DisplayStrategy::Public => 1,
            DisplayStrategy::FriendsOnly => 2,
            DisplayStrategy::Private => 3,
        }
    }

    pub fn variants() -> &'static [DisplayStrategy] {
        &[
            DisplayStrategy::Public,
            DisplayStrategy::FriendsOnly,
            DisplayStrategy::Private,
        ]
    }

    /// Map a dropdown label to its strategy. Surrounding whitespace is ignored.
    pub fn from_label(label: &str) -> Result<Self, ComposerError> {
        let label = label.trim();
        Self::variants()
            .iter()
            .copied()
            .find(|strategy| strategy.label() == label)
            .ok_or_else(|| ComposerError::UnknownDisplayStrategy(label.to_string()))
    }

    pub fn from_code(code: u8) -> Result<Self, ComposerError> {
        match code {
            1 => Ok(DisplayStrategy::Public),
            2 => Ok(DisplayStrategy::FriendsOnly),
            3 => Ok(DisplayStrategy::Private),
            other => Err(ComposerError::InvalidDisplayStrategyCode(other)),
        }
    }
}

impl From<DisplayStrategy> for u8 {
    fn from(strategy: DisplayStrategy) -> Self {
        strategy.code()
    }
}

impl TryFrom<u8> for DisplayStrategy {
    type Error = ComposerError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        DisplayStrategy::from_code(code)
    }
}

/// Accepts a dropdown label, an English alias or the integer code
impl FromStr for DisplayStrategy {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "1" => Ok(DisplayStrategy::Public),
            "friends" | "friends-only" | "2" => Ok(DisplayStrategy::FriendsOnly),
            "private" | "3" => Ok(DisplayStrategy::Private),
            _ => DisplayStrategy::from_label(s),
        }
    }
}

impl fmt::Display for DisplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Posts Endpoint
// ============================================================================

/// Body of `POST <page-url>/posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub contents: String,
    pub display_strategy: DisplayStrategy,
}

/// What the composer needs to know about the endpoint's response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// True when the request was redirected; `url` is then the redirect target.
    pub redirected: bool,
    pub url: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of a submission as seen by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Browser was sent to the redirect target
    Redirected(String),
    /// Current page was reloaded
    Reloaded,
    /// Neither redirect nor success; nothing happened on the page
    Ignored { status: u16 },
}

// ============================================================================
// Image Preview
// ============================================================================

/// Where a selected file's bytes live
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
    #[cfg(feature = "web")]
    Browser(web_sys::File),
}

/// A file taken from the file picker
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    /// Declared media type, e.g. `image/png`. May be empty.
    pub media_type: String,
    pub size: u64,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn in_memory(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }
}

/// A `data:<media-type>;base64,<payload>` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{};base64,{}", media_type, payload))
    }

    /// Validate a base64 data URL string
    pub fn parse(url: impl Into<String>) -> Result<Self, ComposerError> {
        let url = Self(url.into());
        url.decode()?;
        Ok(url)
    }

    /// Split into media type and decoded bytes
    pub fn decode(&self) -> Result<(String, Vec<u8>), ComposerError> {
        let rest = self
            .0
            .strip_prefix("data:")
            .ok_or_else(|| ComposerError::InvalidDataUrl("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ComposerError::InvalidDataUrl("missing payload separator".to_string()))?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| ComposerError::InvalidDataUrl("payload is not base64".to_string()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ComposerError::InvalidDataUrl(e.to_string()))?;
        Ok((media_type.to_string(), bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of handling a file-picker change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    NoFile,
    NotAnImage { media_type: String },
    /// A newer selection started before this read finished
    Superseded,
    Rendered(DataUrl),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_to_codes() {
        assert_eq!(DisplayStrategy::from_label("전체 공개").unwrap().code(), 1);
        assert_eq!(DisplayStrategy::from_label("친구만").unwrap().code(), 2);
        assert_eq!(DisplayStrategy::from_label("나만 보기").unwrap().code(), 3);
    }

    #[test]
    fn label_whitespace_is_ignored() {
        assert_eq!(
            DisplayStrategy::from_label("\n  친구만  ").unwrap(),
            DisplayStrategy::FriendsOnly
        );
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = DisplayStrategy::from_label("everyone").unwrap_err();
        assert!(matches!(err, ComposerError::UnknownDisplayStrategy(ref l) if l == "everyone"));
    }

    #[test]
    fn label_and_code_round_trip_for_every_variant() {
        for strategy in DisplayStrategy::variants() {
            assert_eq!(DisplayStrategy::from_label(strategy.label()).unwrap(), *strategy);
            assert_eq!(DisplayStrategy::from_code(strategy.code()).unwrap(), *strategy);
        }
    }

    #[test]
    fn parses_aliases_codes_and_labels() {
        assert_eq!("public".parse::<DisplayStrategy>().unwrap(), DisplayStrategy::Public);
        assert_eq!("Friends-Only".parse::<DisplayStrategy>().unwrap(), DisplayStrategy::FriendsOnly);
        assert_eq!("3".parse::<DisplayStrategy>().unwrap(), DisplayStrategy::Private);
        assert_eq!("친구만".parse::<DisplayStrategy>().unwrap(), DisplayStrategy::FriendsOnly);
        assert!("4".parse::<DisplayStrategy>().is_err());
    }

    #[test]
    fn codes_outside_range_are_rejected() {
        assert!(DisplayStrategy::from_code(0).is_err());
        assert!(DisplayStrategy::from_code(4).is_err());
        assert!(serde_json::from_str::<DisplayStrategy>("7").is_err());
    }

    #[test]
    fn request_serializes_with_camel_case_and_integer_code() {
        let request = CreatePostRequest {
            contents: "hello".to_string(),
            display_strategy: DisplayStrategy::Public,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"contents":"hello","displayStrategy":1}"#
        );
    }

    #[test]
    fn success_covers_2xx_only() {
        let response = |status| ApiResponse {
            status,
            redirected: false,
            url: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(201).is_success());
        assert!(!response(302).is_success());
        assert!(!response(404).is_success());
    }

    #[test]
    fn data_url_decodes_to_original_bytes() {
        let bytes = vec![0x89, b'P', b'N', b'G', 0, 255, 17];
        let url = DataUrl::encode("image/png", &bytes);
        assert!(url.as_str().starts_with("data:image/png;base64,"));

        let (media_type, decoded) = url.decode().unwrap();
        assert_eq!(media_type, "image/png");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn malformed_data_urls_are_rejected() {
        assert!(DataUrl::parse("http://example.org/a.png").is_err());
        assert!(DataUrl::parse("data:image/png;base64").is_err());
        assert!(DataUrl::parse("data:text/plain,hello").is_err());
        assert!(DataUrl::parse("data:image/png;base64,@@@").is_err());
    }
}
