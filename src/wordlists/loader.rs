//! Word list loading utilities
//!
//! Loads the candidate word list from a remote JSON resource or a local file.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Published 5-letter word list used when no source is given
pub const DEFAULT_WORD_LIST_URL: &str =
    "https://cheaderthecoder.github.io/5-Letter-words/words.json";

/// Error type for word list loading
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to fetch word list: {0}")]
    Http(#[from] reqwest::Error),
    #[error("word list request failed with HTTP {0}")]
    Status(u16),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid word list JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the word list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// `http://` or `https://` URL serving `{ "words": [...] }`
    Remote(String),
    /// Local `.json` file (same shape) or plain text, one word per line
    File(PathBuf),
}

/// Shape of the JSON word list resource
#[derive(Debug, Deserialize)]
struct WordListPayload {
    words: Vec<String>,
}

impl WordSource {
    /// Interpret a CLI argument as a URL or a path
    ///
    /// # Examples
    /// ```
    /// use wordle_butler::wordlists::WordSource;
    ///
    /// assert!(matches!(WordSource::parse("https://example.com/w.json"), WordSource::Remote(_)));
    /// assert!(matches!(WordSource::parse("data/words.txt"), WordSource::File(_)));
    /// ```
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Self::Remote(arg.to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Load the word list, lowercasing every entry
    ///
    /// # Errors
    ///
    /// Returns `WordListError` on transport failures, non-success HTTP status,
    /// unreadable files or malformed JSON.
    pub async fn load(&self, client: &reqwest::Client) -> Result<Vec<String>, WordListError> {
        let words = match self {
            Self::Remote(url) => {
                debug!(%url, "fetching word list");
                let response = client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(WordListError::Status(status.as_u16()));
                }
                let body = response.bytes().await?;
                parse_json(&body)?
            }
            Self::File(path) => load_from_file(path).await?,
        };

        info!(source = %self, count = words.len(), "word list loaded");
        Ok(words)
    }
}

impl Default for WordSource {
    fn default() -> Self {
        Self::Remote(DEFAULT_WORD_LIST_URL.to_string())
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load words from a local file
///
/// `.json` files are parsed as `{ "words": [...] }`, anything else as one
/// word per line.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a JSON error for
/// malformed `.json` files.
pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordListError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(content.as_bytes())
    } else {
        Ok(parse_lines(&content))
    }
}

/// Parse a `{ "words": [...] }` document
///
/// # Errors
///
/// Returns `WordListError::Json` if the document does not have that shape.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<String>, WordListError> {
    let payload: WordListPayload = serde_json::from_slice(bytes)?;
    Ok(normalize(payload.words.iter().map(String::as_str)))
}

/// Parse plain text, one word per line, skipping blank lines
#[must_use]
pub fn parse_lines(content: &str) -> Vec<String> {
    normalize(content.lines())
}

fn normalize<'a>(words: impl Iterator<Item = &'a str>) -> Vec<String> {
    words
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}
