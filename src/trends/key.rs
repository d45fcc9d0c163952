//! Composite word-key for trend requests

use std::fmt;

/// Deduplicated, comma-joined word set
///
/// Two requests with the same key ask the provider for exactly the same data,
/// so the key doubles as the `content` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WordKey {
    words: Vec<String>,
    joined: String,
}

impl WordKey {
    /// Build a key from words, dropping blanks and repeats
    ///
    /// # Examples
    /// ```
    /// use wordle_butler::trends::WordKey;
    ///
    /// let key = WordKey::new(&["crane", "", "slate", "crane"]);
    /// assert_eq!(key.as_str(), "crane,slate");
    /// assert_eq!(key.words(), ["crane", "slate"]);
    /// ```
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(words.len());
        for word in words.iter().map(|w| w.as_ref().trim()) {
            if !word.is_empty() && !unique.iter().any(|seen| seen == word) {
                unique.push(word.to_string());
            }
        }
        let joined = unique.join(",");

        Self {
            words: unique,
            joined,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.joined
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for WordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined)
    }
}
