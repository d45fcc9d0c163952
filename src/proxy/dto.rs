//! Request and response types for the proxy endpoints.

use super::error::ProxyError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_YEAR_START: &str = "2019";
pub const DEFAULT_YEAR_END: &str = "2025";
pub const DEFAULT_CORPUS: &str = "26";
pub const DEFAULT_SMOOTHING: &str = "1";
pub const DEFAULT_CASE_INSENSITIVE: &str = "true";

/// Query parameters of `GET /ngram`, exactly as the browser sent them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NgramQuery {
    /// Comma-separated terms (required)
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub year_start: Option<String>,
    #[serde(default)]
    pub year_end: Option<String>,
    #[serde(default)]
    pub corpus: Option<String>,
    #[serde(default)]
    pub smoothing: Option<String>,
    #[serde(default)]
    pub case_insensitive: Option<String>,
}

/// Upstream query with every default filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamParams {
    pub content: String,
    pub year_start: String,
    pub year_end: String,
    pub corpus: String,
    pub smoothing: String,
    pub case_insensitive: String,
}

impl NgramQuery {
    /// Append one raw `key=value` pair
    ///
    /// A key given more than once keeps every value, comma-joined in order,
    /// so `content=crane&content=slate` reads as `content=crane,slate`.
    /// Unknown keys are ignored.
    pub fn push(&mut self, key: &str, value: String) {
        let slot = match key {
            "content" => &mut self.content,
            "year_start" => &mut self.year_start,
            "year_end" => &mut self.year_end,
            "corpus" => &mut self.corpus,
            "smoothing" => &mut self.smoothing,
            "case_insensitive" => &mut self.case_insensitive,
            _ => return,
        };
        match slot {
            Some(existing) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => *slot = Some(value),
        }
    }

    /// Fill in defaults; values that were given are passed through untouched
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::MissingContent` if `content` is absent or empty.
    pub fn resolve(self) -> Result<UpstreamParams, ProxyError> {
        let content = self
            .content
            .filter(|content| !content.is_empty())
            .ok_or(ProxyError::MissingContent)?;

        Ok(UpstreamParams {
            content,
            year_start: self.year_start.unwrap_or_else(|| DEFAULT_YEAR_START.to_string()),
            year_end: self.year_end.unwrap_or_else(|| DEFAULT_YEAR_END.to_string()),
            corpus: self.corpus.unwrap_or_else(|| DEFAULT_CORPUS.to_string()),
            smoothing: self.smoothing.unwrap_or_else(|| DEFAULT_SMOOTHING.to_string()),
            case_insensitive: self
                .case_insensitive
                .unwrap_or_else(|| DEFAULT_CASE_INSENSITIVE.to_string()),
        })
    }
}

impl FromIterator<(String, String)> for NgramQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            query.push(&key, value);
        }
        query
    }
}

impl UpstreamParams {
    /// Key/value pairs in the order the provider documents them
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("content", self.content.as_str()),
            ("year_start", self.year_start.as_str()),
            ("year_end", self.year_end.as_str()),
            ("corpus", self.corpus.as_str()),
            ("smoothing", self.smoothing.as_str()),
            ("case_insensitive", self.case_insensitive.as_str()),
        ]
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_defaults() {
        let query = NgramQuery {
            content: Some("crane,slate".to_string()),
            ..NgramQuery::default()
        };
        let params = query.resolve().unwrap();

        assert_eq!(
            params.pairs(),
            [
                ("content", "crane,slate"),
                ("year_start", "2019"),
                ("year_end", "2025"),
                ("corpus", "26"),
                ("smoothing", "1"),
                ("case_insensitive", "true"),
            ]
        );
    }

    #[test]
    fn resolve_keeps_explicit_values_verbatim() {
        let query = NgramQuery {
            content: Some("crane".to_string()),
            year_start: Some("1990".to_string()),
            smoothing: Some("0".to_string()),
            case_insensitive: Some("false".to_string()),
            ..NgramQuery::default()
        };
        let params = query.resolve().unwrap();

        assert_eq!(params.year_start, "1990");
        assert_eq!(params.year_end, "2025");
        assert_eq!(params.smoothing, "0");
        assert_eq!(params.case_insensitive, "false");
    }

    fn pairs(raw: &[(&str, &str)]) -> NgramQuery {
        raw.iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_are_comma_joined() {
        let query = pairs(&[
            ("content", "crane"),
            ("year_end", "2020"),
            ("content", "slate"),
        ]);
        assert_eq!(query.content.as_deref(), Some("crane,slate"));
        assert_eq!(query.year_end.as_deref(), Some("2020"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let query = pairs(&[("content", "crane"), ("callback", "x")]);
        let params = query.resolve().unwrap();
        assert_eq!(params.content, "crane");
        assert_eq!(params.corpus, "26");
    }

    #[test]
    fn resolve_requires_content() {
        assert!(matches!(
            NgramQuery::default().resolve(),
            Err(ProxyError::MissingContent)
        ));

        let blank = NgramQuery {
            content: Some(String::new()),
            ..NgramQuery::default()
        };
        assert!(matches!(blank.resolve(), Err(ProxyError::MissingContent)));
    }
}
