//! The fixed emoji catalog and the recognized-source predicate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default catalog location (WeChat emotion set)
pub const WECHAT_EMOJI_BASE_URL: &str =
    "https://res.wx.qq.com/mpres/htmledition/images/icon/emotion/";

/// Number of entries in the default catalog
pub const WECHAT_EMOJI_COUNT: usize = 50;

static HTTPS_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://([^/\s?#]+)(?:[/?#]|$)").expect("valid host regex"));

/// Error building an [`EmojiCatalog`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog base URL must be an https URL with a host: {0}")]
    InvalidBaseUrl(String),

    #[error("Catalog extension must not be empty")]
    EmptyExtension,
}

/// A numbered set of emoji images under one trusted host.
///
/// Entry `n` lives at `{base_url}{n}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiCatalog {
    base_url: String,
    host: String,
    count: usize,
    extension: String,
}

impl EmojiCatalog {
    /// Create a catalog, validating the base URL
    pub fn new(base_url: &str, count: usize, extension: &str) -> Result<Self, CatalogError> {
        let base_url = base_url.trim();
        let host = host_of(base_url)
            .ok_or_else(|| CatalogError::InvalidBaseUrl(base_url.to_string()))?
            .to_ascii_lowercase();

        let extension = extension.trim().trim_start_matches('.');
        if extension.is_empty() {
            return Err(CatalogError::EmptyExtension);
        }

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            base_url,
            host,
            count,
            extension: extension.to_string(),
        })
    }

    /// The default WeChat emotion catalog
    pub fn wechat() -> Self {
        Self {
            base_url: WECHAT_EMOJI_BASE_URL.to_string(),
            host: "res.wx.qq.com".to_string(),
            count: WECHAT_EMOJI_COUNT,
            extension: "gif".to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// URL of catalog entry `index`
    pub fn url(&self, index: usize) -> Option<String> {
        (index < self.count).then(|| format!("{}{}.{}", self.base_url, index, self.extension))
    }

    /// All catalog URLs in order
    pub fn entries(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.count).filter_map(|i| self.url(i))
    }

    /// Position of `url` in the numbered catalog, if it is one of its entries
    pub fn index_of(&self, url: &str) -> Option<usize> {
        let name = url.strip_prefix(&self.base_url)?;
        let number = name.strip_suffix(&self.extension)?.strip_suffix('.')?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: usize = number.parse().ok()?;
        (index < self.count && index.to_string() == number).then_some(index)
    }

    /// Check whether `url` is an acceptable embed source.
    ///
    /// The URL must be `https`, served from the catalog host, and free of
    /// characters that would break the `![alt](url)` token when re-parsed.
    pub fn recognizes(&self, url: &str) -> bool {
        if url.is_empty()
            || url
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\'' | '<' | '>'))
        {
            return false;
        }

        host_of(url).is_some_and(|host| host.eq_ignore_ascii_case(&self.host))
    }
}

impl Default for EmojiCatalog {
    fn default() -> Self {
        Self::wechat()
    }
}

fn host_of(url: &str) -> Option<&str> {
    HTTPS_HOST
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wechat_entries() {
        let catalog = EmojiCatalog::wechat();
        assert_eq!(catalog.len(), 50);
        assert_eq!(
            catalog.url(3).as_deref(),
            Some("https://res.wx.qq.com/mpres/htmledition/images/icon/emotion/3.gif")
        );
        assert_eq!(catalog.url(50), None);
        assert_eq!(catalog.entries().count(), 50);
    }

    #[test]
    fn test_recognizes_catalog_host() {
        let catalog = EmojiCatalog::wechat();
        assert!(catalog.recognizes(&catalog.url(0).unwrap()));
        assert!(catalog.recognizes("https://RES.wx.qq.com/other/path.png"));
        assert!(!catalog.recognizes("http://res.wx.qq.com/mpres/htmledition/images/icon/emotion/3.gif"));
        assert!(!catalog.recognizes("https://evil.example.com/3.gif"));
        assert!(!catalog.recognizes("https://res.wx.qq.com.evil.com/3.gif"));
        assert!(!catalog.recognizes("https://res.wx.qq.com/a b.gif"));
        assert!(!catalog.recognizes("https://res.wx.qq.com/a).gif"));
        assert!(!catalog.recognizes(""));
    }

    #[test]
    fn test_index_of() {
        let catalog = EmojiCatalog::wechat();
        assert_eq!(catalog.index_of(&catalog.url(42).unwrap()), Some(42));
        assert_eq!(
            catalog.index_of("https://res.wx.qq.com/mpres/htmledition/images/icon/emotion/07.gif"),
            None
        );
        assert_eq!(
            catalog.index_of("https://res.wx.qq.com/mpres/htmledition/images/icon/emotion/99.gif"),
            None
        );
        assert_eq!(catalog.index_of("https://res.wx.qq.com/3.gif"), None);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = EmojiCatalog::new("https://cdn.example.org/emoji", 8, ".png").unwrap();
        assert_eq!(catalog.host(), "cdn.example.org");
        assert_eq!(
            catalog.url(7).as_deref(),
            Some("https://cdn.example.org/emoji/7.png")
        );
        assert!(catalog.recognizes("https://cdn.example.org/emoji/7.png"));
    }

    #[test]
    fn test_invalid_catalog() {
        assert_eq!(
            EmojiCatalog::new("ftp://example.org/", 1, "gif"),
            Err(CatalogError::InvalidBaseUrl("ftp://example.org/".to_string()))
        );
        assert_eq!(
            EmojiCatalog::new("https://example.org/", 1, ""),
            Err(CatalogError::EmptyExtension)
        );
    }
}
