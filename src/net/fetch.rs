use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Error during fetch
#[derive(Debug, Clone)]
pub struct FetchError {
    pub message: String,
    /// HTTP status of a non-success response, if any.
    pub status: Option<u16>,
}

impl FetchError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Where service documents come from.
///
/// Paths are relative to the site root, e.g. `data/highlights.json`.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, path: &str) -> Result<String, FetchError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Fetches documents over HTTP(S), resolved against a page URL.
pub struct HttpSource {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// `base` is the page URL (or any URL in the site root directory).
    pub fn new(base: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(base).map_err(|e| FetchError::new(format!("Invalid URL: {}", e)))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("siddur-browser/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::new(format!("Client error: {}", e)))?;

        Ok(Self { base, client })
    }

    /// Resolve a site-relative path against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|e| FetchError::new(format!("Invalid path {:?}: {}", path, e)))
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;

        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::new(format!("Request failed for {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError {
                message: format!("{} returned {}", url, status),
                status: Some(status.as_u16()),
            });
        }

        response
            .text()
            .map_err(|e| FetchError::new(format!("Failed to read body of {}: {}", url, e)))
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Reads documents from a local site directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for DirSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full)
            .map_err(|e| FetchError::new(format!("Failed to read {}: {}", full.display(), e)))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Pick a source for a site location: `http(s)://` URLs are fetched over
/// the network, anything else is a local directory.
pub fn open_site(location: &str) -> Result<Box<dyn DocumentSource>, FetchError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(DirSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_paths_resolve_against_page_directory() {
        let source = HttpSource::new("https://example.com/siddur/service.html?service=shacharit").unwrap();
        assert_eq!(
            source.resolve("data/highlights.json").unwrap().as_str(),
            "https://example.com/siddur/data/highlights.json"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpSource::new("not a url").err().unwrap();
        assert!(err.message.starts_with("Invalid URL"));
        assert_eq!(err.status, None);
    }

    #[test]
    fn dir_source_reads_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/highlights.json"), "{}").unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.fetch("data/highlights.json").unwrap(), "{}");
        assert!(source.fetch("data/missing.json").is_err());
    }

    #[test]
    fn status_is_reported_in_display() {
        let err = FetchError {
            message: "gone".into(),
            status: Some(404),
        };
        assert_eq!(err.to_string(), "HTTP 404: gone");
    }

    #[test]
    fn open_site_picks_local_directory() {
        let source = open_site("./site").unwrap();
        assert_eq!(source.describe(), "./site");
    }
}
