/// Backend route configuration.
///
/// All zxrag endpoints live under `{base}/v1`.  The base defaults to the
/// page's own origin (empty string) so the console works when served by the
/// backend itself; a different backend can be baked in at build time via
/// `API_BASE_URL` or set at runtime through `init_api_config_js()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        match option_env!("API_BASE_URL") {
            Some(url) => Self::from_url(url),
            None => Self {
                base_url: String::new(),
            },
        }
    }
}

impl ApiConfig {
    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL for all API calls; empty means same origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a `/v1` path, e.g. `url("/files")`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/v1{}", self.base_url, path)
        } else {
            format!("{}/v1/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let cfg = ApiConfig::from_url("http://localhost:3000///");
        assert_eq!(cfg.base_url(), "http://localhost:3000");
        assert_eq!(cfg.url("/files"), "http://localhost:3000/v1/files");
    }

    #[test]
    fn empty_base_yields_relative_urls() {
        let cfg = ApiConfig::from_url("");
        assert_eq!(cfg.url("/knowledgebases/3/files"), "/v1/knowledgebases/3/files");
        assert_eq!(cfg.url("ocr"), "/v1/ocr");
    }
}
