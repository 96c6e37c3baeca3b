//! Stored file path to display URL conversion

/// Turns backend-stored file paths into URLs under the API base.
///
/// Paths may use either separator convention; every `\` becomes `/`. Inputs
/// that are already absolute `http(s)` URLs are returned with only the
/// separators fixed, so normalizing twice gives the same result.
///
/// ```
/// use core_content::PathNormalizer;
///
/// let paths = PathNormalizer::new("http://localhost:5000");
/// assert_eq!(
///     paths.normalize("uploads\\img\\a.png"),
///     "http://localhost:5000/uploads/img/a.png"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    base_url: String,
}

impl PathNormalizer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn normalize(&self, stored_path: &str) -> String {
        let path = stored_path.replace('\\', "/");

        if is_absolute_url(&path) {
            return path;
        }

        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn is_absolute_url(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
