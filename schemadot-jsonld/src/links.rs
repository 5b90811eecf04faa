//! File and link URL generation.

use url::Url;

/// Turns stored file URIs into public URLs.
///
/// Returned URLs may be site-relative; the resolver makes them absolute.
pub trait UrlGenerator: Send + Sync {
    /// Public URL of the original file.
    fn file_url(&self, uri: &str) -> String;

    /// Public URL of an image derivative, when the style can be applied.
    fn image_style_url(&self, uri: &str, style: &str) -> Option<String>;
}

/// Serves `public://` files from a public files directory.
#[derive(Debug, Clone)]
pub struct PublicFilesUrlGenerator {
    files_path: String,
}

impl PublicFilesUrlGenerator {
    pub fn new(files_path: &str) -> Self {
        Self {
            files_path: files_path.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for PublicFilesUrlGenerator {
    fn default() -> Self {
        Self::new("/sites/default/files")
    }
}

impl UrlGenerator for PublicFilesUrlGenerator {
    fn file_url(&self, uri: &str) -> String {
        match uri.strip_prefix("public://") {
            Some(path) => format!("{}/{}", self.files_path, path),
            None => uri.to_string(),
        }
    }

    fn image_style_url(&self, uri: &str, style: &str) -> Option<String> {
        let path = uri.strip_prefix("public://")?;
        Some(format!("{}/styles/{}/public/{}", self.files_path, style, path))
    }
}

/// Makes `uri` absolute against `base_url`.
///
/// Understands `internal:` and `entity:` link URIs. Absolute URLs (any
/// scheme) pass through; anything that cannot be joined is returned as is.
pub fn absolute_url(base_url: &str, uri: &str) -> String {
    let path = if let Some(path) = uri.strip_prefix("internal:") {
        path.to_string()
    } else if let Some(path) = uri.strip_prefix("entity:") {
        format!("/{}", path.trim_start_matches('/'))
    } else if Url::parse(uri).is_ok() {
        return uri.to_string();
    } else {
        uri.to_string()
    };

    match Url::parse(base_url).and_then(|base| base.join(&path)) {
        Ok(url) => url.to_string(),
        Err(_) => uri.to_string(),
    }
}
