//! URL handling for image references
//!
//! Image references arrive either absolute or relative to the realm; the
//! rest of the download path always works on absolute URLs.

use url::Url;

use crate::error::{Error, Result};

/// Resolve an image reference against the realm host
///
/// Absolute references pass through unchanged; relative references are
/// joined onto the realm URL.
pub fn resolve_url(src: &str, realm: &str) -> Result<String> {
    match Url::parse(src) {
        Ok(url) => Ok(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(realm)
                .map_err(|e| Error::invalid_argument(format!("Invalid realm URL: {e}")))?;
            let joined = base
                .join(src)
                .map_err(|e| Error::invalid_argument(format!("Cannot resolve '{src}': {e}")))?;
            Ok(joined.into())
        }
        Err(e) => Err(Error::invalid_argument(format!(
            "Invalid image reference: {e}"
        ))),
    }
}

/// Append the account API key as a query parameter
///
/// Picks `?` or `&` depending on whether the URL already carries a query
/// string. Used for photo-library saves, where the platform fetches the
/// URL itself and cannot send an Authorization header.
pub fn append_api_key(url: &str, api_key: &str) -> String {
    let delimiter = if url.contains('?') { '&' } else { '?' };
    format!("{url}{delimiter}api_key={api_key}")
}

/// Derive a destination file name from the last path segment of a reference
pub fn file_name(src: &str) -> String {
    src.rsplit('/').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_reference_passes_through() {
        let resolved = resolve_url("http://x/y.png", "https://chat.example.com").unwrap();
        assert_eq!(resolved, "http://x/y.png");
    }

    #[test]
    fn test_relative_reference_joins_realm() {
        let resolved =
            resolve_url("/user_uploads/2/photo.jpg", "https://chat.example.com").unwrap();
        assert_eq!(resolved, "https://chat.example.com/user_uploads/2/photo.jpg");
    }

    #[test]
    fn test_relative_reference_with_bad_realm() {
        assert!(resolve_url("/photo.jpg", "not a url").is_err());
    }

    #[test]
    fn test_append_api_key_without_query() {
        assert_eq!(
            append_api_key("http://x/y.png", "K"),
            "http://x/y.png?api_key=K"
        );
    }

    #[test]
    fn test_append_api_key_with_query() {
        assert_eq!(
            append_api_key("http://x/y.png?size=full", "K"),
            "http://x/y.png?size=full&api_key=K"
        );
    }

    #[test]
    fn test_file_name_is_last_path_segment() {
        assert_eq!(file_name("http://host/path/photo.jpg"), "photo.jpg");
        assert_eq!(file_name("/user_uploads/2/photo.jpg"), "photo.jpg");
        assert_eq!(file_name("photo.jpg"), "photo.jpg");
    }

    #[test]
    fn test_file_name_of_trailing_slash_is_empty() {
        assert_eq!(file_name("http://host/path/"), "");
    }
}
