// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! URL validation helpers.
//!
//! `validate_return_url` is the open-redirect guard for post-auth
//! redirects: only same-origin relative paths survive.

/// Maximum accepted length for a return URL.
const MAX_RETURN_URL_LENGTH: usize = 2048;

/// Checks whether a string is a well-formed `http`/`https` URL.
///
/// Only the two web schemes are accepted; the host part must be
/// non-empty and free of whitespace.
///
/// # Arguments
///
/// * `url` - The URL to check
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    let rest: &str = if let Some(stripped) = url.strip_prefix("https://") {
        stripped
    } else if let Some(stripped) = url.strip_prefix("http://") {
        stripped
    } else {
        return false;
    };

    let host: &str = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !host.chars().any(char::is_whitespace)
}

/// Validates a post-auth redirect target.
///
/// Accepts only same-origin relative paths: the input (after trimming)
/// must start with `/`, stay within 2048 characters, and must not
/// contain `//`, backslashes, encoded null bytes, newlines, or a scheme
/// prefix. Returns the trimmed path, or `None` when the input is unsafe.
///
/// # Arguments
///
/// * `url` - The candidate redirect target
#[must_use]
pub fn validate_return_url(url: &str) -> Option<String> {
    let trimmed: &str = url.trim();

    if trimmed.is_empty() || trimmed.chars().count() > MAX_RETURN_URL_LENGTH {
        return None;
    }

    if trimmed.contains('\\') || trimmed.contains('\n') || trimmed.contains('\r') {
        return None;
    }

    if trimmed.to_ascii_lowercase().contains("%00") {
        return None;
    }

    // Anything not starting with '/' is an absolute URL or a scheme
    // (javascript:, data:, ...), all of which are rejected.
    if !trimmed.starts_with('/') {
        return None;
    }

    // '//' anywhere covers protocol-relative URLs and path smuggling.
    if trimmed.contains("//") {
        return None;
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url_accepts_web_schemes() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1"));
    }

    #[test]
    fn test_is_valid_url_rejects_other_schemes() {
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("ftp://x"));
        assert!(!is_valid_url("data:text/html,hi"));
    }

    #[test]
    fn test_is_valid_url_rejects_empty_host() {
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https:///path"));
    }

    #[test]
    fn test_return_url_accepts_relative_paths() {
        assert_eq!(validate_return_url("/a/b").unwrap(), "/a/b");
        assert_eq!(validate_return_url("/").unwrap(), "/");
        assert_eq!(
            validate_return_url("/page?foo=bar#section").unwrap(),
            "/page?foo=bar#section"
        );
    }

    #[test]
    fn test_return_url_trims_whitespace() {
        assert_eq!(validate_return_url("  /dashboard  ").unwrap(), "/dashboard");
    }

    #[test]
    fn test_return_url_rejects_empty() {
        assert_eq!(validate_return_url(""), None);
        assert_eq!(validate_return_url("   "), None);
    }

    #[test]
    fn test_return_url_rejects_absolute_urls() {
        assert_eq!(validate_return_url("https://evil.com"), None);
        assert_eq!(validate_return_url("http://evil.com"), None);
    }

    #[test]
    fn test_return_url_rejects_protocol_relative() {
        assert_eq!(validate_return_url("//evil.com"), None);
        assert_eq!(validate_return_url("/path//to"), None);
    }

    #[test]
    fn test_return_url_rejects_backslashes() {
        assert_eq!(validate_return_url("/path\\evil"), None);
        assert_eq!(validate_return_url("\\\\evil.com"), None);
    }

    #[test]
    fn test_return_url_rejects_schemes() {
        assert_eq!(validate_return_url("javascript:alert(1)"), None);
        assert_eq!(validate_return_url("data:text/html,<h1>x</h1>"), None);
        assert_eq!(validate_return_url("vbscript:MsgBox"), None);
        assert_eq!(validate_return_url("file:///etc/passwd"), None);
    }

    #[test]
    fn test_return_url_rejects_special_characters() {
        assert_eq!(validate_return_url("/path%00evil"), None);
        assert_eq!(validate_return_url("/path\nevil"), None);
        assert_eq!(validate_return_url("/path\revil"), None);
    }

    #[test]
    fn test_return_url_length_limit() {
        let at_limit: String = format!("/{}", "a".repeat(2047));
        assert_eq!(validate_return_url(&at_limit).unwrap(), at_limit);

        let over_limit: String = format!("/{}", "a".repeat(2048));
        assert_eq!(validate_return_url(&over_limit), None);
    }
}
