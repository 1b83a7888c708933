//! URL normalization and domain comparison.

use url::Url;

const BLANK_MARKERS: [&str; 3] = ["nan", "none", "null"];

/// Normalize a raw page or target string into an absolute URL.
///
/// Blank input and spreadsheet placeholders (`nan`, `none`, `null`) map to the
/// empty string. Anything else without an `http://` or `https://` prefix gets
/// `http://` prepended. No other validation happens here.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_lowercase();
    if BLANK_MARKERS.contains(&lower.as_str()) {
        return String::new();
    }

    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Extract the comparable domain of a URL: lower-case host (with an explicit
/// port, if any) minus a leading `www.`. Returns an empty string when no host
/// can be found.
pub fn extract_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // Bare hosts like "example.com" have no scheme and parse as relative.
    // "example.com:8080" parses with "example.com" as its scheme.
    let parsed = match Url::parse(trimmed) {
        Ok(url) if url.host_str().is_none() && url.scheme().contains('.') => {
            Url::parse(&format!("http://{}", trimmed))
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{}", trimmed)),
        other => other,
    };
    match parsed {
        Ok(url) => domain_of(&url),
        Err(_) => String::new(),
    }
}

fn domain_of(url: &Url) -> String {
    let Some(host) = url.host_str() else {
        return String::new();
    };

    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// Two URLs are the same site when their domains are equal. An empty domain
/// never matches anything.
pub fn is_same_domain(url: &str, expected_domain: &str) -> bool {
    !expected_domain.is_empty() && extract_domain(url) == expected_domain
}
