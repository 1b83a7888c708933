use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Why a backlink page could not be fetched.
///
/// The `Display` text of each variant is the status string shown in reports.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("Page not accessible ({0})")]
    NotAccessible(u16),

    #[error("Timeout – site too slow")]
    Timeout,

    #[error("Connection blocked/refused")]
    ConnectionRefused,

    #[error("Unable to fetch page")]
    Unreachable,
}

impl FetchFailure {
    /// Map a transport error onto a failure category. Timeouts win over
    /// connect errors because a connect timeout reports both.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchFailure::Timeout
        } else if err.is_connect() {
            FetchFailure::ConnectionRefused
        } else {
            FetchFailure::Unreachable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            FetchFailure::NotAccessible(403).to_string(),
            "Page not accessible (403)"
        );
        assert_eq!(FetchFailure::Timeout.to_string(), "Timeout – site too slow");
        assert_eq!(
            FetchFailure::ConnectionRefused.to_string(),
            "Connection blocked/refused"
        );
        assert_eq!(FetchFailure::Unreachable.to_string(), "Unable to fetch page");
    }
}
