use crate::error::FetchFailure;
use serde::{Deserialize, Serialize};

pub const LINK_FOUND: &str = "Link Found";
pub const LINK_NOT_FOUND: &str = "Link not found";
pub const NO_ANCHOR_TEXT: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    LinkFound,
    LinkNotFound,
    FetchFailed,
}

/// One entry of a page result: either a real matching anchor or the
/// synthetic "not found" / failure row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorMatch {
    pub outcome: Outcome,
    pub result: String,
    pub url: String,
    pub anchor: String,
    pub noindex: bool,
}

impl AnchorMatch {
    pub fn found(url: String, anchor: &str, noindex: bool) -> Self {
        let anchor = anchor.trim();
        Self {
            outcome: Outcome::LinkFound,
            result: LINK_FOUND.to_string(),
            url,
            anchor: if anchor.is_empty() {
                NO_ANCHOR_TEXT.to_string()
            } else {
                anchor.to_string()
            },
            noindex,
        }
    }

    pub fn not_found(noindex: bool) -> Self {
        Self {
            outcome: Outcome::LinkNotFound,
            result: LINK_NOT_FOUND.to_string(),
            url: String::new(),
            anchor: String::new(),
            noindex,
        }
    }

    pub fn failed(failure: FetchFailure) -> Self {
        Self {
            outcome: Outcome::FetchFailed,
            result: failure.to_string(),
            url: String::new(),
            anchor: String::new(),
            noindex: false,
        }
    }

    pub fn noindex_label(&self) -> &'static str {
        if self.noindex { "Yes" } else { "No" }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub page: String,
    pub expected_domain: String,
    /// Number of real matches; zero for "not found" and failed pages.
    pub found: usize,
    pub links: Vec<AnchorMatch>,
}

impl PageResult {
    pub fn new(
        page: String,
        expected_domain: String,
        matches: Vec<AnchorMatch>,
        noindex: bool,
    ) -> Self {
        let found = matches.len();
        let links = if matches.is_empty() {
            vec![AnchorMatch::not_found(noindex)]
        } else {
            matches
        };

        Self {
            page,
            expected_domain,
            found,
            links,
        }
    }

    pub fn with_failure(page: String, expected_domain: String, failure: FetchFailure) -> Self {
        Self {
            page,
            expected_domain,
            found: 0,
            links: vec![AnchorMatch::failed(failure)],
        }
    }

    /// Count shown in reports. Floored at 1 so every page renders one row.
    pub fn count(&self) -> usize {
        self.found.max(1)
    }

    pub fn fetch_failed(&self) -> bool {
        self.links
            .iter()
            .any(|link| link.outcome == Outcome::FetchFailed)
    }
}
