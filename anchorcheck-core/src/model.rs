use anchorcheck_scanner::PageResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one batch run. Returned by value from the aggregator and handed
/// to whichever exporter needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub run_id: Uuid,
    pub expected_target: String,
    pub expected_domain: String,
    pub started_at: i64,
    pub finished_at: i64,
    pub pages: Vec<PageResult>,
}

impl Report {
    pub fn new(expected_target: String, expected_domain: String, started_at: i64) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            expected_target,
            expected_domain,
            started_at,
            finished_at: started_at,
            pages: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn total_links_found(&self) -> usize {
        self.pages.iter().map(|p| p.found).sum()
    }

    pub fn pages_with_links(&self) -> usize {
        self.pages.iter().filter(|p| p.found > 0).count()
    }

    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.fetch_failed()).count()
    }

    pub fn noindex_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.links.iter().any(|l| l.noindex))
            .count()
    }
}
