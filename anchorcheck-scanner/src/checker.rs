use crate::domain::is_same_domain;
use crate::error::{FetchFailure, Result};
use crate::result::{AnchorMatch, PageResult};
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// What a scan of one fetched page produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    pub noindex: bool,
    pub matches: Vec<AnchorMatch>,
}

/// Fetches backlink pages and looks for anchors pointing at an expected domain.
#[derive(Clone)]
pub struct Checker {
    client: Client,
    timeout_secs: u64,
}

impl Checker {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Self::with_options(timeout_secs, DEFAULT_USER_AGENT)
    }

    pub fn with_options(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Fetch `page` and scan it for links to `expected_domain`.
    ///
    /// Never fails: transport problems become a single failure entry in the
    /// returned result.
    pub async fn check_page(&self, page: &str, expected_domain: &str) -> PageResult {
        match self.fetch_page(page).await {
            Ok(body) => {
                let scan = Self::scan_anchors(&body, page, expected_domain);
                info!(
                    "{}: {} link(s) to {} (noindex: {})",
                    page,
                    scan.matches.len(),
                    expected_domain,
                    scan.noindex
                );
                PageResult::new(
                    page.to_string(),
                    expected_domain.to_string(),
                    scan.matches,
                    scan.noindex,
                )
            }
            Err(failure) => {
                info!("{}: {}", page, failure);
                PageResult::with_failure(page.to_string(), expected_domain.to_string(), failure)
            }
        }
    }

    /// GET a page. Anything but a 200 response is a failure.
    pub async fn fetch_page(&self, url: &str) -> std::result::Result<String, FetchFailure> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url).send().await.map_err(|e| {
            debug!("Request to {} failed: {}", url, e);
            FetchFailure::from_transport(&e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchFailure::NotAccessible(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            debug!("Reading body of {} failed: {}", url, e);
            FetchFailure::from_transport(&e)
        })?;

        debug!(
            "Fetched {} ({} bytes) in {:?}",
            url,
            body.len(),
            start.elapsed()
        );
        Ok(body)
    }

    /// Collect every `<a href>` on the page whose resolved URL belongs to
    /// `expected_domain`, in document order.
    pub fn scan_anchors(html: &str, page_url: &str, expected_domain: &str) -> PageScan {
        let document = Html::parse_document(html);
        let noindex = Self::detect_noindex(&document);

        let mut matches = Vec::new();
        if expected_domain.is_empty() {
            return PageScan { noindex, matches };
        }

        let Some(link_selector) = selector("a[href]") else {
            return PageScan { noindex, matches };
        };
        let base = Url::parse(page_url).ok();

        for element in document.select(&link_selector) {
            if let Some(href) = element.value().attr("href")
                && let Some(resolved) = Self::resolve_link(base.as_ref(), href)
                && is_same_domain(&resolved, expected_domain)
            {
                let text: String = element.text().collect();
                debug!("  -> match: {} ({:?})", resolved, text.trim());
                matches.push(AnchorMatch::found(resolved, &text, noindex));
            }
        }

        PageScan { noindex, matches }
    }

    /// `<meta name="robots">` whose content mentions noindex. Only the first
    /// robots element is consulted.
    fn detect_noindex(document: &Html) -> bool {
        let Some(robots_selector) = selector("meta[name=\"robots\"]") else {
            return false;
        };

        document
            .select(&robots_selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(|content| content.to_lowercase().contains("noindex"))
            .unwrap_or(false)
    }

    /// Absolute link text for `href` as written on the page. Absolute hrefs
    /// and root-relative paths keep their original spelling; other relative
    /// forms go through `Url::join`.
    fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
        let href = href.trim();
        if Url::parse(href).is_ok() {
            return Some(href.to_string());
        }

        let base = base?;
        if href.starts_with('/') && !href.starts_with("//") {
            return Some(format!("{}{}", base.origin().ascii_serialization(), href));
        }
        base.join(href).ok().map(String::from)
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}
