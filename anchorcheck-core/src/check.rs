use crate::model::Report;
use anchorcheck_scanner::error::Result;
use anchorcheck_scanner::{
    Checker, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, PageResult, extract_domain, normalize_url,
};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::info;

/// Options for configuring a batch check
pub struct CheckOptions {
    pub pages: Vec<String>,
    pub expected_target: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Pages checked at once. 1 keeps the run strictly sequential.
    pub concurrency: usize,
    pub show_progress_bar: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            expected_target: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 1,
            show_progress_bar: false,
        }
    }
}

/// Callback invoked with the input index of each page as its result arrives
pub type CheckProgressCallback = Arc<dyn Fn(usize, &PageResult) + Send + Sync>;

/// Check `pages` against `expected_target` with default options.
pub async fn run_batch(pages: &[String], expected_target: &str) -> Result<Report> {
    let options = CheckOptions {
        pages: pages.to_vec(),
        expected_target: expected_target.to_string(),
        ..CheckOptions::default()
    };
    execute_check(options, None).await
}

/// Execute a batch check with the given options.
///
/// Every input page yields exactly one `PageResult`, in input order, whatever
/// happens while fetching it. The only error is failing to build the HTTP client.
pub async fn execute_check(
    options: CheckOptions,
    progress_callback: Option<CheckProgressCallback>,
) -> Result<Report> {
    let CheckOptions {
        pages,
        expected_target,
        timeout_secs,
        user_agent,
        concurrency,
        show_progress_bar,
    } = options;

    let expected_target = normalize_url(&expected_target);
    let expected_domain = extract_domain(&expected_target);
    let pages: Vec<String> = pages.iter().map(|page| normalize_url(page)).collect();

    let checker = Checker::with_options(timeout_secs, &user_agent)?;
    info!(
        "Checking {} page(s) for links to {} (concurrency {}, timeout {}s)",
        pages.len(),
        expected_domain,
        concurrency.max(1),
        checker.timeout_secs()
    );

    let mut report = Report::new(
        expected_target,
        expected_domain.clone(),
        Utc::now().timestamp(),
    );

    let progress_bar = if show_progress_bar {
        let pb = ProgressBar::new(pages.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_message("Starting check...");
        Some(pb)
    } else {
        None
    };

    // `buffered` yields in submission order, so input order survives concurrency.
    let results: Vec<PageResult> = stream::iter(pages.iter().enumerate())
        .map(|(idx, page)| {
            let checker = &checker;
            let expected_domain = expected_domain.as_str();
            async move { (idx, checker.check_page(page, expected_domain).await) }
        })
        .buffered(concurrency.max(1))
        .inspect(|(idx, result)| {
            if let Some(ref pb) = progress_bar {
                pb.set_message(result.page.clone());
                pb.inc(1);
            }
            if let Some(ref callback) = progress_callback {
                callback(*idx, result);
            }
        })
        .map(|(_, result)| result)
        .collect()
        .await;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Check complete! {} page(s) processed", results.len()));
    }

    report.pages = results;
    report.finished_at = Utc::now().timestamp();

    info!(
        "Run {} finished: {} link(s) on {}/{} page(s), {} unreachable",
        report.run_id,
        report.total_links_found(),
        report.pages_with_links(),
        report.pages.len(),
        report.failed_pages()
    );

    Ok(report)
}
