use anchorcheck_core::Report;
use anchorcheck_core::check::{CheckOptions, execute_check};
use anchorcheck_core::input::collect_pages;
use anchorcheck_core::report::{
    DEFAULT_XLSX_FILENAME, ReportFormat, generate_csv_report, generate_json_report,
    generate_text_report, write_report,
};
use anchorcheck_scanner::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (default: warnings and up).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Gather backlink pages from the command line, a pages file and a spreadsheet
pub fn load_pages(
    urls: &[String],
    pages_file: Option<&PathBuf>,
    spreadsheet: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    collect_pages(
        urls,
        pages_file.map(PathBuf::as_path),
        spreadsheet.map(PathBuf::as_path),
    )
    .map_err(|e| e.to_string())
}

/// Where the report should be written. `None` means the screen.
pub fn resolve_output_path(output: Option<&String>, format: ReportFormat) -> Option<PathBuf> {
    match output {
        Some(raw) => Some(PathBuf::from(shellexpand::tilde(raw).into_owned())),
        None if format == ReportFormat::Xlsx => Some(PathBuf::from(DEFAULT_XLSX_FILENAME)),
        None => None,
    }
}

/// Render a report for the terminal
pub fn render_report(report: &Report, format: ReportFormat) -> Result<String, String> {
    if report.is_empty() {
        return Ok("No results to export\n".to_string());
    }

    match format {
        ReportFormat::Text => Ok(generate_text_report(report)),
        ReportFormat::Json => generate_json_report(report)
            .map(|json| format!("{}\n", json))
            .map_err(|e| format!("Failed to render JSON report: {}", e)),
        ReportFormat::Csv => {
            generate_csv_report(report).map_err(|e| format!("Failed to render CSV report: {}", e))
        }
        ReportFormat::Xlsx => Err("Spreadsheet reports must be written to a file".to_string()),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message);
    std::process::exit(1);
}

pub async fn handle_check(sub_matches: &ArgMatches, quiet: bool) {
    let target = sub_matches
        .get_one::<String>("target")
        .cloned()
        .unwrap_or_default();
    let urls: Vec<String> = sub_matches
        .get_many::<String>("url")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let pages_file = sub_matches.get_one::<PathBuf>("pages-file");
    let spreadsheet = sub_matches.get_one::<PathBuf>("spreadsheet");
    let timeout_secs = *sub_matches
        .get_one::<u64>("timeout")
        .unwrap_or(&DEFAULT_TIMEOUT_SECS);
    let concurrency = *sub_matches.get_one::<usize>("concurrency").unwrap_or(&1);
    let user_agent = sub_matches
        .get_one::<String>("user-agent")
        .cloned()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let no_progress = sub_matches.get_flag("no-progress");

    let pages = match load_pages(&urls, pages_file, spreadsheet) {
        Ok(pages) => pages,
        Err(e) => fail(e),
    };

    if !quiet {
        eprintln!("{} Checking {} backlink page(s)", "→".blue(), pages.len());
        eprintln!("Target:      {}", target.bright_white());
        eprintln!("Timeout:     {}s", timeout_secs);
        eprintln!("Concurrency: {}\n", concurrency.max(1));
    }

    debug!(
        "format={:?} user_agent={:?} progress={}",
        format, user_agent, !no_progress
    );

    let options = CheckOptions {
        pages,
        expected_target: target,
        timeout_secs,
        user_agent,
        concurrency,
        show_progress_bar: !quiet && !no_progress,
    };

    let report = match execute_check(options, None).await {
        Ok(report) => report,
        Err(e) => fail(format!("Check failed: {}", e)),
    };

    match resolve_output_path(sub_matches.get_one::<String>("output"), format) {
        Some(path) => {
            if report.is_empty() {
                println!("No results to export");
                return;
            }
            if let Err(e) = write_report(&report, format, &path) {
                fail(format!("Failed to save report to {}: {}", path.display(), e));
            }
            if !quiet {
                eprintln!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => match render_report(&report, format) {
            Ok(rendered) => print!("{}", rendered),
            Err(e) => fail(e),
        },
    }

    if !quiet {
        eprintln!(
            "\n{} {} link(s) found on {}/{} page(s), {} unreachable",
            "✓".green().bold(),
            report.total_links_found().to_string().cyan(),
            report.pages_with_links(),
            report.pages.len(),
            report.failed_pages()
        );
    }
}
