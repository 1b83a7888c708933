// Report rendering and export

use crate::model::Report;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_XLSX_FILENAME: &str = "backlink_report.xlsx";

pub const COLUMNS: [&str; 7] = [
    "Backlink Page",
    "Expected Domain",
    "Total Found",
    "Status",
    "Found URL",
    "Anchor Text",
    "Noindex",
];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No results to export")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Xlsx,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "xlsx" | "excel" => Some(ReportFormat::Xlsx),
            _ => None,
        }
    }
}

/// One spreadsheet row: a single anchor (or synthetic entry) with its page's
/// details repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    #[serde(rename = "Backlink Page")]
    pub page: String,
    #[serde(rename = "Expected Domain")]
    pub expected_domain: String,
    #[serde(rename = "Total Found")]
    pub total_found: usize,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Found URL")]
    pub found_url: String,
    #[serde(rename = "Anchor Text")]
    pub anchor_text: String,
    #[serde(rename = "Noindex")]
    pub noindex: String,
}

pub fn to_tabular_rows(report: &Report) -> Vec<TabularRow> {
    report
        .pages
        .iter()
        .flat_map(|page| {
            page.links.iter().map(move |link| TabularRow {
                page: page.page.clone(),
                expected_domain: page.expected_domain.clone(),
                total_found: page.count(),
                status: link.result.clone(),
                found_url: link.url.clone(),
                anchor_text: link.anchor.clone(),
                noindex: link.noindex_label().to_string(),
            })
        })
        .collect()
}

pub fn generate_text_report(report: &Report) -> String {
    let divider = format!("{}\n", "━".repeat(78));
    let mut out = String::new();

    out.push_str(&divider);
    out.push_str("                           BACKLINK CHECK REPORT\n");
    out.push_str(&divider);
    out.push('\n');

    if report.is_empty() {
        out.push_str("No results to export\n");
        return out;
    }

    out.push_str(&format!("Run ID:          {}\n", report.run_id));
    out.push_str(&format!("Checked At:      {}\n", format_timestamp(report.started_at)));
    out.push_str(&format!("Duration:        {} seconds\n", report.finished_at - report.started_at));
    out.push_str(&format!("Expected Target: {}\n", report.expected_target));
    out.push_str(&format!("Expected Domain: {}\n", report.expected_domain));
    out.push('\n');

    out.push_str(&divider);
    out.push_str("SUMMARY\n");
    out.push_str(&divider);
    out.push('\n');
    out.push_str(&format!("  Pages checked:      {}\n", report.pages.len()));
    out.push_str(&format!("  Pages with links:   {}\n", report.pages_with_links()));
    out.push_str(&format!("  Total links found:  {}\n", report.total_links_found()));
    out.push_str(&format!("  Unreachable pages:  {}\n", report.failed_pages()));
    out.push_str(&format!("  Noindex pages:      {}\n", report.noindex_pages()));
    out.push('\n');

    out.push_str(&divider);
    out.push_str("PAGES\n");
    out.push_str(&divider);
    out.push('\n');

    for (idx, page) in report.pages.iter().enumerate() {
        let page_label = if page.page.is_empty() { "(blank)" } else { page.page.as_str() };
        out.push_str(&format!("[{}] {}\n", idx + 1, page_label));
        out.push_str(&format!("    Total Found: {}\n", page.count()));

        for link in &page.links {
            let marker = match link.outcome {
                anchorcheck_scanner::Outcome::LinkFound => "✓",
                anchorcheck_scanner::Outcome::LinkNotFound => "✗",
                anchorcheck_scanner::Outcome::FetchFailed => "⚠",
            };
            out.push_str(&format!("    {} {}\n", marker, link.result));
            out.push_str(&format!("        URL:     {}\n", dash_if_empty(&link.url)));
            out.push_str(&format!("        Anchor:  {}\n", dash_if_empty(&link.anchor)));
            out.push_str(&format!("        Noindex: {}\n", link.noindex_label()));
        }
        out.push('\n');
    }

    out.push_str(&divider);
    out.push_str("\nGenerated by anchorcheck\n\n");

    out
}

pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "anchorcheck",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "run": {
                "id": report.run_id,
                "started_at": format_iso8601_timestamp(report.started_at),
                "finished_at": format_iso8601_timestamp(report.finished_at),
                "duration_seconds": report.finished_at - report.started_at,
                "expected_target": report.expected_target,
                "expected_domain": report.expected_domain
            },
            "summary": {
                "pages_checked": report.pages.len(),
                "pages_with_links": report.pages_with_links(),
                "total_links_found": report.total_links_found(),
                "unreachable_pages": report.failed_pages(),
                "noindex_pages": report.noindex_pages()
            },
            "pages": report.pages,
            "rows": to_tabular_rows(report)
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(report: &Report) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in to_tabular_rows(report) {
        writer.serialize(&row)?;
    }
    writer.flush()?;

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Build the spreadsheet export in memory.
pub fn generate_xlsx_report(report: &Report) -> Result<Vec<u8>, ReportError> {
    let mut workbook = build_workbook(report)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the spreadsheet export to `path`. An empty report produces no file.
pub fn write_xlsx_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let mut workbook = build_workbook(report)?;
    workbook.save(path)?;
    Ok(())
}

/// Render `report` in `format` and write it to `path`.
pub fn write_report(report: &Report, format: ReportFormat, path: &Path) -> Result<(), ReportError> {
    if report.is_empty() {
        return Err(ReportError::Empty);
    }

    match format {
        ReportFormat::Text => save_report(&generate_text_report(report), path)?,
        ReportFormat::Json => save_report(&generate_json_report(report)?, path)?,
        ReportFormat::Csv => save_report(&generate_csv_report(report)?, path)?,
        ReportFormat::Xlsx => write_xlsx_report(report, path)?,
    }

    Ok(())
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn build_workbook(report: &Report) -> Result<Workbook, ReportError> {
    if report.is_empty() {
        return Err(ReportError::Empty);
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (idx, row) in to_tabular_rows(report).iter().enumerate() {
        let r = idx as u32 + 1;
        worksheet.write_string(r, 0, &row.page)?;
        worksheet.write_string(r, 1, &row.expected_domain)?;
        worksheet.write_number(r, 2, row.total_found as f64)?;
        worksheet.write_string(r, 3, &row.status)?;
        worksheet.write_string(r, 4, &row.found_url)?;
        worksheet.write_string(r, 5, &row.anchor_text)?;
        worksheet.write_string(r, 6, &row.noindex)?;
    }
    worksheet.autofit();

    Ok(workbook)
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn format_timestamp(timestamp: i64) -> String {
    use chrono::{DateTime, Utc};
    let datetime = DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now);
    datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn format_iso8601_timestamp(timestamp: i64) -> String {
    use chrono::{DateTime, Utc};
    let datetime = DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now);
    datetime.to_rfc3339()
}
