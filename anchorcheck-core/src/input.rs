//! Collecting backlink pages from free text, text files and spreadsheets.

use anchorcheck_scanner::normalize_url;
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read pages file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read spreadsheet {}: {message}", .path.display())]
    Spreadsheet { path: PathBuf, message: String },

    #[error("Unsupported spreadsheet {} (expected .xlsx or .xls)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("No backlink pages to check")]
    NoPages,
}

/// One normalized page per non-blank line.
///
/// Lines that normalize to the blank sentinel are kept so the run reports them.
pub fn pages_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalize_url)
        .collect()
}

pub fn load_pages_from_file(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(pages_from_text(&content))
}

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "xlsx" | "xls"))
        .unwrap_or(false)
}

/// Read pages from the first worksheet of an `.xlsx`/`.xls` file.
///
/// The first row is a header. Pages come from the first column holding any
/// data; blank, `nan` and numeric cells are skipped.
pub fn load_pages_from_spreadsheet(path: &Path) -> Result<Vec<String>, InputError> {
    if !is_spreadsheet(path) {
        return Err(InputError::UnsupportedFormat(path.to_path_buf()));
    }

    let spreadsheet_error = |message: String| InputError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_error("workbook has no worksheets".to_string()))?
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    let pages = pages_from_range(&range);
    debug!("Loaded {} page(s) from {}", pages.len(), path.display());
    Ok(pages)
}

pub fn pages_from_range(range: &Range<Data>) -> Vec<String> {
    let rows: Vec<&[Data]> = range.rows().skip(1).collect();

    let Some(column) = (0..range.width())
        .find(|&col| rows.iter().any(|row| row.get(col).and_then(cell_page).is_some()))
    else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| row.get(column).and_then(cell_page))
        .collect()
}

/// Normalized page named by a cell. Empty cells, numbers and missing-value
/// placeholders (`nan`, `none`, `null`) name no page.
fn cell_page(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) | Data::Int(_) | Data::Float(_) => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };

    if text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let page = normalize_url(&text);
    if page.is_empty() { None } else { Some(page) }
}

/// Gather pages from every source, text sources first.
///
/// A spreadsheet that cannot be read is logged and skipped; the other sources
/// still count.
pub fn collect_pages(
    urls: &[String],
    pages_file: Option<&Path>,
    spreadsheet: Option<&Path>,
) -> Result<Vec<String>, InputError> {
    let mut pages: Vec<String> = urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(normalize_url)
        .collect();

    if let Some(path) = pages_file {
        pages.extend(load_pages_from_file(path)?);
    }

    if let Some(path) = spreadsheet {
        match load_pages_from_spreadsheet(path) {
            Ok(sheet_pages) => pages.extend(sheet_pages),
            Err(e) => warn!("Skipping spreadsheet: {}", e),
        }
    }

    if pages.is_empty() {
        return Err(InputError::NoPages);
    }

    Ok(pages)
}
