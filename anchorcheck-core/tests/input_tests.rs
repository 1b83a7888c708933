// Tests for loading backlink pages

use anchorcheck_core::input::{
    InputError, collect_pages, is_spreadsheet, load_pages_from_file, load_pages_from_spreadsheet,
    pages_from_text,
};
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

fn write_sheet(path: &Path, rows: &[&[Option<&str>]], numbers: &[(u32, u16, f64)]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if let Some(text) = cell {
                worksheet.write_string(r as u32, c as u16, *text).unwrap();
            }
        }
    }
    for (r, c, n) in numbers {
        worksheet.write_number(*r, *c, *n).unwrap();
    }
    workbook.save(path).unwrap();
}

// ============================================================================
// Text Source Tests
// ============================================================================

#[test]
fn test_pages_from_text() {
    let pages = pages_from_text("https://a.com/post\n\n   \nb.com/page  \nnull\n");
    assert_eq!(pages, vec!["https://a.com/post", "http://b.com/page", ""]);
}

#[test]
fn test_load_pages_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "https://example.com/a")?;
    writeln!(temp_file)?;
    writeln!(temp_file, "example.org/b")?;

    let pages = load_pages_from_file(temp_file.path())?;
    assert_eq!(pages, vec!["https://example.com/a", "http://example.org/b"]);
    Ok(())
}

#[test]
fn test_load_pages_from_missing_file() {
    let result = load_pages_from_file(Path::new("/definitely/not/here.txt"));
    assert!(matches!(result, Err(InputError::Io { .. })));
}

// ============================================================================
// Spreadsheet Source Tests
// ============================================================================

#[test]
fn test_is_spreadsheet() {
    assert!(is_spreadsheet(Path::new("links.xlsx")));
    assert!(is_spreadsheet(Path::new("LINKS.XLS")));
    assert!(!is_spreadsheet(Path::new("links.csv")));
    assert!(!is_spreadsheet(Path::new("links")));
}

#[test]
fn test_spreadsheet_skips_header_blank_and_numeric_cells() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.xlsx");
    write_sheet(
        &path,
        &[
            &[Some("Backlinks")],
            &[Some("https://a.com/post")],
            &[None],
            &[Some("12345")],
            &[Some("nan")],
            &[Some("NULL")],
            &[Some("None")],
            &[Some("  b.com/article ")],
            &[None],
        ],
        &[(8, 0, 42.0)],
    );

    let pages = load_pages_from_spreadsheet(&path).unwrap();
    assert_eq!(pages, vec!["https://a.com/post", "http://b.com/article"]);
}

#[test]
fn test_spreadsheet_placeholder_column_is_not_meaningful() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.xlsx");
    write_sheet(
        &path,
        &[
            &[Some("Old"), Some("URL")],
            &[Some("null"), Some("https://a.com/")],
            &[Some("None"), Some("https://b.com/")],
        ],
        &[],
    );

    let pages = load_pages_from_spreadsheet(&path).unwrap();
    assert_eq!(pages, vec!["https://a.com/", "https://b.com/"]);
}

#[test]
fn test_spreadsheet_uses_first_meaningful_column() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.xlsx");
    write_sheet(
        &path,
        &[
            &[Some("Notes"), Some("URL"), Some("Owner")],
            &[None, Some("https://a.com/"), Some("alice")],
            &[None, Some("https://b.com/"), Some("bob")],
        ],
        &[],
    );

    let pages = load_pages_from_spreadsheet(&path).unwrap();
    assert_eq!(pages, vec!["https://a.com/", "https://b.com/"]);
}

#[test]
fn test_spreadsheet_wrong_extension() {
    let result = load_pages_from_spreadsheet(Path::new("links.csv"));
    assert!(matches!(result, Err(InputError::UnsupportedFormat(_))));
}

#[test]
fn test_spreadsheet_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.xlsx");
    std::fs::write(&path, b"this is not a workbook").unwrap();

    let result = load_pages_from_spreadsheet(&path);
    assert!(matches!(result, Err(InputError::Spreadsheet { .. })));
}

// ============================================================================
// Combined Source Tests
// ============================================================================

#[test]
fn test_collect_pages_text_before_spreadsheet() {
    let temp_dir = TempDir::new().unwrap();
    let sheet = temp_dir.path().join("links.xlsx");
    write_sheet(&sheet, &[&[Some("URL")], &[Some("sheet.com/1")]], &[]);

    let text = temp_dir.path().join("links.txt");
    std::fs::write(&text, "file.com/1\n").unwrap();

    let urls = vec!["cli.com/1".to_string(), "   ".to_string()];
    let pages = collect_pages(&urls, Some(&text), Some(&sheet)).unwrap();

    assert_eq!(
        pages,
        vec!["http://cli.com/1", "http://file.com/1", "http://sheet.com/1"]
    );
}

#[test]
fn test_collect_pages_skips_unreadable_spreadsheet() {
    let temp_dir = TempDir::new().unwrap();
    let sheet = temp_dir.path().join("broken.xlsx");
    std::fs::write(&sheet, b"garbage").unwrap();

    let urls = vec!["https://a.com/".to_string()];
    let pages = collect_pages(&urls, None, Some(&sheet)).unwrap();

    assert_eq!(pages, vec!["https://a.com/"]);
}

#[test]
fn test_collect_pages_nothing_to_check() {
    let result = collect_pages(&[], None, None);
    assert!(matches!(result, Err(InputError::NoPages)));
}
