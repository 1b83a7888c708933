pub mod check;
pub mod input;
pub mod model;
pub mod report;

use colored::Colorize;

pub use check::{CheckOptions, CheckProgressCallback, execute_check, run_batch};
pub use model::Report;
pub use report::{ReportError, ReportFormat, TabularRow, to_tabular_rows};

const BANNER: &str = r#"
  __ _ _ __   ___| |__   ___  _ __ ___| |__   ___  ___| | __
 / _` | '_ \ / __| '_ \ / _ \| '__/ __| '_ \ / _ \/ __| |/ /
| (_| | | | | (__| | | | (_) | | | (__| | | |  __/ (__|   <
 \__,_|_| |_|\___|_| |_|\___/|_|  \___|_| |_|\___|\___|_|\_\
"#;

/// Print the startup banner to stderr so piped report output stays clean.
pub fn print_banner() {
    eprintln!("{}", BANNER.bright_cyan().bold());
    eprintln!(
        "  {} {}\n",
        "backlink verification".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
