use crate::CLAP_STYLING;
use anchorcheck_scanner::DEFAULT_USER_AGENT;
use clap::{ArgGroup, arg, command};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("anchorcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("anchorcheck")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("check")
                .about(
                    "Check that each backlink page links to the expected target domain and \
                report anchor text and noindex status.",
                )
                .arg(
                    arg!(-t --"target" <URL>)
                        .required(true)
                        .help("The expected target URL (only its domain is compared)"),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("A backlink page to check (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-p --"pages-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of backlink pages")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-s --"spreadsheet" <PATH>)
                        .required(false)
                        .help("Path to an .xlsx/.xls file whose first column lists backlink pages")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .group(
                    ArgGroup::new("sources")
                        .args(["url", "pages-file", "spreadsheet"])
                        .required(true)
                        .multiple(true),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-c --"concurrency" <NUM>)
                        .required(false)
                        .help("How many pages to check at once (1 = one after another)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1"),
                )
                .arg(
                    arg!(--"user-agent" <AGENT>)
                        .required(false)
                        .help("User-Agent header sent with every request")
                        .default_value(DEFAULT_USER_AGENT),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, xlsx")
                        .value_parser(["text", "json", "csv", "xlsx"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (xlsx defaults to backlink_report.xlsx)"),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Hide the progress bar")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
