pub mod checker;
pub mod domain;
pub mod error;
pub mod result;

pub use checker::{Checker, PageScan, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use domain::{extract_domain, is_same_domain, normalize_url};
pub use error::{FetchFailure, ScanError};
pub use result::{AnchorMatch, Outcome, PageResult};
