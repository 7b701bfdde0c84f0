//! Path scanning domain: requests, results and validation errors.
//!
//! Two modes share one vocabulary:
//!
//! | Mode | Request | Result | Ordering |
//! |------|---------|--------|----------|
//! | glob | [`GlobRequest`] | [`GlobOutcome`] | newest first, ties by path |
//! | content | [`GrepRequest`] | [`GrepOutcome`] | path lexical, then line |
//!
//! Everything here is pure. Filesystem access lives behind
//! `PathScannerPort` in the application layer.

pub mod error;
pub mod matches;
pub mod request;

pub use error::ScanError;
pub use matches::{
    GlobMatch, GlobOutcome, GrepOutcome, LineMatch, RenderOptions, ScanStop, display_path,
    render_glob, render_grep,
};
pub use request::{DEFAULT_MAX_RESULTS, GlobRequest, GrepRequest};
