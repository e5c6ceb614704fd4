//! Movie NFO decoding and library scanning.

pub mod error;
pub mod nfo;
pub mod scanner;

pub use error::NfoError;
pub use nfo::{MovieNfo, parse_nfo, parse_nfo_file};
pub use scanner::{ScanOptions, ScanReport, ScanWarning, scan_library};
