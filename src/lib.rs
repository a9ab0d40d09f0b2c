//! logfilter library
//!
//! Configuration discovery and resolution, level parsing and the awk/date
//! plumbing used by the `logfilter` binary.

pub mod cli;
pub mod config;
pub mod disambiguate;
pub mod error;
pub mod filter;
pub mod level;
pub mod logging;
pub mod paths;
