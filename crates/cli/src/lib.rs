//! Terminal helpers for the imgconv command-line tool
//!
//! Provides shared CLI functionality:
//! - Status lines for conversion results and failures
//! - Progress bars for batch runs
//! - Size, duration and count formatting

#![warn(missing_docs)]

pub mod output;
pub mod progress;
