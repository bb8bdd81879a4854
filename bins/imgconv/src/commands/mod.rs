//! CLI command implementations

pub mod batch;
pub mod convert;
pub mod detect;
pub mod formats;

pub use batch::BatchFailed;
