//! Reporting utilities: table previews, metric summaries and status lines.

pub mod format;
pub mod status;

pub use format::*;
pub use status::*;
