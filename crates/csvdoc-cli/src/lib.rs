//! Library parts of the csvdoc command-line tool.

pub mod logging;
pub mod pipeline;
