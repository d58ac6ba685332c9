//! CLI library components for the VOO record cleaner.

pub mod logging;
pub mod pipeline;
