//! CLI library components for the angiography analyzer.

pub mod commands;
pub mod logging;
pub mod types;
