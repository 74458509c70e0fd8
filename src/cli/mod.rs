//! Command-line interface for reckon

pub mod commands;
pub mod mode;
pub mod output;

pub use commands::Cli;
pub use output::Output;
