//! Configuration management for reckon
//!
//! Layered with figment: embedded defaults, then user and repository files
//! (TOML, JSON or YAML), then `RECKON_*` environment variables, then CLI
//! overrides. The library core never reads configuration; only the binary does.

pub mod core;

pub use self::core::{DemoConfig, OutputConfig, ParallelConfig, ReckonConfig};
