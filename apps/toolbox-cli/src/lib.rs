//! Command-line front end for the toolbox
//!
//! The same kernels as the browser pages, driven from the shell. Results go
//! to stdout (text or `--json`), logs go to stderr.

pub mod commands;
pub mod config;

pub use commands::CommandOutput;
pub use config::ToolboxConfig;
