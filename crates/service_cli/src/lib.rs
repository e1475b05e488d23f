//! grf CLI - Command Line Operations for Gaussian Random Field Synthesis
//!
//! Library half of the `grf` binary: configuration loading, command
//! implementations and output writers. Keeping these out of `main.rs` lets
//! integration tests drive them directly.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates `grf_core` and
//! `grf_synth` and owns everything the libraries deliberately leave out:
//! file formats, environment variables and the command-line surface.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
