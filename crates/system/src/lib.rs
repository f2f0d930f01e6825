#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![allow(unsafe_code)] // Platform probes and the crash hook require FFI
//! # Lumen System
//!
//! Cross-platform process, terminal, and crash-diagnostics utilities for
//! the Lumen image I/O toolkit.
//!
//! This crate is the single place where Lumen talks to the operating
//! system directly. It provides a unified interface for:
//! - Process and machine memory probes
//! - Hardware concurrency detection
//! - Reentrant local-time conversion
//! - Environment variable access with defaults
//! - Executable path lookup and process backgrounding
//! - Terminal geometry and ANSI-formatted console output
//! - Stack traces and an automatic crash-trace hook
//!
//! Probe operations never fail: where a platform cannot answer, they
//! return a documented sentinel (0 for numeric probes, an empty string
//! or path for text probes, `false` for boolean operations) and callers
//! degrade gracefully.
//!
//! ## Features
//!
//! - `sysinfo` (default): memory probes backed by the `sysinfo` crate
//! - `stacktrace` (default): stack capture and the crash hook
//! - `serde`: serialization support for the small data types
//!
//! ## Example
//!
//! ```no_run
//! use lumen_system::terminal::Term;
//!
//! fn main() -> lumen_system::SystemResult<()> {
//!     lumen_system::init()?;
//!
//!     println!("{}", lumen_system::summary());
//!
//!     let term = Term::stdout();
//!     println!("{}", term.ansi_with("bold,green", "ready"));
//!     Ok(())
//! }
//! ```
pub mod clock;
pub mod compat;
pub mod cpu;
pub mod env;
pub mod error;
pub mod memory;
pub mod prelude;
pub mod process;
pub mod stacktrace;
pub mod terminal;
pub mod utils;

// Re-exports
pub use error::{SystemError, SystemResult};
pub use terminal::{Term, TerminalSize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the system probes.
///
/// Pre-warms the lazily created system snapshot so the first memory
/// query does not pay the initialization cost. Optional; every probe
/// also initializes on first use.
pub fn init() -> SystemResult<()> {
    memory::init()
}

/// Get a formatted summary of the machine and terminal environment.
#[must_use]
pub fn summary() -> String {
    let size = terminal::size();
    format!(
        "Executable: {}\n\
         Hardware concurrency: {}\n\
         Physical memory: {}\n\
         Resident memory: {}\n\
         Open-file limit: {}\n\
         Terminal: {}x{}",
        process::this_program_path().display(),
        cpu::hardware_concurrency(),
        utils::format_bytes(memory::physical_memory() as u64),
        utils::format_bytes(memory::memory_used(true) as u64),
        memory::max_open_files(),
        size.columns,
        size.rows,
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn summary_mentions_every_section() {
        let summary = super::summary();
        for label in [
            "Executable:",
            "Hardware concurrency:",
            "Physical memory:",
            "Open-file limit:",
            "Terminal:",
        ] {
            assert!(summary.contains(label), "missing {label} in {summary}");
        }
    }
}
