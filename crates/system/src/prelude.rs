//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so host code
//! can `use lumen_system::prelude::*;` and have the whole probe surface
//! in scope.

// Core types
pub use crate::error::{SystemError, SystemResult};
pub use crate::stacktrace::CrashDestination;
pub use crate::terminal::{Term, TerminalSize};

// Probe functions
pub use crate::clock::get_local_time;
pub use crate::cpu::hardware_concurrency;
pub use crate::env::{getenv, getenv_or};
pub use crate::memory::{max_open_files, memory_used, physical_memory};
pub use crate::process::{put_in_background, this_program_path, usleep};
pub use crate::stacktrace::{setup_crash_stacktrace, stacktrace};
pub use crate::terminal::{terminal_columns, terminal_rows};

// Crate-level helpers
pub use crate::{init, summary};
