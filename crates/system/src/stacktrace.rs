//! Stack capture and the automatic crash-trace hook
//!
//! [`stacktrace`] renders the current call stack; an empty string means
//! "no capture support in this build or platform", never "no frames".
//!
//! [`setup_crash_stacktrace`] installs a process-wide hook that writes
//! a trace when the process dies on a fatal signal. The hook is the one
//! piece of global, persistent state in this crate: a single active
//! destination, reconfigurable at any time, alive until process exit.
//! The destination lives behind an atomic handle, so a crash that races
//! a reconfiguration observes the old or the new destination but never
//! a torn one.
//!
//! File destinations are truncated once at registration (to validate
//! writability) and again at each crash event — the dump file always
//! holds the most recent trace, not an append log.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the crash hook writes its trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CrashDestination {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
    /// Overwrite the file at this path
    File(PathBuf),
}

impl CrashDestination {
    /// Parse a destination token: the literals `"stdout"` and
    /// `"stderr"`, or anything else as a file path. The empty token
    /// (meaning "disable") is handled by [`setup_crash_stacktrace`]
    /// before parsing.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "stdout" => Self::Stdout,
            "stderr" => Self::Stderr,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

/// A human-readable trace of the current call stack, one line (or a
/// `name` + `at file:line` pair) per frame.
///
/// Returns `""` when this build lacks the `stacktrace` feature; treat
/// that as "unavailable", not as an empty stack.
#[must_use]
pub fn stacktrace() -> String {
    #[cfg(feature = "stacktrace")]
    {
        use std::fmt::Write;

        let captured = backtrace::Backtrace::new();
        let mut rendered = String::new();
        for (index, frame) in captured.frames().iter().enumerate() {
            let symbols = frame.symbols();
            if symbols.is_empty() {
                // Stripped builds still get the frame addresses.
                let _ = writeln!(rendered, "{index:4}: {:?}", frame.ip());
                continue;
            }
            for symbol in symbols {
                match symbol.name() {
                    Some(name) => {
                        let _ = write!(rendered, "{index:4}: {name}");
                    }
                    None => {
                        let _ = write!(rendered, "{index:4}: <unknown>");
                    }
                }
                if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                    let _ = write!(rendered, "\n             at {}:{line}", file.display());
                }
                rendered.push('\n');
            }
        }
        rendered
    }

    #[cfg(not(feature = "stacktrace"))]
    {
        String::new()
    }
}

/// Install (or reconfigure) the automatic crash-trace hook.
///
/// `destination` is `"stdout"`, `"stderr"`, a writable file path, or
/// `""` to disable the hook. Returns `true` when the hook is set up (or
/// disabled) as requested; `false` when crash tracing is unsupported on
/// this platform or build, or the file destination cannot be created —
/// the previously active destination is left untouched in that case.
///
/// Only one destination is active at a time; calling again overwrites
/// it. Disabling twice is a no-op that keeps returning `true` on
/// supporting builds.
#[must_use]
pub fn setup_crash_stacktrace(destination: &str) -> bool {
    #[cfg(all(unix, feature = "stacktrace"))]
    {
        match hook::register(destination) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, destination, "failed to set up crash stacktrace");
                false
            }
        }
    }

    #[cfg(not(all(unix, feature = "stacktrace")))]
    {
        let _ = destination;
        tracing::debug!("crash stacktrace hook is not supported in this build");
        false
    }
}

#[cfg(all(unix, feature = "stacktrace"))]
mod hook {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use arc_swap::ArcSwapOption;
    use parking_lot::Mutex;

    use super::CrashDestination;
    use crate::error::{SystemError, SystemResult};

    /// Active destination; `None` while the hook is disabled. The
    /// signal handler reads this with one atomic load.
    static DESTINATION: ArcSwapOption<CrashDestination> = ArcSwapOption::const_empty();

    /// Serializes registration; the handler itself never takes it.
    static INSTALL_LOCK: Mutex<()> = Mutex::new(());

    static HANDLERS_INSTALLED: AtomicBool = AtomicBool::new(false);

    const FATAL_SIGNALS: &[libc::c_int] =
        &[libc::SIGSEGV, libc::SIGBUS, libc::SIGILL, libc::SIGFPE, libc::SIGABRT];

    pub(super) fn register(destination: &str) -> SystemResult<()> {
        let _guard = INSTALL_LOCK.lock();

        if destination.is_empty() {
            // Disable: the handlers stay installed but become inert.
            DESTINATION.store(None);
            return Ok(());
        }

        let dest = CrashDestination::parse(destination);
        if let CrashDestination::File(path) = &dest {
            // Truncate once so an unwritable path fails here, at
            // registration, rather than silently at crash time.
            std::fs::File::create(path)?;
        }

        if !HANDLERS_INSTALLED.load(Ordering::Acquire) {
            install_handlers()?;
            HANDLERS_INSTALLED.store(true, Ordering::Release);
        }

        DESTINATION.store(Some(Arc::new(dest)));
        tracing::debug!(destination, "crash stacktrace hook active");
        Ok(())
    }

    fn install_handlers() -> SystemResult<()> {
        for &signal in FATAL_SIGNALS {
            // SAFETY: sigaction with a zeroed struct, an empty mask and
            // a plain extern "C" handler. SA_RESETHAND restores the
            // default disposition on entry, so the re-raise in the
            // handler terminates the process with the original signal.
            let handler: extern "C" fn(libc::c_int) = handle_fatal_signal;
            unsafe {
                let mut action: libc::sigaction = std::mem::zeroed();
                action.sa_sigaction = handler as libc::sighandler_t;
                libc::sigemptyset(&mut action.sa_mask);
                action.sa_flags = libc::SA_RESETHAND;
                if libc::sigaction(signal, &action, std::ptr::null_mut()) != 0 {
                    return Err(SystemError::last_os_error("sigaction"));
                }
            }
        }
        Ok(())
    }

    extern "C" fn handle_fatal_signal(signal: libc::c_int) {
        // Best effort: formatting a backtrace here is not strictly
        // async-signal-safe, but the process is about to die and a
        // probably-correct trace beats no trace.
        if let Some(dest) = DESTINATION.load_full() {
            let report = format!("caught fatal signal {signal}\n{}", super::stacktrace());
            let _ = write_report(&dest, &report);
        }
        // SAFETY: disposition was reset by SA_RESETHAND; this re-raise
        // terminates the process the way the original fault would have.
        unsafe {
            libc::raise(signal);
        }
    }

    fn write_report(dest: &CrashDestination, report: &str) -> std::io::Result<()> {
        use std::io::Write;

        match dest {
            CrashDestination::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(report.as_bytes())?;
                out.flush()
            }
            CrashDestination::Stderr => {
                let mut err = std::io::stderr().lock();
                err.write_all(report.as_bytes())?;
                err.flush()
            }
            CrashDestination::File(path) => std::fs::write(path, report),
        }
    }
}
