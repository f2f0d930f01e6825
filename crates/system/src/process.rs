//! Executable path lookup, process backgrounding, and sleeping

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SystemError, SystemResult};

/// Full path of the currently running executable.
///
/// Returns an empty path if the OS cannot report it (some hardened or
/// chroot'd environments); callers should treat an empty path as
/// "unknown", not as the filesystem root.
#[must_use]
pub fn this_program_path() -> PathBuf {
    std::env::current_exe().unwrap_or_default()
}

/// Detach the process from its controlling terminal and session so it
/// keeps running after the launching shell closes.
///
/// On unix this forks: the parent exits immediately and only the
/// detached child returns (with `true`), now leading its own session.
/// Returns `false` on platforms without detachment support or if the
/// fork fails — in that case the process is left fully attached.
#[must_use]
pub fn put_in_background() -> bool {
    match try_put_in_background() {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "failed to background process");
            false
        }
    }
}

#[cfg(unix)]
fn try_put_in_background() -> SystemResult<()> {
    // SAFETY: single-threaded fork-then-exec-nothing pattern. The
    // parent calls _exit (no atexit handlers run twice); the child only
    // continues executing already-loaded code.
    unsafe {
        match libc::fork() {
            -1 => Err(SystemError::last_os_error("fork")),
            0 => {
                if libc::setsid() == -1 {
                    return Err(SystemError::last_os_error("setsid"));
                }
                Ok(())
            }
            // Parent: the shell gets its prompt back while the child
            // carries on.
            _ => libc::_exit(0),
        }
    }
}

#[cfg(not(unix))]
fn try_put_in_background() -> SystemResult<()> {
    Err(SystemError::not_supported("process backgrounding"))
}

/// Suspend the calling thread for at least `microseconds`.
///
/// Timing is best-effort: the OS may round up, and on some platforms a
/// signal can end the sleep early. Callers must not use this as a
/// precise timer.
pub fn usleep(microseconds: u64) {
    std::thread::sleep(Duration::from_micros(microseconds));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_path_points_at_a_real_file() {
        let path = this_program_path();
        assert!(!path.as_os_str().is_empty());
        assert!(path.is_absolute());
        assert!(path.exists());
    }

    #[test]
    fn usleep_waits_at_least_the_requested_time() {
        let start = std::time::Instant::now();
        usleep(10_000);
        assert!(start.elapsed() >= Duration::from_micros(10_000));
    }

    // put_in_background is deliberately untested: forking inside the
    // test harness would orphan the runner. The unix branch is the
    // classic fork/setsid pair and is exercised by lumen's CLI tools.
}
