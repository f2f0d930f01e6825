//! Process and machine memory probes
//!
//! Pure queries: none of these operations fail. Where the platform (or
//! a build without the `sysinfo` feature) cannot answer, the sentinel
//! is 0 for the memory probes and a documented platform default for
//! [`max_open_files`].

#[cfg(feature = "sysinfo")]
use parking_lot::RwLock;
#[cfg(feature = "sysinfo")]
use std::sync::LazyLock;

use crate::error::SystemResult;

// Shared snapshot: creating a sysinfo::System walks the whole machine,
// so keep one instance and refresh only what each query needs.
#[cfg(feature = "sysinfo")]
static SYSINFO_SYSTEM: LazyLock<RwLock<sysinfo::System>> = LazyLock::new(|| {
    let mut sys = sysinfo::System::new_all();
    sys.refresh_all();
    RwLock::new(sys)
});

/// Initialize the shared system snapshot.
///
/// Optional; the snapshot is created lazily on first query. Calling
/// this at startup moves the cost out of the first probe.
pub fn init() -> SystemResult<()> {
    #[cfg(feature = "sysinfo")]
    {
        let mut sys = SYSINFO_SYSTEM.write();
        sys.refresh_memory();
    }
    Ok(())
}

/// The amount of memory currently used by this process, in bytes.
///
/// With `resident == true` (the usual choice) this is the resident set
/// actually mapped into RAM. With `resident == false` it is the full
/// committed virtual arena, which can be much larger than what the
/// process ever touches.
///
/// Returns 0 when the platform cannot report it or the `sysinfo`
/// feature is disabled.
#[must_use]
pub fn memory_used(resident: bool) -> usize {
    #[cfg(feature = "sysinfo")]
    {
        use sysinfo::{Pid, ProcessesToUpdate};

        let pid = Pid::from_u32(std::process::id());
        let mut sys = SYSINFO_SYSTEM.write();
        let _ = sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), false);

        sys.process(pid)
            .map(|process| {
                if resident {
                    process.memory() as usize
                } else {
                    process.virtual_memory() as usize
                }
            })
            .unwrap_or(0)
    }

    #[cfg(not(feature = "sysinfo"))]
    {
        let _ = resident;
        0
    }
}

/// Total physical RAM on this machine, in bytes; 0 if undeterminable.
#[must_use]
pub fn physical_memory() -> usize {
    #[cfg(feature = "sysinfo")]
    {
        let mut sys = SYSINFO_SYSTEM.write();
        sys.refresh_memory();
        sys.total_memory() as usize
    }

    #[cfg(not(feature = "sysinfo"))]
    {
        0
    }
}

/// Current soft limit on open file handles for this process.
///
/// Unix: the `RLIMIT_NOFILE` soft limit, falling back to 256 if the
/// query fails. Elsewhere: 512, the C runtime's default stdio ceiling
/// on Windows.
#[must_use]
pub fn max_open_files() -> usize {
    #[cfg(unix)]
    {
        let mut limit = libc::rlimit { rlim_cur: 0, rlim_max: 0 };
        // SAFETY: getrlimit writes into the struct we own; no aliasing.
        let rc = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &raw mut limit) };
        if rc == 0 { limit.rlim_cur as usize } else { 256 }
    }

    #[cfg(not(unix))]
    {
        512
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_file_limit_is_positive() {
        assert!(max_open_files() > 0);
    }

    #[cfg(feature = "sysinfo")]
    #[test]
    fn physical_memory_is_reported() {
        // Every supported CI target can report installed RAM.
        assert!(physical_memory() > 0);
    }

    #[cfg(feature = "sysinfo")]
    #[test]
    fn resident_set_is_within_virtual_arena() {
        let resident = memory_used(true);
        let virtual_arena = memory_used(false);
        if resident > 0 && virtual_arena > 0 {
            assert!(resident <= virtual_arena);
        }
    }

    #[cfg(all(feature = "sysinfo", target_os = "linux"))]
    #[test]
    fn resident_set_is_nonzero_on_linux() {
        assert!(memory_used(true) > 0);
    }

    #[cfg(not(feature = "sysinfo"))]
    #[test]
    fn memory_probes_degrade_to_zero() {
        assert_eq!(memory_used(true), 0);
        assert_eq!(physical_memory(), 0);
    }
}
