//! Deprecated aliases kept for source compatibility
//!
//! Everything in this module forwards to the live API and can be
//! removed without touching the rest of the crate.

/// Number of physical cores, historically excluding hyperthreads.
///
/// The distinction was never reliable across platforms and several of
/// them report virtual cores here anyway, so this is now a plain
/// synonym for [`crate::cpu::hardware_concurrency`].
#[deprecated(since = "0.1.0", note = "unreliable; use cpu::hardware_concurrency() instead")]
#[must_use]
pub fn physical_concurrency() -> usize {
    crate::cpu::hardware_concurrency()
}

#[cfg(test)]
mod tests {
    #[test]
    #[allow(deprecated)]
    fn alias_forwards_verbatim() {
        assert_eq!(super::physical_concurrency(), crate::cpu::hardware_concurrency());
    }
}
