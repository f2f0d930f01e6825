//! Hardware concurrency detection

/// Number of execution contexts the scheduler can run in parallel,
/// including simultaneous-multithreading (hyperthread) contexts.
///
/// Never returns 0: if the platform cannot report a count (or the
/// process is restricted in a way the OS does not expose), the fallback
/// is 1 and callers should assume single-threaded execution.
#[must_use]
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism().map(std::num::NonZeroUsize::get).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_context() {
        assert!(hardware_concurrency() >= 1);
    }
}
