//! Engine configuration.
//!
//! Worker-pool size is not configured here: engines run on whatever rayon pool is
//! current (the global one, or one the caller installs).

/// Parallel execution knobs shared by both engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HullCfg {
    /// Point scans over fewer elements than this run sequentially.
    /// Results do not depend on this value; only scheduling does.
    pub parallel_cutoff: usize,
}

impl HullCfg {
    /// Everything sequential (except QuickHull's fork-join recursion).
    pub const SEQUENTIAL: Self = Self {
        parallel_cutoff: usize::MAX,
    };

    #[inline]
    pub(crate) fn use_parallel(&self, len: usize) -> bool {
        len >= self.parallel_cutoff
    }
}

impl Default for HullCfg {
    fn default() -> Self {
        Self {
            parallel_cutoff: 1024,
        }
    }
}
