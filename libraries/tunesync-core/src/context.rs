//! Per-run settings threaded through every operation

/// Flags that change how a run behaves but not what it decides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Report what would happen without touching anything
    pub dry_run: bool,

    /// Suppress informational output
    pub quiet: bool,
}

impl RunContext {
    /// Create a context
    pub fn new(dry_run: bool, quiet: bool) -> Self {
        Self { dry_run, quiet }
    }
}
