use std::{fmt, time::Duration};

use crate::{RotateError, RotateResult};

/// Upper bound on tasks per block, matching the usual device limit.
pub const MAX_THREADS_PER_BLOCK: usize = 1024;

/// Tasks per block used when the caller does not pick a grid.
pub const DEFAULT_THREADS_PER_BLOCK: usize = 25;

/// One-dimensional task grid for a launch: task `i` of block `b` handles
/// column `b * threads_per_block + i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    pub blocks: usize,
    pub threads_per_block: usize,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            blocks: 1,
            threads_per_block: DEFAULT_THREADS_PER_BLOCK,
        }
    }
}

impl LaunchConfig {
    #[inline]
    pub fn new(blocks: usize, threads_per_block: usize) -> Self {
        Self {
            blocks,
            threads_per_block,
        }
    }

    /// Smallest grid of `threads_per_block`-wide blocks covering `cols` columns.
    #[inline]
    pub fn for_columns(cols: usize, threads_per_block: usize) -> Self {
        let threads_per_block = threads_per_block.max(1);
        Self {
            blocks: cols.div_ceil(threads_per_block).max(1),
            threads_per_block,
        }
    }

    #[inline]
    pub fn total_tasks(&self) -> usize {
        self.blocks.saturating_mul(self.threads_per_block)
    }

    /// A grid is usable when its blocks are well formed and it has a task for every column.
    /// Surplus tasks are allowed and stay idle.
    pub fn validate(&self, cols: usize) -> RotateResult<()> {
        let err = RotateError::InvalidLaunch {
            blocks: self.blocks,
            threads_per_block: self.threads_per_block,
            cols,
        };
        if self.blocks == 0
            || self.threads_per_block == 0
            || self.threads_per_block > MAX_THREADS_PER_BLOCK
        {
            return Err(err);
        }
        match self.blocks.checked_mul(self.threads_per_block) {
            Some(total) if total >= cols => Ok(()),
            _ => Err(err),
        }
    }
}

impl fmt::Display for LaunchConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} block(s) x {} thread(s) = {} task(s)",
            self.blocks,
            self.threads_per_block,
            self.total_tasks()
        )
    }
}

/// What a launch did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchReport {
    pub config: LaunchConfig,
    /// Tasks that owned a column.
    pub active_tasks: usize,
    /// Tasks whose index fell past the last column and were skipped.
    pub idle_tasks: usize,
    pub elapsed: Duration,
}

impl LaunchReport {
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        utils::as_millis_f64(self.elapsed)
    }
}
