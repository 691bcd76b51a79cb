use std::{fmt, marker::PhantomData, str::FromStr};

use ark_std::{end_timer, start_timer};
use log::{debug, trace};
use rayon::prelude::*;
use utils::Timer;

use crate::{check_shape, LaunchConfig, LaunchReport, Matrix, RotateError, RotateResult};

/// Kernel used to shift the rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// One task per column, shifting the column in place from the last row up.
    #[default]
    ColumnTasks,
    /// Copy each destination row from its source row, one task per row.
    RowCopy,
    /// Single-threaded per-column shift.
    Sequential,
}

impl FromStr for Strategy {
    type Err = RotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column-tasks" => Ok(Strategy::ColumnTasks),
            "row-copy" => Ok(Strategy::RowCopy),
            "sequential" => Ok(Strategy::Sequential),
            _ => Err(RotateError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Strategy::ColumnTasks => "column-tasks",
            Strategy::RowCopy => "row-copy",
            Strategy::Sequential => "sequential",
        };
        f.write_str(name)
    }
}

/// Cyclically shifts the rows of a row-major buffer downward.
///
/// After one step, row `r` holds what row `(r - 1 + rows) % rows` held before,
/// so the last row wraps around to the top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowRotator {
    strategy: Strategy,
}

impl RowRotator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Shift every column of `buffer` down by one row.
    #[inline]
    pub fn rotate<T>(&self, buffer: &mut [T], rows: usize, cols: usize) -> RotateResult<()>
    where
        T: Copy + Send + Sync,
    {
        self.rotate_by(buffer, rows, cols, 1)
    }

    /// Shift every column of `buffer` down by `steps` rows.
    pub fn rotate_by<T>(
        &self,
        buffer: &mut [T],
        rows: usize,
        cols: usize,
        steps: usize,
    ) -> RotateResult<()>
    where
        T: Copy + Send + Sync,
    {
        check_shape(buffer.len(), rows, cols)?;
        let config = LaunchConfig::for_columns(cols, crate::DEFAULT_THREADS_PER_BLOCK);
        self.run(buffer, rows, cols, steps, config.total_tasks());
        Ok(())
    }

    /// Shift `matrix` down by one row over the task grid `config`.
    #[inline]
    pub fn launch<T>(
        &self,
        matrix: &mut Matrix<T>,
        config: &LaunchConfig,
    ) -> RotateResult<LaunchReport>
    where
        T: Copy + Send + Sync,
    {
        self.launch_by(matrix, config, 1)
    }

    /// Shift `matrix` down by `steps` rows over the task grid `config`.
    ///
    /// The grid must provide a task for every column. Tasks past the last column
    /// are skipped and counted in [`LaunchReport::idle_tasks`].
    pub fn launch_by<T>(
        &self,
        matrix: &mut Matrix<T>,
        config: &LaunchConfig,
        steps: usize,
    ) -> RotateResult<LaunchReport>
    where
        T: Copy + Send + Sync,
    {
        let (rows, cols) = (matrix.rows(), matrix.cols());
        config.validate(cols)?;
        debug!(
            "launching {} over {}x{} matrix with {}",
            self.strategy, rows, cols, config
        );

        let total_tasks = config.total_tasks();
        let timer = Timer::new("rotate rows", false);
        self.run(matrix.as_mut_slice(), rows, cols, steps, total_tasks);
        let elapsed = timer.stop();

        let active_tasks = total_tasks.min(cols);
        Ok(LaunchReport {
            config: *config,
            active_tasks,
            idle_tasks: total_tasks - active_tasks,
            elapsed,
        })
    }

    // shape is checked by the caller
    fn run<T>(&self, data: &mut [T], rows: usize, cols: usize, steps: usize, total_tasks: usize)
    where
        T: Copy + Send + Sync,
    {
        let steps = steps % rows;
        if steps == 0 {
            trace!("rotation by a multiple of {} rows, nothing to do", rows);
            return;
        }

        let timer = start_timer!(|| format!(
            "{} rotation of {}x{} by {}",
            self.strategy, rows, cols, steps
        ));
        match self.strategy {
            Strategy::ColumnTasks => column_tasks(data, rows, cols, steps, total_tasks),
            Strategy::RowCopy => row_copy(data, rows, cols, steps),
            Strategy::Sequential => sequential(data, rows, cols, steps),
        }
        end_timer!(timer);
    }
}

/// Shift the rows of `buffer` down by one with the default strategy.
#[inline]
pub fn rotate<T>(buffer: &mut [T], rows: usize, cols: usize) -> RotateResult<()>
where
    T: Copy + Send + Sync,
{
    RowRotator::default().rotate(buffer, rows, cols)
}

/// Shift the rows of `buffer` down by `steps` with the default strategy.
#[inline]
pub fn rotate_by<T>(buffer: &mut [T], rows: usize, cols: usize, steps: usize) -> RotateResult<()>
where
    T: Copy + Send + Sync,
{
    RowRotator::default().rotate_by(buffer, rows, cols, steps)
}

/// Shared view of a row-major buffer that hands out one column per task.
struct ColumnGrid<'a, T> {
    ptr: *mut T,
    rows: usize,
    cols: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// Tasks only ever touch the column they were given, and columns never alias.
unsafe impl<T: Send> Send for ColumnGrid<'_, T> {}
unsafe impl<T: Send> Sync for ColumnGrid<'_, T> {}

impl<'a, T: Copy> ColumnGrid<'a, T> {
    #[inline]
    fn new(data: &'a mut [T], rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            ptr: data.as_mut_ptr(),
            rows,
            cols,
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// `row < rows` and `col < cols`.
    #[inline(always)]
    unsafe fn cell(&self, row: usize, col: usize) -> *mut T {
        unsafe { self.ptr.add(row * self.cols + col) }
    }

    /// Shift column `col` down by `steps` rows.
    ///
    /// # Safety
    /// `col < cols`, and no other task may access column `col` concurrently.
    unsafe fn shift_column(&self, col: usize, steps: usize) {
        let rows = self.rows;
        unsafe {
            if steps == 1 {
                let last = *self.cell(rows - 1, col);
                for r in (1..rows).rev() {
                    *self.cell(r, col) = *self.cell(r - 1, col);
                }
                *self.cell(0, col) = last;
            } else {
                let mut column = Vec::with_capacity(rows);
                for r in 0..rows {
                    column.push(*self.cell(r, col));
                }
                column.rotate_right(steps);
                for (r, value) in column.into_iter().enumerate() {
                    *self.cell(r, col) = value;
                }
            }
        }
    }
}

fn column_tasks<T>(data: &mut [T], rows: usize, cols: usize, steps: usize, total_tasks: usize)
where
    T: Copy + Send + Sync,
{
    let grid = ColumnGrid::new(data, rows, cols);
    (0..total_tasks).into_par_iter().for_each(|task| {
        if task < cols {
            // SAFETY: each task index is distinct and in range, so every column has one owner.
            unsafe { grid.shift_column(task, steps) }
        }
    });
}

fn row_copy<T>(data: &mut [T], rows: usize, cols: usize, steps: usize)
where
    T: Copy + Send + Sync,
{
    let src = data.to_vec();
    data.par_chunks_mut(cols)
        .enumerate()
        .for_each(|(r, dst)| {
            let from = (r + rows - steps) % rows;
            dst.copy_from_slice(&src[from * cols..(from + 1) * cols]);
        });
}

fn sequential<T: Copy>(data: &mut [T], rows: usize, cols: usize, steps: usize) {
    for _ in 0..steps {
        for c in 0..cols {
            let last = data[(rows - 1) * cols + c];
            for r in (1..rows).rev() {
                data[r * cols + c] = data[(r - 1) * cols + c];
            }
            data[c] = last;
        }
    }
}
