use std::{fmt::Write, str::FromStr};

use clap::Parser;
use log::{debug, info};
use matrix::{
    DeviceInfo, LaunchConfig, LaunchReport, Matrix, RotateError, RowRotator, Strategy,
};
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RotateExecArgs {
    /// Number of matrix rows
    #[arg(short, long, default_value_t = 7)]
    pub rows: usize,

    /// Number of matrix columns
    #[arg(short, long, default_value_t = 25)]
    pub cols: usize,

    /// Tasks per block
    #[arg(short, long, default_value_t = 25)]
    pub threads_per_block: usize,

    /// Blocks in the grid, by default just enough to cover every column
    #[arg(short, long)]
    pub blocks: Option<usize>,

    /// Number of rows to shift down by
    #[arg(short = 'n', long, default_value_t = 1)]
    pub times: usize,

    /// Kernel: column-tasks, row-copy, or sequential
    #[arg(short, long, default_value = "column-tasks")]
    pub strategy: String,

    /// Worker threads, 0 keeps the rayon default
    #[arg(short, long, default_value_t = 0)]
    pub workers: usize,

    /// Do not print the matrices
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl RotateExecArgs {
    pub fn launch_config(&self) -> LaunchConfig {
        match self.blocks {
            Some(blocks) => LaunchConfig::new(blocks, self.threads_per_block),
            None => LaunchConfig::for_columns(self.cols, self.threads_per_block),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("rotation error: {0}")]
    Rotate(#[from] RotateError),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub device: DeviceInfo,
    pub strategy: Strategy,
    pub original: Matrix,
    pub rotated: Matrix,
    pub report: LaunchReport,
}

/// Build the worker pool, fill the matrix row by row, and run one timed launch.
pub fn execute(args: &RotateExecArgs) -> Result<RunSummary, ExecError> {
    let strategy = Strategy::from_str(&args.strategy)?;
    let config = args.launch_config();

    let mut builder = rayon::ThreadPoolBuilder::new();
    if args.workers > 0 {
        builder = builder.num_threads(args.workers);
    }
    let pool = builder.build()?;
    debug!("worker pool ready with {} threads", pool.current_num_threads());

    pool.install(|| {
        let device = DeviceInfo::query();
        let original = Matrix::filled_by_row(args.rows, args.cols)?;
        let mut rotated = original.clone();

        let report = RowRotator::with_strategy(strategy).launch_by(
            &mut rotated,
            &config,
            args.times,
        )?;
        info!(
            "rotated {}x{} matrix by {} in {:.6} ms",
            args.rows,
            args.cols,
            args.times,
            report.elapsed_ms()
        );

        Ok(RunSummary {
            device,
            strategy,
            original,
            rotated,
            report,
        })
    })
}

/// Launch geometry and timing, framed like the device banner.
pub fn render_launch(summary: &RunSummary) -> String {
    let rule = "*".repeat(51);
    let report = &summary.report;
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "KERNEL of {} block(s) with {} THREADS:",
        report.config.blocks,
        report.config.total_tasks()
    );
    let _ = writeln!(out, " x axis -> {} threads", report.config.threads_per_block);
    let _ = writeln!(out, " active -> {} tasks", report.active_tasks);
    let _ = writeln!(out, " idle   -> {} tasks", report.idle_tasks);
    let _ = writeln!(out, "Strategy: {}", summary.strategy);
    let _ = writeln!(out, "Execution time: {:.6} ms", report.elapsed_ms());
    let _ = writeln!(out, "{rule}");
    out
}

pub fn render_summary(summary: &RunSummary, quiet: bool) -> String {
    let mut out = format!("{}\n\n{}", summary.device, render_launch(summary));
    if !quiet {
        let _ = write!(
            out,
            "\nORIGINAL MATRIX:\n{}\nFINAL MATRIX:\n{}",
            summary.original, summary.rotated
        );
    }
    out
}
