// credit: https://github.com/microsoft/Spartan/blob/master/src/timer.rs

#[cfg(feature = "profile")]
use colored::Colorize;
#[cfg(feature = "profile")]
use core::sync::atomic::AtomicUsize;
#[cfg(feature = "profile")]
use core::sync::atomic::Ordering;
use std::time::{Duration, Instant};

#[cfg(feature = "profile")]
pub static CALL_DEPTH: AtomicUsize = AtomicUsize::new(0);

/// Wall-clock timer for a scope.
///
/// The elapsed time is always measured. With the `profile` feature, root timers
/// additionally print nested, coloured start/stop lines.
pub struct Timer {
    label: String,
    start: Instant,
    is_root: bool,
}

impl Timer {
    #[inline(always)]
    pub fn new(label: &str, is_root: bool) -> Self {
        #[cfg(feature = "profile")]
        if is_root {
            CALL_DEPTH.fetch_add(1, Ordering::Relaxed);
            println!(
                "{:indent$}* {}",
                "",
                label.yellow().bold(),
                indent = 2 * CALL_DEPTH.load(Ordering::Relaxed)
            );
        }

        Self {
            label: label.to_string(),
            start: Instant::now(),
            is_root,
        }
    }

    #[inline(always)]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the time spent since [`Timer::new`].
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        let duration = self.start.elapsed();

        #[cfg(feature = "profile")]
        if self.is_root {
            println!(
                "{:indent$}* {} {:?}",
                "",
                self.label.blue().bold(),
                duration,
                indent = 2 * CALL_DEPTH.load(Ordering::Relaxed)
            );
            CALL_DEPTH.fetch_sub(1, Ordering::Relaxed);
        }

        duration
    }

    #[inline(always)]
    pub fn print(&self, _msg: &str) {
        #[cfg(feature = "profile")]
        if self.is_root {
            println!(
                "{:indent$}* {}",
                "",
                _msg.green().bold(),
                indent = 2 * (CALL_DEPTH.load(Ordering::Relaxed) + 1)
            );
        }
    }

    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

/// Milliseconds with sub-millisecond precision, the unit kernel timings are reported in.
#[inline]
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}
