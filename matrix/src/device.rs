use std::{fmt, thread};

use log::debug;

use crate::MAX_THREADS_PER_BLOCK;

/// Properties of the compute device the kernels run on: the host CPU and
/// the rayon worker pool in scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub architecture: &'static str,
    pub logical_processors: usize,
    pub worker_threads: usize,
    pub max_threads_per_block: usize,
    pub total_memory_mib: Option<u64>,
}

impl DeviceInfo {
    /// Query the current device. Properties that cannot be discovered are left unknown.
    pub fn query() -> Self {
        let logical_processors = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let info = Self {
            name: format!("{} ({})", std::env::consts::ARCH, std::env::consts::OS),
            architecture: architecture_family(std::env::consts::ARCH),
            logical_processors,
            worker_threads: rayon::current_num_threads(),
            max_threads_per_block: MAX_THREADS_PER_BLOCK,
            total_memory_mib: total_memory_mib(),
        };
        debug!("device query: {:?}", info);
        info
    }
}

/// Human-readable family name for a `std::env::consts::ARCH` value.
pub fn architecture_family(arch: &str) -> &'static str {
    match arch {
        "x86_64" => "X86-64",
        "x86" => "X86",
        "aarch64" => "ARM64",
        "arm" => "ARM",
        "riscv64" => "RISC-V",
        "powerpc64" => "POWER",
        "wasm32" => "WASM",
        _ => "UNKNOWN",
    }
}

#[cfg(target_os = "linux")]
fn total_memory_mib() -> Option<u64> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
    parse_mem_total_mib(&meminfo)
}

#[cfg(not(target_os = "linux"))]
fn total_memory_mib() -> Option<u64> {
    None
}

/// Extract `MemTotal` (reported in kB) from `/proc/meminfo` contents, in MiB.
pub fn parse_mem_total_mib(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find(|line| line.starts_with("MemTotal:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb / 1024)
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = "*".repeat(51);
        writeln!(f, "{}", rule)?;
        writeln!(f, "DEVICE 0: {}", self.name)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Architecture                          : {}", self.architecture)?;
        writeln!(f, "No. of logical processors             : {}", self.logical_processors)?;
        writeln!(f, "No. of worker threads                 : {}", self.worker_threads)?;
        writeln!(f, "Max. threads (per block)              : {}", self.max_threads_per_block)?;
        match self.total_memory_mib {
            Some(mib) => writeln!(f, "Global memory (total)                 : {} MiB", mib)?,
            None => writeln!(f, "Global memory (total)                 : unknown")?,
        }
        write!(f, "{}", rule)
    }
}
