//! Host metrics for the detailed health check.
//!
//! Memory, disk and load come straight from libc; CPU usage and the kernel
//! version come from `sysinfo`. Each reader returns `None` when the platform
//! does not support it or the call fails.

use serde::Serialize;
use sysinfo::System;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Serialize)]
pub struct MemoryStats {
    pub total_mb: f64,
    pub used_mb: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiskStats {
    pub total_gb: f64,
    pub used_gb: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Physical memory usage via `sysinfo(2)`.
#[cfg(target_os = "linux")]
pub fn memory_stats() -> Option<MemoryStats> {
    use std::mem::MaybeUninit;

    let mut info = MaybeUninit::<libc::sysinfo>::uninit();
    // Safety: sysinfo only writes into the provided struct.
    let ret = unsafe { libc::sysinfo(info.as_mut_ptr()) };
    if ret != 0 {
        return None;
    }
    let info = unsafe { info.assume_init() };

    let unit = u64::from(info.mem_unit.max(1));
    let total = info.totalram as u64 * unit;
    let free = (info.freeram as u64 + info.bufferram as u64) * unit;
    let used = total.saturating_sub(free);

    Some(MemoryStats {
        total_mb: round2(total as f64 / MIB),
        used_mb: round2(used as f64 / MIB),
        percent: percent(used, total),
    })
}

#[cfg(not(target_os = "linux"))]
pub fn memory_stats() -> Option<MemoryStats> {
    None
}

/// Filesystem usage for `path` via `statvfs(3)`.
#[cfg(unix)]
pub fn disk_stats(path: &str) -> Option<DiskStats> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;

    let c_path = CString::new(path).ok()?;
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    // Safety: statvfs is well-defined for a valid NUL-terminated path.
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if ret != 0 {
        return None;
    }
    let stat = unsafe { stat.assume_init() };

    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let free = stat.f_bavail as u64 * block_size;
    let used = total.saturating_sub(free);

    Some(DiskStats {
        total_gb: round2(total as f64 / GIB),
        used_gb: round2(used as f64 / GIB),
        percent: percent(used, total),
    })
}

#[cfg(not(unix))]
pub fn disk_stats(_path: &str) -> Option<DiskStats> {
    None
}

/// 1, 5 and 15 minute load averages via `getloadavg(3)`.
#[cfg(unix)]
pub fn load_average() -> Option<LoadAverage> {
    let mut loads = [0.0f64; 3];
    // Safety: the buffer holds exactly the three requested samples.
    let ret = unsafe { libc::getloadavg(loads.as_mut_ptr(), 3) };
    if ret != 3 {
        return None;
    }
    Some(LoadAverage {
        one: round2(loads[0]),
        five: round2(loads[1]),
        fifteen: round2(loads[2]),
    })
}

#[cfg(not(unix))]
pub fn load_average() -> Option<LoadAverage> {
    None
}

/// Global CPU usage in percent, measured over
/// [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`].
///
/// Blocks the calling thread between the two samples; run it on a blocking
/// task.
pub fn cpu_percent() -> Option<f64> {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return None;
    }
    let mut system = System::new();
    system.refresh_cpu_usage();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    system.refresh_cpu_usage();
    Some(round2(f64::from(system.global_cpu_usage())))
}

/// Kernel release, e.g. `6.1.0-18-amd64`.
pub fn kernel_version() -> Option<String> {
    System::kernel_version()
}

/// Operating system name as reported to clients: `Linux`, `Darwin`,
/// `Windows`.
pub fn platform_name() -> &'static str {
    platform_label(std::env::consts::OS)
}

fn platform_label(os: &'static str) -> &'static str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        other => other,
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(used as f64 / total as f64 * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
