//! Child-process resource policy: scheduling priority and memory sampling.

/// Lowest scheduling priority; every child is demoted to it so evaluation
/// batches do not starve the host.
#[cfg(unix)]
const NICENESS: libc::c_int = 19;

/// Demote a child process to the lowest scheduling priority.
///
/// Best-effort: a failure (e.g. the child already exited) is not an error.
pub fn renice(pid: u32) {
    #[cfg(unix)]
    {
        // SAFETY: setpriority has no memory-safety preconditions; an invalid
        // pid yields an error return which we ignore.
        unsafe {
            libc::setpriority(libc::PRIO_PROCESS, pid as libc::id_t, NICENESS);
        }
    }
    #[cfg(not(unix))]
    {
        let _ = pid;
    }
}

/// Peak resident set size of a process, in bytes.
///
/// Linux: the kernel-maintained `VmHWM` high-water mark from
/// `/proc/<pid>/status`, so short-lived spikes between polls are still
/// captured. Other platforms report `None` and the journal records a null.
pub fn peak_rss_bytes(pid: u32) -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let status = std::fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmHWM:") {
                let kb: u64 = rest.trim().trim_end_matches("kB").trim().parse().ok()?;
                return Some(kb * 1024);
            }
        }
        None
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = pid;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renice_tolerates_dead_pids() {
        renice(u32::MAX - 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn peak_rss_reads_own_process() {
        let rss = peak_rss_bytes(std::process::id()).unwrap();
        assert!(rss > 0);
    }
}
