//! Host-level usage sampling for the runtime-tracking file.
//!
//! Linux-only best effort; other platforms report `None` and the tracking
//! records carry nulls.

/// One `/proc/stat` CPU sample; percentages come from deltas between
/// consecutive samples.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CpuSample {
    busy: u64,
    total: u64,
}

impl CpuSample {
    pub(crate) fn take() -> Option<CpuSample> {
        #[cfg(target_os = "linux")]
        {
            let stat = std::fs::read_to_string("/proc/stat").ok()?;
            let line = stat.lines().next()?;
            let fields: Vec<u64> = line
                .split_whitespace()
                .skip(1)
                .filter_map(|v| v.parse().ok())
                .collect();
            if fields.len() < 4 {
                return None;
            }
            let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
            let total: u64 = fields.iter().sum();
            Some(CpuSample {
                busy: total - idle,
                total,
            })
        }
        #[cfg(not(target_os = "linux"))]
        {
            None
        }
    }

    /// CPU usage percent since `earlier`.
    pub(crate) fn percent_since(self, earlier: CpuSample) -> Option<f64> {
        let total = self.total.checked_sub(earlier.total)?;
        if total == 0 {
            return None;
        }
        let busy = self.busy.checked_sub(earlier.busy)?;
        Some(busy as f64 / total as f64 * 100.0)
    }
}

/// Percentage of physical memory in use.
pub(crate) fn memory_percent() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
        let field = |name: &str| -> Option<f64> {
            meminfo
                .lines()
                .find(|l| l.starts_with(name))?
                .split_whitespace()
                .nth(1)?
                .parse()
                .ok()
        };
        let total = field("MemTotal:")?;
        let available = field("MemAvailable:")?;
        if total <= 0.0 {
            return None;
        }
        Some((total - available) / total * 100.0)
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn samples_are_monotonic() {
        let first = CpuSample::take().unwrap();
        let second = CpuSample::take().unwrap();
        assert!(second.total >= first.total);
    }

    #[test]
    fn memory_percent_is_a_percentage() {
        let pct = memory_percent().unwrap();
        assert!((0.0..=100.0).contains(&pct));
    }
}
