#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// 單次取樣的行程資源用量
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    pub cpu_percent: f32,
    pub memory_mb: u64,
    pub memory_percent: f32,
    pub peak_mb: u64,
    pub elapsed: Duration,
}

/// 追蹤目前行程的 CPU 與記憶體，峰值跨取樣保留
#[cfg(feature = "cli")]
pub struct ResourceMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    started_at: Instant,
    peak_mb: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl ResourceMonitor {
    pub fn new(enabled: bool) -> Self {
        // 建立時先刷新一次，讓第一次取樣就有數據
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid: sysinfo::get_current_pid().ok(),
            started_at: Instant::now(),
            peak_mb: Mutex::new(0),
            enabled,
        }
    }

    pub fn snapshot(&self) -> Option<ResourceSnapshot> {
        if !self.enabled {
            return None;
        }

        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_all();
        let process = system.process(pid)?;

        let memory_mb = process.memory() / 1024 / 1024;
        let total_mb = system.total_memory() / 1024 / 1024;
        let memory_percent = if total_mb > 0 {
            memory_mb as f32 / total_mb as f32 * 100.0
        } else {
            0.0
        };

        // 峰值只增不減
        let mut peak = self.peak_mb.lock().ok()?;
        *peak = (*peak).max(memory_mb);

        Some(ResourceSnapshot {
            cpu_percent: process.cpu_usage(),
            memory_mb,
            memory_percent,
            peak_mb: *peak,
            elapsed: self.started_at.elapsed(),
        })
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(snap) = self.snapshot() {
            tracing::info!(
                "📊 {}: cpu {:.1}%, memory {}MB ({:.1}% of total), peak {}MB, elapsed {:?}",
                phase,
                snap.cpu_percent,
                snap.memory_mb,
                snap.memory_percent,
                snap.peak_mb,
                snap.elapsed
            );
        }
    }

    pub fn log_summary(&self) {
        if let Some(snap) = self.snapshot() {
            tracing::info!(
                "📊 Batch finished in {:?}, peak memory {}MB",
                snap.elapsed,
                snap.peak_mb
            );
        }
    }
}

// 非 CLI 建置時為無操作版本
#[cfg(not(feature = "cli"))]
pub struct ResourceMonitor;

#[cfg(not(feature = "cli"))]
impl ResourceMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str) {}

    pub fn log_summary(&self) {}
}
