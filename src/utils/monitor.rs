#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub phase_time: Duration,
    pub elapsed_time: Duration,
}

/// Per-phase timing and resident memory of the export process.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    // 上一個階段結束的時間與目前的記憶體峰值
    progress: Mutex<(Instant, u64)>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid()
                .map_err(|e| tracing::warn!("System monitoring unavailable: {}", e))
                .ok()
        } else {
            None
        };

        let now = Instant::now();
        Self {
            system: Mutex::new(System::new()),
            pid,
            start_time: now,
            progress: Mutex::new((now, 0)),
            enabled: pid.is_some(),
        }
    }

    /// Closes the current phase and returns its stats.
    pub fn phase_stats(&self) -> Option<PhaseStats> {
        let pid = self.pid?;

        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let memory_mb = system.process(pid)?.memory() / 1024 / 1024;

        let mut progress = self.progress.lock().ok()?;
        let now = Instant::now();
        let phase_time = now.duration_since(progress.0);
        progress.0 = now;
        progress.1 = progress.1.max(memory_mb);

        Some(PhaseStats {
            memory_mb,
            peak_memory_mb: progress.1,
            phase_time,
            elapsed_time: now.duration_since(self.start_time),
        })
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(stats) = self.phase_stats() {
            tracing::info!(
                "📊 {} took {:?} - Memory: {}MB",
                phase,
                stats.phase_time,
                stats.memory_mb
            );
        }
    }

    pub fn log_final_stats(&self, document_bytes: usize) {
        if let Some(stats) = self.phase_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB, Document: {} bytes",
                stats.elapsed_time,
                stats.peak_memory_mb,
                document_bytes
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 沒有 cli feature 時提供空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str) {}

    pub fn log_final_stats(&self, _document_bytes: usize) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
