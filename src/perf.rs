use std::time::Instant;

/// 性能统计 Guard：按作用域记录 elapsed_ms
///
/// 使用方式：
/// ```ignore
/// let _perf = workorder_replan::perf::PerfGuard::new("recalc_center");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            "done"
        );
    }
}
