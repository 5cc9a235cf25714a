use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Once;
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_OP_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);
static INIT: Once = Once::new();

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
    static CHART_COUNT: Cell<u64> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 读取性能统计开关（进程内只读一次）
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭（可通过环境变量开启）
/// - `ZIWEI_CHART_PERF=1` 强制开启, `ZIWEI_CHART_PERF=0` 强制关闭
/// - `ZIWEI_CHART_SLOW_MS=20` 配置慢操作阈值（毫秒）
fn ensure_init() {
    INIT.call_once(|| {
        let enabled = match std::env::var("ZIWEI_CHART_PERF") {
            Ok(v) => is_true(&v),
            Err(_) => cfg!(debug_assertions),
        };
        PERF_ENABLED.store(enabled, Ordering::Relaxed);

        let slow_ms = std::env::var("ZIWEI_CHART_SLOW_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 10 });
        SLOW_OP_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);
    });
}

pub fn is_enabled() -> bool {
    ensure_init();
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 记录一次完整排盘（仅在某个 PerfGuard 作用域内计数）
pub fn record_chart_computed() {
    let active = PERF_DEPTH.with(|d| d.get() > 0);
    if active {
        CHART_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// 性能统计 Guard：记录 elapsed_ms + 本作用域内实际排盘次数
///
/// 使用方式：
/// ```ignore
/// let _perf = ziwei_chart::perf::PerfGuard::new("compute_chart");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    chart_start: u64,
    enabled: bool,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let enabled = is_enabled();
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        let chart_start = CHART_COUNT.with(|c| c.get());
        Self {
            op,
            start: Instant::now(),
            chart_start,
            enabled,
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
        if !self.enabled {
            return;
        }

        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let chart_end = CHART_COUNT.with(|c| c.get());
        let chart_count = chart_end.saturating_sub(self.chart_start);

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            chart_count,
            "done"
        );

        let threshold = SLOW_OP_THRESHOLD_MS.load(Ordering::Relaxed);
        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "slow_op",
                op = self.op,
                elapsed_ms,
                "slow op"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_count_scoped_to_guard() {
        let before = CHART_COUNT.with(|c| c.get());
        record_chart_computed();
        assert_eq!(CHART_COUNT.with(|c| c.get()), before);

        let _guard = PerfGuard::new("test");
        record_chart_computed();
        record_chart_computed();
        assert_eq!(CHART_COUNT.with(|c| c.get()), before + 2);
    }

    #[test]
    fn test_is_true() {
        assert!(is_true(" On "));
        assert!(is_true("1"));
        assert!(!is_true("off"));
    }
}
