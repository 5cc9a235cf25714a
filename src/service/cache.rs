// ==========================================
// 紫微斗数排盘引擎 - 命盘缓存
// ==========================================
// 职责: 按指纹记忆化完整命盘
// 策略: TTL 过期 + 容量上限 (最久未用者先淘汰)
// ==========================================
// 红线: 命中返回同一 Arc, 调用方只读
// 红线: 同一指纹并发请求只计算一次; 计算失败不入缓存
// ==========================================

use super::fingerprint::ChartFingerprint;
use crate::domain::chart::CompleteChart;
use crate::error::{ZiweiError, ZiweiResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 缓存统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub total_calculations: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub entries: usize,
}

impl CacheStats {
    /// 命中率 (无请求时为 0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// ==========================================
// ChartCache Trait
// ==========================================
pub trait ChartCache: Send + Sync {
    /// 命中则返回缓存的命盘, 否则调用 compute 计算并写入
    fn get_or_compute(
        &self,
        key: &ChartFingerprint,
        compute: &dyn Fn() -> ZiweiResult<CompleteChart>,
    ) -> ZiweiResult<Arc<CompleteChart>>;

    fn clear(&self);

    fn stats(&self) -> CacheStats;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_recover<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        // 计算发生在写入之前, 中途 panic 不会留下半写状态
        warn!(lock = what, "锁已中毒, 继续使用内部状态");
        e.into_inner()
    })
}

// ==========================================
// TtlLruCache - TTL + 容量上限缓存
// ==========================================

/// 同一指纹的在途计算槽
type Slot = Arc<Mutex<Option<Arc<CompleteChart>>>>;

struct CacheEntry {
    chart: Arc<CompleteChart>,
    inserted_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<ChartFingerprint, CacheEntry>,
    order: VecDeque<ChartFingerprint>, // 队首 = 最久未用
    in_flight: HashMap<ChartFingerprint, Slot>,
    stats: CacheStats,
}

impl CacheState {
    fn lookup(&mut self, key: &ChartFingerprint, ttl: Duration) -> Option<Arc<CompleteChart>> {
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => entry.inserted_at.elapsed() >= ttl,
        };

        if expired {
            self.entries.remove(key);
            self.order.retain(|k| k != key);
            self.stats.expirations += 1;
            return None;
        }

        self.order.retain(|k| k != key);
        self.order.push_back(key.clone());
        self.entries.get(key).map(|entry| entry.chart.clone())
    }

    fn purge_expired(&mut self, ttl: Duration) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        let purged = before - self.entries.len();
        if purged > 0 {
            let entries = &self.entries;
            self.order.retain(|k| entries.contains_key(k));
            self.stats.expirations += purged as u64;
        }
    }

    fn insert(&mut self, key: ChartFingerprint, chart: Arc<CompleteChart>, ttl: Duration, max_entries: usize) {
        self.purge_expired(ttl);

        self.order.retain(|k| k != &key);
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                chart,
                inserted_at: Instant::now(),
            },
        );

        while self.entries.len() > max_entries {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    self.stats.evictions += 1;
                }
                None => break,
            }
        }
    }

    fn release_slot(&mut self, key: &ChartFingerprint, slot: &Slot) {
        let owned = self
            .in_flight
            .get(key)
            .map_or(false, |current| Arc::ptr_eq(current, slot));
        if owned {
            self.in_flight.remove(key);
        }
    }
}

pub struct TtlLruCache {
    ttl: Duration,
    max_entries: usize,
    state: Mutex<CacheState>,
}

impl TtlLruCache {
    /// # 参数
    /// - ttl: 条目存活时长
    /// - max_entries: 容量上限 (>= 1)
    pub fn new(ttl: Duration, max_entries: usize) -> ZiweiResult<Self> {
        if max_entries == 0 {
            return Err(ZiweiError::invalid_argument(
                "max_entries",
                "缓存容量上限必须 >= 1",
            ));
        }
        Ok(Self {
            ttl,
            max_entries,
            state: Mutex::new(CacheState::default()),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        lock_recover(&self.state, "chart_cache")
    }
}

impl ChartCache for TtlLruCache {
    fn get_or_compute(
        &self,
        key: &ChartFingerprint,
        compute: &dyn Fn() -> ZiweiResult<CompleteChart>,
    ) -> ZiweiResult<Arc<CompleteChart>> {
        // ===== 步骤 1: 查缓存, 未命中则登记在途槽 =====
        let slot = {
            let mut state = self.state();
            if let Some(chart) = state.lookup(key, self.ttl) {
                state.stats.hits += 1;
                debug!(fingerprint = %key, "命盘缓存命中");
                return Ok(chart);
            }
            state.stats.misses += 1;
            state
                .in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(None)))
                .clone()
        };

        // ===== 步骤 2: 持槽计算; 同指纹的其他请求在此等待 =====
        let mut pending = lock_recover(&slot, "chart_cache_slot");
        if let Some(chart) = pending.as_ref() {
            debug!(fingerprint = %key, "复用在途计算结果");
            return Ok(chart.clone());
        }

        debug!(fingerprint = %key, "命盘缓存未命中, 开始计算");
        self.state().stats.total_calculations += 1;
        let result = compute();

        // ===== 步骤 3: 写入并释放槽 =====
        let mut state = self.state();
        state.release_slot(key, &slot);
        let chart = Arc::new(result?);
        *pending = Some(chart.clone());
        state.insert(key.clone(), chart.clone(), self.ttl, self.max_entries);
        Ok(chart)
    }

    fn clear(&self) {
        let mut state = self.state();
        state.entries.clear();
        state.order.clear();
        debug!("命盘缓存已清空");
    }

    fn stats(&self) -> CacheStats {
        let state = self.state();
        CacheStats {
            entries: state.entries.len(),
            ..state.stats
        }
    }

    fn len(&self) -> usize {
        self.state().entries.len()
    }
}

// ==========================================
// NoCache - 不缓存
// ==========================================
#[derive(Default)]
pub struct NoCache {
    misses: AtomicU64,
    calculations: AtomicU64,
}

impl NoCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartCache for NoCache {
    fn get_or_compute(
        &self,
        _key: &ChartFingerprint,
        compute: &dyn Fn() -> ZiweiResult<CompleteChart>,
    ) -> ZiweiResult<Arc<CompleteChart>> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.calculations.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::new(compute()?))
    }

    fn clear(&self) {}

    fn stats(&self) -> CacheStats {
        CacheStats {
            misses: self.misses.load(Ordering::Relaxed),
            total_calculations: self.calculations.load(Ordering::Relaxed),
            ..CacheStats::default()
        }
    }

    fn len(&self) -> usize {
        0
    }
}
