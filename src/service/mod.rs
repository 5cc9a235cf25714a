// ==========================================
// 紫微斗数排盘引擎 - 服务层
// ==========================================
// 职责: 指纹 + 缓存 + 排盘门面
// 红线: 唯一共享可变资源是缓存, 由缓存自身加锁
// ==========================================

pub mod cache;
pub mod facade;
pub mod fingerprint;

// 重导出
pub use cache::{CacheStats, ChartCache, NoCache, TtlLruCache};
pub use facade::{ChartService, DIRECT_CALENDAR_SOURCE};
pub use fingerprint::ChartFingerprint;
