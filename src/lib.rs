// ==========================================
// 紫微斗数排盘引擎 - 核心库
// ==========================================
// 职责: 出生时刻 → 完整命盘 (十二宫 / 星曜 / 亮度 / 四化 / 运限)
// 边界: 公历 ↔ 农历换算由外部历法库经 CalendarProvider 注入
// 边界: 不含渲染、解盘文案、持久化
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 历法协作层 - 外部农历库接入点
pub mod calendar;

// 引擎层 - 排盘规则
pub mod engine;

// 服务层 - 缓存与门面
pub mod service;

// 配置层
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    Branch, Brightness, Bureau, Element, Gender, PalaceName, SihuaSource, SihuaType,
    StarCategory, Stem,
};

// 领域实体
pub use domain::{
    BirthInput, ChartMetadata, CompleteChart, EightCharacters, FleetingMonth, FleetingYear,
    LaiyinPalace, LunarDate, MajorPeriod, MinorLimit, PalaceData, PalacePosition, PeriodSeed,
    Pillar, SihuaTransformation, Star, StarName,
};

// 历法
pub use calendar::{CalendarProvider, CalendarReading, TableCalendar};

// 引擎
pub use engine::{
    BrightnessEvaluator, BureauClassifier, ChartAssembler, ChartOptions, MasterResolver,
    PalacePositioner, ParameterDeriver, PeriodEngine, SihuaEngine, StarPlacementEngine,
};

// 服务
pub use service::{CacheStats, ChartCache, ChartFingerprint, ChartService, NoCache, TtlLruCache};

// 配置 / 错误
pub use config::EngineConfig;
pub use error::{ZiweiError, ZiweiResult};

// ==========================================
// 常量定义
// ==========================================

// 引擎版本 (写入命盘元数据)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 引擎名称
pub const ENGINE_NAME: &str = "紫微斗数排盘引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
