// ==========================================
// 紫微斗数排盘引擎 - 领域模型层
// ==========================================
// 职责: 定义干支字母表、星曜、命盘与运限实体
// 红线: 不含排盘规则,不含缓存逻辑
// ==========================================

pub mod chart;
pub mod period;
pub mod star;
pub mod types;

// 重导出核心类型
pub use chart::{
    BirthInput, ChartMetadata, CompleteChart, EightCharacters, LaiyinPalace, LunarDate,
    PalaceData, PalacePosition, Pillar, SihuaTransformation, Star,
};
pub use period::{FleetingMonth, FleetingYear, MajorPeriod, MinorLimit, PeriodSeed};
pub use star::StarName;
pub use types::{
    Branch, Brightness, Bureau, Element, Gender, PalaceName, SihuaSource, SihuaType,
    StarCategory, Stem,
};
