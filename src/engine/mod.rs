// ==========================================
// 紫微斗数排盘引擎 - 引擎层
// ==========================================
// 流水线 (叶子在前):
//   参数推导 → 宫位 → 五行局 → 安星 → 亮度 → 四化 → 运限 → 组装
// ==========================================
// 职责: 纯计算, 无共享可变状态, 可多线程并发调用
// 红线: 查表缺键一律报错, 不以默认宫位/默认亮度兜底
// ==========================================

pub mod assembler;
pub mod brightness;
pub mod bureau;
pub mod masters;
pub mod palace;
pub mod parameters;
pub mod period;
pub mod relations;
pub mod sihua;
pub mod star_placement;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心引擎
pub use assembler::{ChartAssembler, ChartContext, ChartOptions};
pub use brightness::BrightnessEvaluator;
pub use bureau::BureauClassifier;
pub use masters::MasterResolver;
pub use palace::{PalaceLocation, PalacePositioner};
pub use parameters::ParameterDeriver;
pub use period::PeriodEngine;
pub use relations::{adjacent, opposite, sanfang_sizheng, square, trinity};
pub use sihua::SihuaEngine;
pub use star_placement::{StarPlacement, StarPlacementEngine};
