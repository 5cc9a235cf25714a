// ==========================================
// 紫微斗数排盘引擎 - 安星引擎
// ==========================================
// 职责: 十四主星 + 辅星 + 煞星 + 桃花星定位
// 输入: 五行局 + 农历日 / 月 / 时辰 / 年干 / 年支
// 输出: 星曜 → 地支索引集合
// ==========================================
// 红线: 偏移量全部固化在查表中,不在运行时推导
// 红线: 入参越界即报错,不替换默认宫位
// ==========================================

mod core;
mod placement;
mod tables;


pub use core::StarPlacementEngine;
pub use placement::StarPlacement;
pub use tables::tianfu_offset;
