// ==========================================
// 紫微斗数排盘引擎 - 历法协作层
// ==========================================
// 职责: 定义外部农历库的接入 trait, 提供干支换算辅助
// 说明: 公历 ↔ 农历换算由外部历法库实现, 本层不自行推算
// ==========================================

pub mod provider;
pub mod sexagenary;
pub mod table;

// 重导出
pub use provider::{CalendarProvider, CalendarReading};
pub use sexagenary::{day_pillar, hour_branch_index, hour_pillar, month_pillar, year_pillar};
pub use table::TableCalendar;
