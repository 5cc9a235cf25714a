// ==========================================
// 紫微斗数排盘引擎 - 运限引擎
// ==========================================
// 职责: 大运 (十年) / 流年 / 流月 / 小限 / 斗君
// 输入: 五行局 + 年干阴阳 + 性别 + 年支 + 命宫
// 输出: MajorPeriod / FleetingYear / FleetingMonth / MinorLimit
// ==========================================
// 红线: 大运方向 = 阳男阴女顺行, 其余逆行
// 红线: 小限方向只看性别 (男顺女逆), 与年干阴阳无关
// 红线: 纯函数, 无隐藏状态; 岁数越界即 InvalidArgument
// ==========================================

mod core;


pub use core::{PeriodEngine, DEFAULT_AGE_CEILING, MAX_AGE_CEILING};
