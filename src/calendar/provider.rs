// ==========================================
// 历法协作方 trait
// ==========================================
// 职责: 依赖倒置, 核心只依赖 trait, 由调用方注入具体农历库
// ==========================================

use crate::domain::chart::EightCharacters;
use crate::error::ZiweiResult;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 一次历法换算的读数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarReading {
    pub lunar_year: i32,
    pub lunar_month: u8,
    pub lunar_day: u8,
    pub is_leap_month: bool,
    pub pillars: EightCharacters,
}

/// 外部农历库接入点
///
/// 实现方负责:
/// - 公历时刻 → 农历年月日 + 闰月标记 + 四柱
/// - 农历年月日 → 公历日期
pub trait CalendarProvider: Send + Sync {
    /// 历法来源名称 (写入命盘元数据)
    fn name(&self) -> &str;

    /// 公历时刻换算农历与四柱
    fn solar_to_lunar(&self, datetime: NaiveDateTime) -> ZiweiResult<CalendarReading>;

    /// 农历日期换算公历日期
    fn lunar_to_solar(
        &self,
        year: i32,
        month: u8,
        day: u8,
        is_leap_month: bool,
    ) -> ZiweiResult<NaiveDate>;
}

impl<T: CalendarProvider + ?Sized> CalendarProvider for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solar_to_lunar(&self, datetime: NaiveDateTime) -> ZiweiResult<CalendarReading> {
        (**self).solar_to_lunar(datetime)
    }

    fn lunar_to_solar(
        &self,
        year: i32,
        month: u8,
        day: u8,
        is_leap_month: bool,
    ) -> ZiweiResult<NaiveDate> {
        (**self).lunar_to_solar(year, month, day, is_leap_month)
    }
}
