// ==========================================
// 测试用历法协作方
// ==========================================
// 代替外部农历库; 对照表取自公开农历
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;
use ziwei_chart::calendar::TableCalendar;
use ziwei_chart::CalendarProvider;

pub const FIXTURE_CALENDAR_NAME: &str = "fixture-lunar-table";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture date")
}

/// 公历 ↔ 农历对照
///
/// - 1988-06-20: 戊辰年五月初七
/// - 1985-02-20: 乙丑年正月初一
/// - 1990-01-27: 庚午年正月初一
/// - 2000-02-05: 庚辰年正月初一
/// - 2021-02-12: 辛丑年正月初一
/// - 2023-03-22: 癸卯年闰二月初一
/// - 2024-02-10: 甲辰年正月初一
pub fn fixture_table() -> TableCalendar {
    TableCalendar::new(FIXTURE_CALENDAR_NAME)
        .with_entry(date(1988, 6, 20), 1988, 5, 7, false)
        .with_entry(date(1985, 2, 20), 1985, 1, 1, false)
        .with_entry(date(1990, 1, 27), 1990, 1, 1, false)
        .with_entry(date(2000, 2, 5), 2000, 1, 1, false)
        .with_entry(date(2021, 2, 12), 2021, 1, 1, false)
        .with_entry(date(2023, 3, 22), 2023, 2, 1, true)
        .with_entry(date(2024, 2, 10), 2024, 1, 1, false)
}

pub fn fixture_calendar() -> Arc<dyn CalendarProvider> {
    Arc::new(fixture_table())
}
