// ==========================================
// 查表式历法协作方
// ==========================================
// 用途: 以预先导出的 公历日期 ↔ 农历日期 对照表驱动排盘
// 四柱: 年柱按农历年, 月柱按农历月 (五虎遁), 日柱按儒略日, 时柱按五鼠遁
// ==========================================

use super::provider::{CalendarProvider, CalendarReading};
use super::sexagenary::{day_pillar, hour_branch_index, hour_pillar, month_pillar, year_pillar};
use crate::domain::chart::EightCharacters;
use crate::error::{ZiweiError, ZiweiResult};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashMap;

/// 对照表中的农历日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LunarKey {
    year: i32,
    month: u8,
    day: u8,
    is_leap_month: bool,
}

/// 查表式历法
#[derive(Debug, Clone, Default)]
pub struct TableCalendar {
    name: String,
    solar_to_lunar: HashMap<NaiveDate, LunarKey>,
    lunar_to_solar: HashMap<LunarKey, NaiveDate>,
}

impl TableCalendar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 登记一条对照
    pub fn with_entry(
        mut self,
        solar: NaiveDate,
        lunar_year: i32,
        lunar_month: u8,
        lunar_day: u8,
        is_leap_month: bool,
    ) -> Self {
        let key = LunarKey {
            year: lunar_year,
            month: lunar_month,
            day: lunar_day,
            is_leap_month,
        };
        self.solar_to_lunar.insert(solar, key);
        self.lunar_to_solar.insert(key, solar);
        self
    }

    pub fn len(&self) -> usize {
        self.solar_to_lunar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solar_to_lunar.is_empty()
    }
}

impl CalendarProvider for TableCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn solar_to_lunar(&self, datetime: NaiveDateTime) -> ZiweiResult<CalendarReading> {
        let date = datetime.date();
        let key = self.solar_to_lunar.get(&date).copied().ok_or_else(|| {
            ZiweiError::Calendar(format!("对照表中没有公历日期 {}", date))
        })?;

        let year = year_pillar(key.year);
        let day = day_pillar(date);
        let hour_branch = hour_branch_index(datetime.hour())?;

        Ok(CalendarReading {
            lunar_year: key.year,
            lunar_month: key.month,
            lunar_day: key.day,
            is_leap_month: key.is_leap_month,
            pillars: EightCharacters {
                year,
                month: month_pillar(year.stem, key.month)?,
                day,
                hour: hour_pillar(day.stem, hour_branch)?,
            },
        })
    }

    fn lunar_to_solar(
        &self,
        year: i32,
        month: u8,
        day: u8,
        is_leap_month: bool,
    ) -> ZiweiResult<NaiveDate> {
        let key = LunarKey {
            year,
            month,
            day,
            is_leap_month,
        };
        self.lunar_to_solar.get(&key).copied().ok_or_else(|| {
            ZiweiError::Calendar(format!(
                "对照表中没有农历日期 {}年{}{}月{}日",
                year,
                if is_leap_month { "闰" } else { "" },
                month,
                day
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> TableCalendar {
        TableCalendar::new("fixture").with_entry(
            NaiveDate::from_ymd_opt(1988, 6, 20).unwrap(),
            1988,
            5,
            7,
            false,
        )
    }

    #[test]
    fn test_solar_to_lunar_reading() {
        let dt = NaiveDate::from_ymd_opt(1988, 6, 20)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        let reading = calendar().solar_to_lunar(dt).unwrap();
        assert_eq!(reading.lunar_month, 5);
        assert_eq!(reading.lunar_day, 7);
        assert_eq!(reading.pillars.to_string(), "戊辰戊午丙午戊子");
    }

    #[test]
    fn test_missing_entries_are_calendar_errors() {
        let dt = NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            calendar().solar_to_lunar(dt),
            Err(ZiweiError::Calendar(_))
        ));
        assert!(calendar().lunar_to_solar(1988, 5, 7, true).is_err());
        assert_eq!(
            calendar().lunar_to_solar(1988, 5, 7, false).unwrap(),
            NaiveDate::from_ymd_opt(1988, 6, 20).unwrap()
        );
    }
}
