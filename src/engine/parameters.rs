// ==========================================
// 紫微斗数排盘引擎 - 排盘参数推导
// ==========================================
// 职责: 出生信息 → 农历日期 + 四柱
// 输入: BirthInput (公历或农历)
// 输出: LunarDate
// 依赖: CalendarProvider (外部农历库)
// ==========================================
// 红线: 不自行推算公历 ↔ 农历, 一律委托历法协作方
// ==========================================

use crate::calendar::{hour_branch_index, CalendarProvider, CalendarReading};
use crate::domain::chart::{BirthInput, LunarDate};
use crate::error::{ZiweiError, ZiweiResult};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// ParameterDeriver - 参数推导器
// ==========================================
pub struct ParameterDeriver {
    calendar: Arc<dyn CalendarProvider>,
}

impl ParameterDeriver {
    /// # 参数
    /// - calendar: 历法协作方
    pub fn new(calendar: Arc<dyn CalendarProvider>) -> Self {
        Self { calendar }
    }

    pub fn calendar_name(&self) -> &str {
        self.calendar.name()
    }

    /// 推导农历日期与四柱
    ///
    /// - 公历输入: 直接换算
    /// - 农历输入: 先换回公历再换算, 校验往返一致
    #[instrument(skip(self, input), fields(year = input.year, is_lunar = input.is_lunar))]
    pub fn derive(&self, input: &BirthInput) -> ZiweiResult<LunarDate> {
        input.validate()?;

        let reading = if input.is_lunar {
            self.derive_from_lunar(input)?
        } else {
            let date = NaiveDate::from_ymd_opt(input.year, input.month, input.day).ok_or_else(
                || {
                    ZiweiError::invalid_argument(
                        "date",
                        format!("无效的公历日期: {}-{}-{}", input.year, input.month, input.day),
                    )
                },
            )?;
            self.calendar.solar_to_lunar(at_time(date, input)?)?
        };

        let lunar = self.to_lunar_date(&reading, input)?;
        debug!(
            eight_characters = %lunar.eight_characters(),
            month = lunar.month,
            day = lunar.day,
            "排盘参数推导完成"
        );
        Ok(lunar)
    }

    fn derive_from_lunar(&self, input: &BirthInput) -> ZiweiResult<CalendarReading> {
        let month = input.month as u8;
        let day = input.day as u8;
        let solar = self
            .calendar
            .lunar_to_solar(input.year, month, day, input.is_leap_month)?;
        let reading = self.calendar.solar_to_lunar(at_time(solar, input)?)?;

        if reading.lunar_year != input.year
            || reading.lunar_month != month
            || reading.lunar_day != day
            || reading.is_leap_month != input.is_leap_month
        {
            return Err(ZiweiError::Calendar(format!(
                "农历往返换算不一致: 输入 {}-{}-{} 闰={}, 换回 {}-{}-{} 闰={}",
                input.year,
                month,
                day,
                input.is_leap_month,
                reading.lunar_year,
                reading.lunar_month,
                reading.lunar_day,
                reading.is_leap_month
            )));
        }
        Ok(reading)
    }

    /// 校验历法读数并组装 LunarDate
    fn to_lunar_date(&self, reading: &CalendarReading, input: &BirthInput) -> ZiweiResult<LunarDate> {
        let expected_hour = hour_branch_index(input.hour)?;
        if reading.pillars.hour.branch.index() != expected_hour {
            return Err(ZiweiError::Calendar(format!(
                "时柱地支 {} 与钟点 {} 不符",
                reading.pillars.hour.branch, input.hour
            )));
        }

        LunarDate::new(
            reading.lunar_year,
            reading.lunar_month,
            reading.lunar_day,
            input.hour as u8,
            reading.is_leap_month,
            reading.pillars,
        )
        .map_err(|e| ZiweiError::Calendar(format!("历法读数越界: {}", e)))
    }
}

fn at_time(date: NaiveDate, input: &BirthInput) -> ZiweiResult<NaiveDateTime> {
    date.and_hms_opt(input.hour, input.minute, 0).ok_or_else(|| {
        ZiweiError::invalid_argument(
            "time",
            format!("无效的时刻: {:02}:{:02}", input.hour, input.minute),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::TableCalendar;
    use crate::domain::types::Gender;

    fn deriver() -> ParameterDeriver {
        let calendar = TableCalendar::new("fixture")
            .with_entry(NaiveDate::from_ymd_opt(1988, 6, 20).unwrap(), 1988, 5, 7, false);
        ParameterDeriver::new(Arc::new(calendar))
    }

    #[test]
    fn test_derive_solar() {
        let input = BirthInput::solar(1988, 6, 20, 23, Gender::Male);
        let lunar = deriver().derive(&input).unwrap();
        assert_eq!(lunar.eight_characters().to_string(), "戊辰戊午丙午戊子");
        assert_eq!(lunar.month, 5);
        assert_eq!(lunar.day, 7);
        assert_eq!(lunar.hour_branch_index(), 0);
        assert!(!lunar.is_leap_month);
    }

    #[test]
    fn test_derive_lunar_round_trip() {
        let input = BirthInput::lunar(1988, 5, 7, 23, Gender::Male);
        let lunar = deriver().derive(&input).unwrap();
        assert_eq!(lunar.eight_characters().to_string(), "戊辰戊午丙午戊子");

        let leap = BirthInput::lunar(1988, 5, 7, 23, Gender::Male).with_leap_month(true);
        assert!(matches!(deriver().derive(&leap), Err(ZiweiError::Calendar(_))));
    }

    #[test]
    fn test_derive_rejects_bad_input() {
        let bad_date = BirthInput::solar(1988, 2, 30, 10, Gender::Female);
        assert!(matches!(
            deriver().derive(&bad_date),
            Err(ZiweiError::InvalidArgument { .. })
        ));
        let bad_hour = BirthInput::solar(1988, 6, 20, 24, Gender::Female);
        assert!(deriver().derive(&bad_hour).is_err());
        let unknown = BirthInput::solar(1990, 1, 1, 10, Gender::Female);
        assert!(matches!(deriver().derive(&unknown), Err(ZiweiError::Calendar(_))));
    }
}
