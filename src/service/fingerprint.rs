// ==========================================
// 紫微斗数排盘引擎 - 命盘指纹
// ==========================================
// 指纹覆盖所有影响输出的字段: 出生时刻 / 公农历 / 闰月 / 性别 / 排盘选项
// 键格式: y-m-d-h-mi|solar|leap0|MALE|p1s1n12a120[|direct]
// ==========================================

use crate::domain::chart::{BirthInput, LunarDate};
use crate::domain::types::Gender;
use crate::engine::ChartOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartFingerprint {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub is_lunar: bool,
    pub is_leap_month: bool,
    pub gender: Gender,
    pub options: ChartOptions,
    pub direct: bool, // 直接由农历日期排盘, 不经历法换算
}

impl ChartFingerprint {
    pub fn from_input(input: &BirthInput, options: &ChartOptions) -> Self {
        Self {
            year: input.year,
            month: input.month,
            day: input.day,
            hour: input.hour,
            minute: input.minute,
            is_lunar: input.is_lunar,
            is_leap_month: input.is_leap_month,
            gender: input.gender,
            options: *options,
            direct: false,
        }
    }

    pub fn from_lunar(lunar: &LunarDate, gender: Gender, options: &ChartOptions) -> Self {
        Self {
            year: lunar.year,
            month: lunar.month as u32,
            day: lunar.day as u32,
            hour: lunar.hour as u32,
            minute: 0,
            is_lunar: true,
            is_leap_month: lunar.is_leap_month,
            gender,
            options: *options,
            direct: true,
        }
    }

    /// 稳定的字符串键
    pub fn as_key(&self) -> String {
        let mut key = format!(
            "{}-{}-{}-{}-{}|{}|leap{}|{}|{}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            if self.is_lunar { "lunar" } else { "solar" },
            self.is_leap_month as u8,
            self.gender.as_str(),
            self.options.as_key()
        );
        if self.direct {
            key.push_str("|direct");
        }
        key
    }
}

impl fmt::Display for ChartFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let input = BirthInput::solar(1988, 6, 20, 23, Gender::Male);
        let fp = ChartFingerprint::from_input(&input, &ChartOptions::default());
        assert_eq!(fp.as_key(), "1988-6-20-23-0|solar|leap0|MALE|p1s1n12a120");
    }

    #[test]
    fn test_every_field_changes_key() {
        let options = ChartOptions::default();
        let base = BirthInput::solar(1988, 6, 20, 23, Gender::Male);
        let key = ChartFingerprint::from_input(&base, &options).as_key();

        let variants = [
            BirthInput::solar(1988, 6, 20, 22, Gender::Male),
            BirthInput::solar(1988, 6, 20, 23, Gender::Female),
            BirthInput::lunar(1988, 6, 20, 23, Gender::Male),
            base.clone().with_minute(30),
        ];
        for variant in &variants {
            assert_ne!(ChartFingerprint::from_input(variant, &options).as_key(), key);
        }

        let other_options = ChartOptions {
            include_self_transformations: false,
            ..options
        };
        assert_ne!(
            ChartFingerprint::from_input(&base, &other_options).as_key(),
            key
        );
    }
}
