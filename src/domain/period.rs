// ==========================================
// 紫微斗数排盘引擎 - 运限实体
// ==========================================
// 大运 (十年) / 流年 / 流月 / 小限
// ==========================================

use crate::domain::types::{Branch, PalaceName, Stem};
use serde::{Deserialize, Serialize};

/// 大运起运参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodSeed {
    pub forward: bool, // 顺行: 阳男阴女
    pub start_age: u8, // 起运岁数 = 局数
}

/// 大运
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorPeriod {
    pub index: u8, // 第几运, 从 1 开始
    pub start_age: u16,
    pub end_age: u16,
    pub start_year: i32,
    pub end_year: i32,
    pub palace_index: u8,
    pub branch: Branch,
    pub stem: Stem,
    pub palace_name: PalaceName,
}

impl MajorPeriod {
    pub fn contains_age(&self, age: u16) -> bool {
        (self.start_age..=self.end_age).contains(&age)
    }
}

/// 流年
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetingYear {
    pub year: i32,
    pub age: i32, // 虚岁
    pub stem: Stem,
    pub branch: Branch,
    pub palace_index: u8,
    pub palace_name: PalaceName,
}

/// 流月
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetingMonth {
    pub year: i32,
    pub month: u8,
    pub stem: Stem,
    pub branch: Branch,
    pub palace_index: u8,
    pub palace_name: PalaceName,
}

/// 小限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorLimit {
    pub age: u16,
    pub palace_index: u8,
    pub branch: Branch,
}
