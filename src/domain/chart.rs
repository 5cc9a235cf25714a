// ==========================================
// 紫微斗数排盘引擎 - 命盘实体
// ==========================================
// 红线: 十二宫一律按地支索引存放,宫名读取时由命宫位置推算
// 红线: 命盘构造完成后只读,不原地修改
// ==========================================

use crate::domain::period::{MajorPeriod, PeriodSeed};
use crate::domain::star::StarName;
use crate::domain::types::{
    Branch, Brightness, Bureau, Element, Gender, PalaceName, SihuaSource, SihuaType, StarCategory,
    Stem,
};
use crate::engine::sihua::SihuaEngine;
use crate::error::{check_branch_index, check_lunar_day, check_month, ZiweiError, ZiweiResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 出生信息 (Birth Input)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,   // 钟点 0..=23
    pub minute: u32, // 0..=59
    pub gender: Gender,
    pub is_lunar: bool,
    pub is_leap_month: bool,
    pub timezone: Option<String>,
}

impl BirthInput {
    /// 公历出生信息
    pub fn solar(year: i32, month: u32, day: u32, hour: u32, gender: Gender) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute: 0,
            gender,
            is_lunar: false,
            is_leap_month: false,
            timezone: None,
        }
    }

    /// 农历出生信息
    pub fn lunar(year: i32, month: u32, day: u32, hour: u32, gender: Gender) -> Self {
        Self {
            is_lunar: true,
            ..Self::solar(year, month, day, hour, gender)
        }
    }

    pub fn with_minute(mut self, minute: u32) -> Self {
        self.minute = minute;
        self
    }

    pub fn with_leap_month(mut self, is_leap_month: bool) -> Self {
        self.is_leap_month = is_leap_month;
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// 钟点与分钟的基本定义域校验（日期合法性由历法层判定）
    pub fn validate(&self) -> ZiweiResult<()> {
        if self.hour > 23 {
            return Err(ZiweiError::invalid_argument(
                "hour",
                format!("钟点必须在 0..=23, 实际为 {}", self.hour),
            ));
        }
        if self.minute > 59 {
            return Err(ZiweiError::invalid_argument(
                "minute",
                format!("分钟必须在 0..=59, 实际为 {}", self.minute),
            ));
        }
        if !(1..=12).contains(&self.month) {
            return Err(ZiweiError::invalid_argument(
                "month",
                format!("月份必须在 1..=12, 实际为 {}", self.month),
            ));
        }
        let max_day = if self.is_lunar { 30 } else { 31 };
        if !(1..=max_day).contains(&self.day) {
            return Err(ZiweiError::invalid_argument(
                "day",
                format!("日期必须在 1..={}, 实际为 {}", max_day, self.day),
            ));
        }
        if self.is_leap_month && !self.is_lunar {
            return Err(ZiweiError::invalid_argument(
                "is_leap_month",
                "公历输入不能标记闰月",
            ));
        }
        Ok(())
    }
}

// ==========================================
// 干支柱 (Pillar)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// 六十甲子序号 (甲子=0)
    pub fn from_sexagenary(index: i32) -> Self {
        Self {
            stem: Stem::from_index(index),
            branch: Branch::from_index(index),
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// 八字四柱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EightCharacters {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl fmt::Display for EightCharacters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.year, self.month, self.day, self.hour)
    }
}

// ==========================================
// 农历日期 (Lunar Date)
// ==========================================
// 下游各引擎的唯一输入（性别仅大运引擎需要）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u8, // 1..=12
    pub day: u8,   // 1..=30
    pub hour: u8,  // 钟点 0..=23
    pub is_leap_month: bool,
    pub year_stem: Stem,
    pub year_branch: Branch,
    pub month_stem: Stem,
    pub month_branch: Branch,
    pub day_stem: Stem,
    pub day_branch: Branch,
    pub hour_stem: Stem,
    pub hour_branch: Branch,
}

impl LunarDate {
    /// 由农历年月日 + 钟点 + 四柱构造
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        is_leap_month: bool,
        pillars: EightCharacters,
    ) -> ZiweiResult<Self> {
        let date = Self {
            year,
            month,
            day,
            hour,
            is_leap_month,
            year_stem: pillars.year.stem,
            year_branch: pillars.year.branch,
            month_stem: pillars.month.stem,
            month_branch: pillars.month.branch,
            day_stem: pillars.day.stem,
            day_branch: pillars.day.branch,
            hour_stem: pillars.hour.stem,
            hour_branch: pillars.hour.branch,
        };
        date.validate()?;
        Ok(date)
    }

    pub fn validate(&self) -> ZiweiResult<()> {
        check_month(self.month)?;
        check_lunar_day(self.day)?;
        if self.hour > 23 {
            return Err(ZiweiError::invalid_argument(
                "hour",
                format!("钟点必须在 0..=23, 实际为 {}", self.hour),
            ));
        }
        check_branch_index("hour_branch", self.hour_branch.index())?;
        Ok(())
    }

    /// 时辰索引 (子=0)
    pub fn hour_branch_index(&self) -> u8 {
        self.hour_branch.index()
    }

    pub fn eight_characters(&self) -> EightCharacters {
        EightCharacters {
            year: Pillar::new(self.year_stem, self.year_branch),
            month: Pillar::new(self.month_stem, self.month_branch),
            day: Pillar::new(self.day_stem, self.day_branch),
            hour: Pillar::new(self.hour_stem, self.hour_branch),
        }
    }
}

// ==========================================
// 宫位 (Palace Position)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PalacePosition {
    pub index: u8, // 地支索引,非宫名序号
    pub branch: Branch,
    pub stem: Stem,
    pub element: Element,
}

impl PalacePosition {
    pub fn new(index: u8, stem: Stem) -> Self {
        let branch = Branch::from_index(index as i32);
        Self {
            index: branch.index(),
            branch,
            stem,
            element: branch.element(),
        }
    }
}

// ==========================================
// 四化 (Sihua Transformation)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SihuaTransformation {
    pub star: StarName,
    #[serde(rename = "type")]
    pub sihua_type: SihuaType,
    pub source: SihuaSource,
    pub source_palace_index: Option<u8>,
    pub target_palace_index: Option<u8>,
    pub code: String,
}

// ==========================================
// 星曜 (Star)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    pub name: StarName,
    pub category: StarCategory,
    pub is_main_star: bool,
    pub brightness: Brightness,
    pub sihua_transformations: Vec<SihuaTransformation>,
}

impl Star {
    pub fn new(name: StarName, brightness: Brightness) -> Self {
        Self {
            name,
            category: name.category(),
            is_main_star: name.is_main(),
            brightness,
            sihua_transformations: Vec::new(),
        }
    }

    /// 是否带某一来源的四化
    pub fn has_source(&self, source: SihuaSource) -> bool {
        self.sihua_transformations.iter().any(|t| t.source == source)
    }
}

// ==========================================
// 宫位数据 (Palace Data)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalaceData {
    pub position: PalacePosition,
    pub stars: Vec<Star>,
    pub sihua: Vec<SihuaTransformation>,
    pub self_transformations: Vec<SihuaTransformation>,
    pub is_empty: bool, // 无主星即空宫
}

impl PalaceData {
    pub fn index(&self) -> u8 {
        self.position.index
    }

    /// 宫名（由命宫位置推算）
    pub fn name(&self, life_palace_index: u8) -> PalaceName {
        PalaceName::at(self.position.index, life_palace_index)
    }

    pub fn main_stars(&self) -> impl Iterator<Item = &Star> {
        self.stars.iter().filter(|s| s.is_main_star)
    }

    pub fn has_star(&self, name: StarName) -> bool {
        self.stars.iter().any(|s| s.name == name)
    }
}

// ==========================================
// 来因宫 (Laiyin Palace)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaiyinPalace {
    pub index: u8,
    pub branch: Branch,
    pub name: PalaceName, // 相对命宫的宫名
}

// ==========================================
// 命盘元数据 (Chart Metadata)
// ==========================================
// 不含时间戳与随机 ID,同一输入重复计算结果深度相等
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub fingerprint: String,
    pub engine_version: String,
    pub calendar_source: String,
    pub gender: Gender,
    pub birth_year: i32, // 农历年
    pub eight_characters: String,
}

// ==========================================
// 完整命盘 (Complete Chart)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteChart {
    pub lunar_date: LunarDate,
    pub palaces: Vec<PalaceData>, // 长度 12, 下标 = 地支索引
    pub life_palace_index: u8,
    pub body_palace_index: u8,
    pub bureau: Bureau,
    pub life_master: StarName,
    pub body_master: StarName,
    pub laiyin_palace: LaiyinPalace,
    pub period_seed: PeriodSeed,
    pub major_periods: Vec<MajorPeriod>,
    pub metadata: ChartMetadata,
}

impl CompleteChart {
    /// 按地支索引取宫
    pub fn palace(&self, index: u8) -> ZiweiResult<&PalaceData> {
        check_branch_index("palace_index", index)?;
        self.palaces.get(index as usize).ok_or_else(|| {
            ZiweiError::InvalidState(format!("命盘缺少宫位: index={}", index))
        })
    }

    /// 按宫名取宫
    pub fn palace_by_name(&self, name: PalaceName) -> ZiweiResult<&PalaceData> {
        self.palace(name.branch_index(self.life_palace_index))
    }

    pub fn palace_name_of(&self, index: u8) -> PalaceName {
        PalaceName::at(index, self.life_palace_index)
    }

    pub fn life_palace(&self) -> ZiweiResult<&PalaceData> {
        self.palace(self.life_palace_index)
    }

    pub fn body_palace(&self) -> ZiweiResult<&PalaceData> {
        self.palace(self.body_palace_index)
    }

    /// 星曜所在地支索引
    pub fn star_position(&self, star: StarName) -> Option<u8> {
        self.palaces
            .iter()
            .find(|p| p.has_star(star))
            .map(|p| p.position.index)
    }

    /// 星曜实体
    pub fn star(&self, name: StarName) -> Option<&Star> {
        self.palaces
            .iter()
            .flat_map(|p| p.stars.iter())
            .find(|s| s.name == name)
    }

    /// 宫干表 (下标 = 地支索引)
    pub fn palace_stems(&self) -> [Stem; 12] {
        let mut stems = [Stem::Jia; 12];
        for palace in &self.palaces {
            stems[palace.position.index as usize] = palace.position.stem;
        }
        stems
    }

    pub fn eight_characters(&self) -> EightCharacters {
        self.lunar_date.eight_characters()
    }

    /// 自某宫飞出的四化 (按需查询, 不随命盘存放)
    pub fn flying_transformations(&self, source_index: u8) -> ZiweiResult<Vec<SihuaTransformation>> {
        SihuaEngine::new().flying_from_chart(self, source_index)
    }
}
