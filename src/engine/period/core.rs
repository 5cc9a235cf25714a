use crate::domain::period::{FleetingMonth, FleetingYear, MajorPeriod, MinorLimit, PeriodSeed};
use crate::domain::types::{wrap, Branch, Bureau, Gender, PalaceName, Stem};
use crate::engine::palace::five_tigers_start;
use crate::error::{check_branch_index, check_month, ZiweiError, ZiweiResult};
use tracing::{debug, instrument};

/// 默认岁数上限
pub const DEFAULT_AGE_CEILING: u16 = 120;

/// 可配置岁数上限的最大值
pub const MAX_AGE_CEILING: u16 = 150;

/// 每步大运年数
const PERIOD_SPAN: u16 = 10;

/// 起运岁数表: 局列 → (顺行, 逆行); 两列均等于局数
const START_AGE_TABLE: [(u8, u8); 5] = [(2, 2), (3, 3), (4, 4), (5, 5), (6, 6)];

/// 小限起宫 (按年支三合: 申子辰 / 亥卯未 / 寅午戌 / 巳酉丑)
///
/// 申子辰戌, 亥卯未丑, 寅午戌辰, 巳酉丑未
const MINOR_LIMIT_TRIAD_START: [u8; 4] = [10, 1, 4, 7];

/// 干支纪年偏移: 公元 4 年为甲子
const SEXAGENARY_YEAR_OFFSET: i32 = 4;

// ==========================================
// PeriodEngine - 运限引擎
// ==========================================
pub struct PeriodEngine {
    age_ceiling: u16,
}

impl PeriodEngine {
    pub fn new() -> Self {
        Self {
            age_ceiling: DEFAULT_AGE_CEILING,
        }
    }

    /// 指定岁数上限 (1..=150)
    pub fn with_age_ceiling(age_ceiling: u16) -> ZiweiResult<Self> {
        if age_ceiling == 0 || age_ceiling > MAX_AGE_CEILING {
            return Err(ZiweiError::invalid_argument(
                "age_ceiling",
                format!("岁数上限必须在 1..={}, 实际为 {}", MAX_AGE_CEILING, age_ceiling),
            ));
        }
        Ok(Self { age_ceiling })
    }

    pub fn age_ceiling(&self) -> u16 {
        self.age_ceiling
    }

    fn check_age(&self, age: i64) -> ZiweiResult<u16> {
        if age <= 0 || age > self.age_ceiling as i64 {
            return Err(ZiweiError::invalid_argument(
                "age",
                format!("岁数必须在 1..={}, 实际为 {}", self.age_ceiling, age),
            ));
        }
        Ok(age as u16)
    }

    // ==========================================
    // 大运
    // ==========================================

    /// 大运方向: 阳男阴女顺行
    pub fn is_forward(&self, year_stem: Stem, gender: Gender) -> bool {
        year_stem.is_yang() == (gender == Gender::Male)
    }

    /// 起运岁数
    pub fn start_age(&self, bureau: Bureau, forward: bool) -> ZiweiResult<u8> {
        let (forward_age, reverse_age) = START_AGE_TABLE
            .get(bureau.column())
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("起运表缺少 {}", bureau)))?;
        Ok(if forward { forward_age } else { reverse_age })
    }

    /// 大运起运参数
    pub fn seed(&self, year_stem: Stem, gender: Gender, bureau: Bureau) -> ZiweiResult<PeriodSeed> {
        let forward = self.is_forward(year_stem, gender);
        Ok(PeriodSeed {
            forward,
            start_age: self.start_age(bureau, forward)?,
        })
    }

    /// 大运表
    ///
    /// 第 n 运宫位 = 命宫 ± (n - 1), 每运 10 年
    ///
    /// # 参数
    /// - seed: 起运参数
    /// - life_index: 命宫地支索引
    /// - palace_stems: 十二宫干 (下标 = 地支索引)
    /// - birth_year: 出生农历年
    /// - count: 大运步数 1..=12
    #[instrument(skip(self, palace_stems))]
    pub fn major_periods(
        &self,
        seed: PeriodSeed,
        life_index: u8,
        palace_stems: &[Stem; 12],
        birth_year: i32,
        count: u8,
    ) -> ZiweiResult<Vec<MajorPeriod>> {
        let life_index = check_branch_index("life_index", life_index)?;
        if count == 0 || count > 12 {
            return Err(ZiweiError::invalid_argument(
                "major_period_count",
                format!("大运步数必须在 1..=12, 实际为 {}", count),
            ));
        }

        let step = if seed.forward { 1 } else { -1 };
        let periods = (1..=count)
            .map(|n| {
                let offset = (n as i32 - 1) * step;
                let palace_index = wrap(life_index as i32 + offset, 12) as u8;
                let start_age = seed.start_age as u16 + PERIOD_SPAN * (n as u16 - 1);
                let start_year = birth_year + start_age as i32;
                MajorPeriod {
                    index: n,
                    start_age,
                    end_age: start_age + PERIOD_SPAN - 1,
                    start_year,
                    end_year: start_year + PERIOD_SPAN as i32 - 1,
                    palace_index,
                    branch: Branch::from_index(palace_index as i32),
                    stem: palace_stems[palace_index as usize],
                    palace_name: PalaceName::at(palace_index, life_index),
                }
            })
            .collect::<Vec<_>>();

        debug!(count = periods.len(), forward = seed.forward, "大运排布完成");
        Ok(periods)
    }

    /// 某岁所在大运; 起运前返回 None
    pub fn major_period_for_age<'a>(
        &self,
        periods: &'a [MajorPeriod],
        age: u16,
    ) -> ZiweiResult<Option<&'a MajorPeriod>> {
        let age = self.check_age(age as i64)?;
        Ok(periods.iter().find(|p| p.contains_age(age)))
    }

    // ==========================================
    // 流年
    // ==========================================

    /// 流年落于某地支的全部岁数
    ///
    /// { (B - 年支 + 12) mod 12 + 1 + 12k : k >= 0 }, 截止岁数上限
    pub fn fleeting_year_ages(
        &self,
        target_branch_index: u8,
        year_branch: Branch,
    ) -> ZiweiResult<Vec<u16>> {
        let target = check_branch_index("target_branch_index", target_branch_index)? as i32;
        let first = wrap(target - year_branch.index() as i32, 12) as u16 + 1;

        Ok((0..)
            .map(|k| first + 12 * k)
            .take_while(|age| *age <= self.age_ceiling)
            .collect())
    }

    /// 某公历年的流年 (宫位即流年地支, 宫名相对命宫)
    pub fn fleeting_year(&self, year: i32, birth_year: i32, life_index: u8) -> ZiweiResult<FleetingYear> {
        let life_index = check_branch_index("life_index", life_index)?;
        let age = self.check_age(year as i64 - birth_year as i64 + 1)?;

        let cycle = year - SEXAGENARY_YEAR_OFFSET;
        let branch = Branch::from_index(cycle);
        Ok(FleetingYear {
            year,
            age: age as i32,
            stem: Stem::from_index(cycle),
            branch,
            palace_index: branch.index(),
            palace_name: PalaceName::at(branch.index(), life_index),
        })
    }

    // ==========================================
    // 斗君 / 流月
    // ==========================================

    /// 斗君: 自流年地支逆数至生月,再顺数至生时
    pub fn dou_jun(
        &self,
        flow_year_branch: Branch,
        birth_month: u8,
        hour_branch_index: u8,
    ) -> ZiweiResult<u8> {
        let month = check_month(birth_month)? as i32;
        let hour = check_branch_index("hour_branch_index", hour_branch_index)? as i32;
        Ok(wrap(flow_year_branch.index() as i32 - (month - 1) + hour, 12) as u8)
    }

    /// 流月: 干支按五虎遁, 宫位自斗君顺数
    pub fn fleeting_month(
        &self,
        year: i32,
        month: u8,
        birth_month: u8,
        hour_branch_index: u8,
        life_index: u8,
    ) -> ZiweiResult<FleetingMonth> {
        let month = check_month(month)?;
        let life_index = check_branch_index("life_index", life_index)?;

        let cycle = year - SEXAGENARY_YEAR_OFFSET;
        let year_stem = Stem::from_index(cycle);
        let year_branch = Branch::from_index(cycle);

        let dou_jun = self.dou_jun(year_branch, birth_month, hour_branch_index)?;
        let palace_index = wrap(dou_jun as i32 + month as i32 - 1, 12) as u8;

        Ok(FleetingMonth {
            year,
            month,
            stem: five_tigers_start(year_stem).offset(month as i32 - 1),
            branch: Branch::from_index(month as i32 + 1),
            palace_index,
            palace_name: PalaceName::at(palace_index, life_index),
        })
    }

    // ==========================================
    // 小限
    // ==========================================

    /// 小限起宫 (一岁所在宫)
    pub fn minor_limit_start(&self, year_branch: Branch) -> ZiweiResult<u8> {
        MINOR_LIMIT_TRIAD_START
            .get(year_branch.triad() as usize)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("小限表缺少年支 {}", year_branch)))
    }

    /// 十二年支的小限起宫表, 由三合规则展开
    pub fn minor_limit_start_table(&self) -> ZiweiResult<[u8; 12]> {
        let mut table = [0u8; 12];
        for branch in Branch::ALL {
            table[branch.index() as usize] = self.minor_limit_start(branch)?;
        }
        Ok(table)
    }

    /// 某岁小限宫位: 男顺女逆
    pub fn minor_limit_palace(&self, year_branch: Branch, gender: Gender, age: u16) -> ZiweiResult<u8> {
        let age = self.check_age(age as i64)? as i32;
        let start = self.minor_limit_start(year_branch)? as i32;
        let step = match gender {
            Gender::Male => 1,
            Gender::Female => -1,
        };
        Ok(wrap(start + (age - 1) * step, 12) as u8)
    }

    /// 小限表 (1 岁至岁数上限)
    #[instrument(skip(self))]
    pub fn minor_limits(&self, year_branch: Branch, gender: Gender) -> ZiweiResult<Vec<MinorLimit>> {
        (1..=self.age_ceiling)
            .map(|age| {
                let palace_index = self.minor_limit_palace(year_branch, gender, age)?;
                Ok(MinorLimit {
                    age,
                    palace_index,
                    branch: Branch::from_index(palace_index as i32),
                })
            })
            .collect()
    }
}

impl Default for PeriodEngine {
    fn default() -> Self {
        Self::new()
    }
}
