use super::placement::StarPlacement;
use super::tables::{
    HUOXING_BASE, KUI_YUE, LINGXING_BASE, LUCUN, TIANFU_OFFSET, TIANFU_SERIES, TIANMA, XIANCHI,
    ZIWEI_SERIES, ZIWEI_TABLE,
};
use crate::domain::chart::LunarDate;
use crate::domain::star::StarName;
use crate::domain::types::{wrap, Branch, Bureau, Stem};
use crate::error::{check_branch_index, check_lunar_day, check_month, ZiweiError, ZiweiResult};
use tracing::{debug, instrument};

// ==========================================
// StarPlacementEngine - 安星引擎
// ==========================================
/// 无状态; 每个星系一个入口
pub struct StarPlacementEngine {}

impl StarPlacementEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 主星
    // ==========================================

    /// 紫微位置 = 查表[农历日 - 1][局列]
    pub fn ziwei_index(&self, bureau: Bureau, lunar_day: u8) -> ZiweiResult<u8> {
        let day = check_lunar_day(lunar_day)?;
        ZIWEI_TABLE
            .get(day as usize - 1)
            .and_then(|row| row.get(bureau.column()))
            .copied()
            .ok_or_else(|| {
                ZiweiError::InvalidState(format!("紫微定位表缺少键: day={} {}", day, bureau))
            })
    }

    /// 天府位置 = (紫微 + 固定偏移) mod 12
    pub fn tianfu_index(&self, ziwei_index: u8) -> ZiweiResult<u8> {
        let ziwei_index = check_branch_index("ziwei_index", ziwei_index)?;
        let offset = TIANFU_OFFSET.get(ziwei_index as usize).copied().ok_or_else(|| {
            ZiweiError::InvalidState(format!("天府偏移表缺少键: {}", ziwei_index))
        })?;
        Ok((ziwei_index + offset) % 12)
    }

    /// 十四主星
    ///
    /// 紫微星系按负偏移逆布,天府星系按正偏移顺布
    #[instrument(skip(self))]
    pub fn main_stars(&self, bureau: Bureau, lunar_day: u8) -> ZiweiResult<StarPlacement> {
        let ziwei = self.ziwei_index(bureau, lunar_day)?;
        let tianfu = self.tianfu_index(ziwei)?;

        let mut placement = StarPlacement::new();
        for (star, offset) in ZIWEI_SERIES {
            placement.place(star, wrap(ziwei as i32 + offset, 12) as u8);
        }
        for (star, offset) in TIANFU_SERIES {
            placement.place(star, wrap(tianfu as i32 + offset, 12) as u8);
        }

        debug!(ziwei, tianfu, "十四主星安放完成");
        Ok(placement)
    }

    // ==========================================
    // 辅星 (8)
    // ==========================================

    /// 文昌 文曲 左辅 右弼 天魁 天钺 禄存 天马
    ///
    /// - 文昌: 戌起子时逆数至生时
    /// - 文曲: 辰起子时顺数至生时
    /// - 左辅: 辰起正月顺数至生月
    /// - 右弼: 戌起正月逆数至生月
    /// - 魁钺/禄存: 按年干查表
    /// - 天马: 按年支三合查表
    #[instrument(skip(self))]
    pub fn auxiliary_stars(
        &self,
        month: u8,
        hour_branch_index: u8,
        year_stem: Stem,
        year_branch: Branch,
    ) -> ZiweiResult<StarPlacement> {
        let m = check_month(month)? as i32 - 1;
        let h = check_branch_index("hour_branch_index", hour_branch_index)? as i32;
        let stem = year_stem.index() as usize;

        let mut placement = StarPlacement::new();
        placement.place(StarName::Wenchang, wrap(10 - h, 12) as u8);
        placement.place(StarName::Wenqu, wrap(4 + h, 12) as u8);
        placement.place(StarName::Zuofu, wrap(4 + m, 12) as u8);
        placement.place(StarName::Youbi, wrap(10 - m, 12) as u8);

        let (kui, yue) = KUI_YUE
            .get(stem)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("魁钺表缺少年干 {}", year_stem)))?;
        placement.place(StarName::Tiankui, kui);
        placement.place(StarName::Tianyue, yue);
        placement.place(StarName::Lucun, self.lucun_index(year_stem)?);

        let tianma = TIANMA
            .get(year_branch.triad() as usize)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("天马表缺少年支 {}", year_branch)))?;
        placement.place(StarName::Tianma, tianma);

        Ok(placement)
    }

    /// 禄存位置（擎羊陀罗的锚点）
    pub fn lucun_index(&self, year_stem: Stem) -> ZiweiResult<u8> {
        LUCUN
            .get(year_stem.index() as usize)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("禄存表缺少年干 {}", year_stem)))
    }

    // ==========================================
    // 煞星 (7)
    // ==========================================

    /// 擎羊 陀罗 火星 铃星 地空 地劫 天刑
    ///
    /// - 羊陀: 禄存前后一位
    /// - 火铃: 年支三合起宫 + 时辰
    /// - 空劫: 亥宫起子时, 地空逆数 / 地劫顺数
    /// - 天刑: 酉起正月顺数至生月
    #[instrument(skip(self))]
    pub fn malefic_stars(
        &self,
        year_stem: Stem,
        year_branch: Branch,
        month: u8,
        hour_branch_index: u8,
    ) -> ZiweiResult<StarPlacement> {
        let m = check_month(month)? as i32 - 1;
        let h = check_branch_index("hour_branch_index", hour_branch_index)? as i32;
        let triad = year_branch.triad() as usize;
        let lucun = self.lucun_index(year_stem)? as i32;

        let huo_base = HUOXING_BASE
            .get(triad)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("火星表缺少年支 {}", year_branch)))?;
        let ling_base = LINGXING_BASE
            .get(triad)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("铃星表缺少年支 {}", year_branch)))?;

        let mut placement = StarPlacement::new();
        placement.place(StarName::Qingyang, wrap(lucun + 1, 12) as u8);
        placement.place(StarName::Tuoluo, wrap(lucun - 1, 12) as u8);
        placement.place(StarName::Huoxing, wrap(huo_base as i32 + h, 12) as u8);
        placement.place(StarName::Lingxing, wrap(ling_base as i32 + h, 12) as u8);
        placement.place(StarName::Dikong, wrap(11 - h, 12) as u8);
        placement.place(StarName::Dijie, wrap(11 + h, 12) as u8);
        placement.place(StarName::Tianxing, wrap(9 + m, 12) as u8);

        Ok(placement)
    }

    // ==========================================
    // 桃花星 (4)
    // ==========================================

    /// 红鸾 天喜 天姚 咸池
    ///
    /// - 红鸾: 卯起子年逆数至生年
    /// - 天喜: 红鸾对宫
    /// - 天姚: 丑起正月顺数至生月
    /// - 咸池: 年支三合查表
    #[instrument(skip(self))]
    pub fn romance_stars(&self, year_branch: Branch, month: u8) -> ZiweiResult<StarPlacement> {
        let m = check_month(month)? as i32 - 1;
        let yb = year_branch.index() as i32;

        let hongluan = wrap(3 - yb, 12);
        let xianchi = XIANCHI
            .get(year_branch.triad() as usize)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("咸池表缺少年支 {}", year_branch)))?;

        let mut placement = StarPlacement::new();
        placement.place(StarName::Hongluan, hongluan as u8);
        placement.place(StarName::Tianxi, wrap(hongluan + 6, 12) as u8);
        placement.place(StarName::Tianyao, wrap(1 + m, 12) as u8);
        placement.place(StarName::Xianchi, xianchi);

        Ok(placement)
    }

    // ==========================================
    // 全盘
    // ==========================================

    /// 安放全部 33 颗星
    #[instrument(skip(self, lunar), fields(day = lunar.day, month = lunar.month))]
    pub fn place_all(&self, lunar: &LunarDate, bureau: Bureau) -> ZiweiResult<StarPlacement> {
        let hour = lunar.hour_branch_index();

        let mut placement = self.main_stars(bureau, lunar.day)?;
        placement.merge(self.auxiliary_stars(
            lunar.month,
            hour,
            lunar.year_stem,
            lunar.year_branch,
        )?);
        placement.merge(self.malefic_stars(
            lunar.year_stem,
            lunar.year_branch,
            lunar.month,
            hour,
        )?);
        placement.merge(self.romance_stars(lunar.year_branch, lunar.month)?);

        debug!(count = placement.len(), "全盘安星完成");
        Ok(placement)
    }
}

impl Default for StarPlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}
