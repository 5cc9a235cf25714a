// ==========================================
// 紫微斗数排盘引擎 - 宫位定位引擎
// ==========================================
// 职责: 命宫/身宫定位 + 五虎遁宫干 + 来因宫
// 输入: 农历月 (1..12) + 时辰索引 (0..11) + 年干
// 输出: 命宫/身宫地支索引, 十二宫干, 来因宫
// ==========================================
// 红线: 宫名永远相对命宫推算,不存固定映射
// ==========================================

use crate::domain::chart::{LaiyinPalace, PalacePosition};
use crate::domain::types::{wrap, Branch, PalaceName, Stem};
use crate::error::{check_branch_index, check_month, ZiweiError, ZiweiResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 寅宫地支索引
pub const YIN_INDEX: i32 = 2;

/// 五虎遁: 年干 → 寅位起干
///
/// 甲己→丙, 乙庚→戊, 丙辛→庚, 丁壬→壬, 戊癸→甲
pub fn five_tigers_start(year_stem: Stem) -> Stem {
    match year_stem {
        Stem::Jia | Stem::Ji => Stem::Bing,
        Stem::Yi | Stem::Geng => Stem::Wu,
        Stem::Bing | Stem::Xin => Stem::Geng,
        Stem::Ding | Stem::Ren => Stem::Ren,
        Stem::Wu | Stem::Gui => Stem::Jia,
    }
}

/// 命身宫定位结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalaceLocation {
    pub life: u8,
    pub body: u8,
}

// ==========================================
// PalacePositioner - 宫位定位引擎
// ==========================================
pub struct PalacePositioner {}

impl PalacePositioner {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 命宫 / 身宫
    // ==========================================

    /// 命宫身宫定位
    ///
    /// 寅宫起正月顺数至生月,再从生月起子时:
    /// - 命宫逆数至生时: (2 + month - 1 - hour) mod 12
    /// - 身宫顺数至生时: (2 + month - 1 + hour) mod 12
    ///
    /// # 参数
    /// - month: 农历月 1..=12
    /// - hour_branch_index: 时辰索引 0..=11
    #[instrument(skip(self))]
    pub fn position(&self, month: u8, hour_branch_index: u8) -> ZiweiResult<PalaceLocation> {
        let month = check_month(month)? as i32;
        let hour = check_branch_index("hour_branch_index", hour_branch_index)? as i32;

        let month_palace = YIN_INDEX + month - 1;
        let location = PalaceLocation {
            life: wrap(month_palace - hour, 12) as u8,
            body: wrap(month_palace + hour, 12) as u8,
        };

        debug!(life = location.life, body = location.body, "命身宫定位完成");
        Ok(location)
    }

    // ==========================================
    // 宫干 (五虎遁)
    // ==========================================

    /// 单宫宫干
    ///
    /// 寅宫取五虎遁起干,其余宫位按地支距寅的步数顺推;
    /// 子丑两宫与寅卯同干（循环两个方向均成立）
    pub fn palace_stem(&self, year_stem: Stem, branch_index: u8) -> ZiweiResult<Stem> {
        let branch_index = check_branch_index("branch_index", branch_index)? as i32;
        let steps = wrap(branch_index - YIN_INDEX, 12);
        Ok(five_tigers_start(year_stem).offset(steps))
    }

    /// 十二宫干表（下标 = 地支索引）
    pub fn palace_stems(&self, year_stem: Stem) -> [Stem; 12] {
        let start = five_tigers_start(year_stem);
        let mut stems = [Stem::Jia; 12];
        for (index, stem) in stems.iter_mut().enumerate() {
            *stem = start.offset(wrap(index as i32 - YIN_INDEX, 12));
        }
        stems
    }

    /// 十二宫位（地支 + 宫干 + 五行）
    pub fn palace_positions(&self, year_stem: Stem) -> [PalacePosition; 12] {
        let stems = self.palace_stems(year_stem);
        let mut positions = [PalacePosition::new(0, stems[0]); 12];
        for (index, position) in positions.iter_mut().enumerate() {
            *position = PalacePosition::new(index as u8, stems[index]);
        }
        positions
    }

    // ==========================================
    // 宫名 / 来因宫
    // ==========================================

    /// 宫名 = 从命宫起逆数的序号
    pub fn palace_name(&self, branch_index: u8, life_index: u8) -> ZiweiResult<PalaceName> {
        let branch_index = check_branch_index("branch_index", branch_index)?;
        let life_index = check_branch_index("life_index", life_index)?;
        Ok(PalaceName::at(branch_index, life_index))
    }

    /// 来因宫: 宫干与年干相同之宫
    ///
    /// 从寅宫顺扫至亥宫,十宫干恰好各出现一次;
    /// 子丑两宫重复寅卯之干,不参与扫描
    #[instrument(skip(self))]
    pub fn laiyin(&self, year_stem: Stem, life_index: u8) -> ZiweiResult<LaiyinPalace> {
        let life_index = check_branch_index("life_index", life_index)?;
        let stems = self.palace_stems(year_stem);

        let index = (YIN_INDEX..YIN_INDEX + 10)
            .map(|i| i as usize)
            .find(|&i| stems[i] == year_stem)
            .ok_or_else(|| {
                ZiweiError::InvalidState(format!("五虎遁宫干表中找不到年干 {}", year_stem))
            })? as u8;

        Ok(LaiyinPalace {
            index,
            branch: Branch::from_index(index as i32),
            name: PalaceName::at(index, life_index),
        })
    }
}

impl Default for PalacePositioner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_worked_example() {
        // 五月 子时 → 命宫午, 身宫午
        let positioner = PalacePositioner::new();
        let loc = positioner.position(5, 0).unwrap();
        assert_eq!(loc.life, 6);
        assert_eq!(loc.body, 6);
    }

    #[test]
    fn test_position_wraps_without_negative() {
        let positioner = PalacePositioner::new();
        // 正月 亥时: 2 - 11 → 3 (卯)
        let loc = positioner.position(1, 11).unwrap();
        assert_eq!(loc.life, 3);
        assert_eq!(loc.body, 1);
        // 十二月 子时: 13 → 1
        assert_eq!(positioner.position(12, 0).unwrap().life, 1);
    }

    #[test]
    fn test_position_rejects_out_of_domain() {
        let positioner = PalacePositioner::new();
        assert!(matches!(
            positioner.position(0, 0),
            Err(ZiweiError::InvalidArgument { .. })
        ));
        assert!(positioner.position(13, 0).is_err());
        assert!(positioner.position(1, 12).is_err());
    }

    #[test]
    fn test_palace_stems_five_tigers() {
        let positioner = PalacePositioner::new();
        // 戊年: 寅起甲
        let stems = positioner.palace_stems(Stem::Wu);
        assert_eq!(stems[2], Stem::Jia);
        assert_eq!(stems[6], Stem::Wu);
        assert_eq!(stems[11], Stem::Gui);
        // 子丑与寅卯同干
        assert_eq!(stems[0], stems[2]);
        assert_eq!(stems[1], stems[3]);
        assert_eq!(positioner.palace_stem(Stem::Wu, 0).unwrap(), Stem::Jia);
    }

    #[test]
    fn test_laiyin_each_stem_once() {
        let positioner = PalacePositioner::new();
        for stem in Stem::ALL {
            let laiyin = positioner.laiyin(stem, 0).unwrap();
            assert!((2..12).contains(&laiyin.index));
            assert_eq!(positioner.palace_stem(stem, laiyin.index).unwrap(), stem);
        }
        // 甲年来因戌
        assert_eq!(positioner.laiyin(Stem::Jia, 6).unwrap().branch, Branch::Xu);
        // 壬年寅子皆为壬,取寅
        assert_eq!(positioner.laiyin(Stem::Ren, 6).unwrap().branch, Branch::Yin);
    }

    #[test]
    fn test_laiyin_named_relative_to_life() {
        let positioner = PalacePositioner::new();
        // 戊年来因午; 命宫午 → 命宫, 命宫辰 → 福德宫
        let laiyin = positioner.laiyin(Stem::Wu, 6).unwrap();
        assert_eq!(laiyin.branch, Branch::Wu);
        assert_eq!(laiyin.name, PalaceName::Life);
        let other = positioner.laiyin(Stem::Wu, 4).unwrap();
        assert_eq!(other.index, 6);
        assert_eq!(other.name, PalaceName::Fortune);
    }
}
