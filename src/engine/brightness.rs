// ==========================================
// 紫微斗数排盘引擎 - 星曜亮度
// ==========================================
// 职责: (星曜, 地支索引) → 庙旺得利平不陷
// 红线: 未知星曜 UnknownStar, 越界 InvalidArgument, 不回退默认亮度
// ==========================================

use crate::domain::star::StarName;
use crate::domain::types::Brightness;
use crate::error::{check_branch_index, ZiweiError, ZiweiResult};

/// 亮度表: 每行 12 字, 自子至亥
const BRIGHTNESS_TABLE: [(StarName, &str); 33] = [
    (StarName::Ziwei, "庙旺得利平不庙旺得利平不"),
    (StarName::Tianji, "平庙旺得利不陷平庙旺得利"),
    (StarName::Taiyang, "陷不平利得旺庙旺得利平不"),
    (StarName::Wuqu, "得利平不陷庙旺得利平不庙"),
    (StarName::Tiantong, "利平不陷庙旺得利平不庙旺"),
    (StarName::Lianzhen, "平不陷庙旺得利平不庙旺得"),
    (StarName::Tianfu, "庙庙庙庙庙庙庙庙庙庙庙庙"),
    (StarName::Taiyin, "庙旺得利平不陷不平利得旺"),
    (StarName::Tanlang, "旺得利平不陷庙旺得利平不"),
    (StarName::Jumen, "不陷庙旺得利平不庙旺得利"),
    (StarName::Tianxiang, "得利平不庙旺得利平不庙旺"),
    (StarName::Tianliang, "平不庙旺得利平不庙旺得利"),
    (StarName::Qisha, "庙旺得利平不陷庙旺得利平"),
    (StarName::Pojun, "得利平不陷庙旺得利平不庙"),
    (StarName::Wenchang, "庙旺得利平不庙旺得利平不"),
    (StarName::Wenqu, "平不庙旺得利平不庙旺得利"),
    (StarName::Zuofu, "庙庙庙庙庙庙庙庙庙庙庙庙"),
    (StarName::Youbi, "庙庙庙庙庙庙庙庙庙庙庙庙"),
    (StarName::Tiankui, "平平平平平平平平平平平平"),
    (StarName::Tianyue, "平平平平平平平平平平平平"),
    (StarName::Lucun, "庙庙庙庙庙庙庙庙庙庙庙庙"),
    (StarName::Tianma, "庙旺得利平不庙旺得利平不"),
    (StarName::Qingyang, "陷不平利得旺陷不平利得旺"),
    (StarName::Tuoluo, "旺得利平不陷旺得利平不陷"),
    (StarName::Huoxing, "得庙旺得利平不陷不平利得"),
    (StarName::Lingxing, "不陷不平利得庙旺得庙旺得"),
    (StarName::Dikong, "陷陷陷陷陷陷陷陷陷陷陷陷"),
    (StarName::Dijie, "陷陷陷陷陷陷陷陷陷陷陷陷"),
    (StarName::Tianxing, "平平平平平平平平平平平平"),
    (StarName::Hongluan, "平平平平平平平平平平平平"),
    (StarName::Tianxi, "平平平平平平平平平平平平"),
    (StarName::Tianyao, "平平平平平平平平平平平平"),
    (StarName::Xianchi, "平平平平平平平平平平平平"),
];

// ==========================================
// BrightnessEvaluator - 亮度查表
// ==========================================
pub struct BrightnessEvaluator {}

impl BrightnessEvaluator {
    pub fn new() -> Self {
        Self {}
    }

    /// 按中文星名查亮度
    pub fn brightness(&self, star_name: &str, palace_index: u8) -> ZiweiResult<Brightness> {
        let star: StarName = star_name
            .parse()
            .map_err(|_| ZiweiError::UnknownStar(star_name.to_string()))?;
        self.brightness_of(star, palace_index)
    }

    /// 按星曜枚举查亮度
    pub fn brightness_of(&self, star: StarName, palace_index: u8) -> ZiweiResult<Brightness> {
        let palace_index = check_branch_index("palace_index", palace_index)?;

        let row = BRIGHTNESS_TABLE
            .iter()
            .find(|(name, _)| *name == star)
            .map(|(_, row)| *row)
            .ok_or_else(|| ZiweiError::UnknownStar(star.as_str().to_string()))?;

        row.chars()
            .nth(palace_index as usize)
            .and_then(Brightness::from_char)
            .ok_or_else(|| {
                ZiweiError::InvalidState(format!(
                    "亮度表损坏: star={} index={}",
                    star, palace_index
                ))
            })
    }
}

impl Default for BrightnessEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_total_and_well_formed() {
        let evaluator = BrightnessEvaluator::new();
        for star in StarName::all() {
            for index in 0..12u8 {
                assert!(evaluator.brightness_of(star, index).is_ok(), "{} {}", star, index);
            }
        }
    }

    #[test]
    fn test_known_cells() {
        let evaluator = BrightnessEvaluator::new();
        assert_eq!(evaluator.brightness("紫微", 0).unwrap(), Brightness::Miao);
        assert_eq!(evaluator.brightness("太阳", 0).unwrap(), Brightness::Xian);
        assert_eq!(evaluator.brightness("太阳", 6).unwrap(), Brightness::Miao);
        assert_eq!(evaluator.brightness("天府", 7).unwrap(), Brightness::Miao);
        assert_eq!(evaluator.brightness("地劫", 3).unwrap(), Brightness::Xian);
        assert_eq!(evaluator.brightness("天空", 3).unwrap(), Brightness::Xian);
    }

    #[test]
    fn test_unknown_star_and_bad_index() {
        let evaluator = BrightnessEvaluator::new();
        assert!(matches!(
            evaluator.brightness("北斗", 0),
            Err(ZiweiError::UnknownStar(name)) if name == "北斗"
        ));
        assert!(matches!(
            evaluator.brightness("紫微", 12),
            Err(ZiweiError::InvalidArgument { .. })
        ));
    }
}
