// ==========================================
// 紫微斗数排盘引擎 - 五行局判定
// ==========================================
// 职责: 年干 + 命宫地支 → 五行局
// 规则: 命宫干支纳音五行 (宫干由年干经五虎遁唯一确定)
// 红线: 纯查表,查不到即 InvalidState,不回退默认局
// ==========================================

use crate::domain::types::{Branch, Bureau, Stem};
use crate::error::{ZiweiError, ZiweiResult};
use tracing::instrument;

use Bureau::{Earth5 as E5, Fire6 as F6, Metal4 as M4, Water2 as W2, Wood3 as T3};

/// 行: 年干组 (甲己/乙庚/丙辛/丁壬/戊癸)
/// 列: 命宫地支对 (子丑/寅卯/辰巳/午未/申酉/戌亥)
const BUREAU_TABLE: [[Bureau; 6]; 5] = [
    [W2, F6, T3, E5, M4, F6], // 甲己
    [F6, E5, M4, T3, W2, E5], // 乙庚
    [E5, M4, W2, F6, T3, M4], // 丙辛
    [M4, T3, F6, W2, E5, T3], // 丁壬
    [T3, W2, E5, F6, M4, W2], // 戊癸
];

// ==========================================
// BureauClassifier - 五行局判定器
// ==========================================
pub struct BureauClassifier {}

impl BureauClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// 判定五行局
    ///
    /// # 参数
    /// - year_stem: 年干
    /// - life_palace_branch: 命宫地支
    ///
    /// # 返回
    /// - Ok(Bureau)
    /// - Err(InvalidState): 表项缺失
    #[instrument(skip(self))]
    pub fn classify(&self, year_stem: Stem, life_palace_branch: Branch) -> ZiweiResult<Bureau> {
        let row = (year_stem.index() % 5) as usize;
        let column = (life_palace_branch.index() / 2) as usize;

        BUREAU_TABLE
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .ok_or_else(|| {
                ZiweiError::InvalidState(format!(
                    "五行局表缺少键: {}{}",
                    year_stem, life_palace_branch
                ))
            })
    }
}

impl Default for BureauClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example_fire_six() {
        let classifier = BureauClassifier::new();
        assert_eq!(classifier.classify(Stem::Wu, Branch::Wu).unwrap(), Bureau::Fire6);
    }

    #[test]
    fn test_table_is_total() {
        let classifier = BureauClassifier::new();
        for stem in Stem::ALL {
            for branch in Branch::ALL {
                assert!(classifier.classify(stem, branch).is_ok());
            }
        }
    }

    #[test]
    fn test_paired_stems_share_rows() {
        let classifier = BureauClassifier::new();
        for branch in Branch::ALL {
            assert_eq!(
                classifier.classify(Stem::Jia, branch).unwrap(),
                classifier.classify(Stem::Ji, branch).unwrap()
            );
            assert_eq!(
                classifier.classify(Stem::Wu, branch).unwrap(),
                classifier.classify(Stem::Gui, branch).unwrap()
            );
        }
    }

    #[test]
    fn test_known_nayin_cells() {
        let classifier = BureauClassifier::new();
        // 丙子 涧下水
        assert_eq!(classifier.classify(Stem::Jia, Branch::Zi).unwrap(), Bureau::Water2);
        // 丙寅 炉中火
        assert_eq!(classifier.classify(Stem::Jia, Branch::Yin).unwrap(), Bureau::Fire6);
        // 戊申 大驿土 (丁年申宫)
        assert_eq!(classifier.classify(Stem::Ding, Branch::Shen).unwrap(), Bureau::Earth5);
    }
}
