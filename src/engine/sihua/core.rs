use super::table::{sihua_code, SIHUA_TABLE};
use crate::domain::chart::{CompleteChart, SihuaTransformation};
use crate::domain::star::StarName;
use crate::domain::types::{SihuaSource, SihuaType, Stem};
use crate::engine::relations::opposite;
use crate::engine::star_placement::StarPlacement;
use crate::error::{check_branch_index, ZiweiError, ZiweiResult};
use tracing::{debug, instrument};

// ==========================================
// SihuaEngine - 四化引擎
// ==========================================
pub struct SihuaEngine {}

impl SihuaEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 查表
    // ==========================================

    /// 某天干的四化: 按 禄权科忌 顺序返回 (类型, 星曜)
    pub fn stem_transformations(&self, stem: Stem) -> ZiweiResult<[(SihuaType, StarName); 4]> {
        let row = SIHUA_TABLE
            .get(stem.index() as usize)
            .ok_or_else(|| ZiweiError::InvalidState(format!("四化表缺少天干 {}", stem)))?;

        Ok([
            (SihuaType::Lu, row[0]),
            (SihuaType::Quan, row[1]),
            (SihuaType::Ke, row[2]),
            (SihuaType::Ji, row[3]),
        ])
    }

    // ==========================================
    // 生年四化
    // ==========================================

    /// 生年四化: 恰好 4 条, 星曜各不相同
    #[instrument(skip(self))]
    pub fn birth_transformations(&self, year_stem: Stem) -> ZiweiResult<Vec<SihuaTransformation>> {
        Ok(self
            .stem_transformations(year_stem)?
            .into_iter()
            .map(|(sihua_type, star)| SihuaTransformation {
                star,
                sihua_type,
                source: SihuaSource::Birth,
                source_palace_index: None,
                target_palace_index: None,
                code: sihua_code(SihuaSource::Birth, sihua_type, None),
            })
            .collect())
    }

    // ==========================================
    // 宫干四化
    // ==========================================

    /// 单宫宫干四化: 恰好 4 条, 均标注来源宫与星曜所在宫
    ///
    /// 表中星曜未安放视为内部表错误
    pub fn palace_stem_transformations(
        &self,
        source_index: u8,
        palace_stem: Stem,
        placement: &StarPlacement,
    ) -> ZiweiResult<Vec<SihuaTransformation>> {
        let source_index = check_branch_index("source_palace_index", source_index)?;

        self.stem_transformations(palace_stem)?
            .into_iter()
            .map(|(sihua_type, star)| {
                let target = self.locate(placement, star)?;
                Ok(SihuaTransformation {
                    star,
                    sihua_type,
                    source: SihuaSource::Palace,
                    source_palace_index: Some(source_index),
                    target_palace_index: Some(target),
                    code: sihua_code(SihuaSource::Palace, sihua_type, None),
                })
            })
            .collect()
    }

    /// 全盘宫干四化
    ///
    /// 只保留落在他宫的条目（落在本宫者属于离心自化）
    #[instrument(skip(self, palace_stems, placement))]
    pub fn palace_transformations(
        &self,
        palace_stems: &[Stem; 12],
        placement: &StarPlacement,
    ) -> ZiweiResult<Vec<SihuaTransformation>> {
        let mut result = Vec::with_capacity(48);
        for (index, stem) in palace_stems.iter().enumerate() {
            let index = index as u8;
            for t in self.palace_stem_transformations(index, *stem, placement)? {
                if t.target_palace_index != Some(index) {
                    result.push(t);
                }
            }
        }

        debug!(count = result.len(), "宫干四化完成");
        Ok(result)
    }

    // ==========================================
    // 自化
    // ==========================================

    /// 本宫自化
    ///
    /// - 离心 (x): 本宫干所化之星坐本宫
    /// - 向心 (i): 对宫干所化之星坐本宫
    ///
    /// 两种判定互不排斥
    pub fn self_transformations(
        &self,
        palace_index: u8,
        palace_stems: &[Stem; 12],
        placement: &StarPlacement,
    ) -> ZiweiResult<Vec<SihuaTransformation>> {
        let palace_index = check_branch_index("palace_index", palace_index)?;
        let opposite_index = opposite(palace_index)?;
        let stars_here = placement.stars_at(palace_index);

        let checks = [
            (
                SihuaSource::SelfOutward,
                palace_stems[palace_index as usize],
                palace_index,
            ),
            (
                SihuaSource::SelfInward,
                palace_stems[opposite_index as usize],
                opposite_index,
            ),
        ];

        let mut result = Vec::new();
        for (source, stem, source_index) in checks {
            for (sihua_type, star) in self.stem_transformations(stem)? {
                if stars_here.contains(&star) {
                    result.push(SihuaTransformation {
                        star,
                        sihua_type,
                        source,
                        source_palace_index: Some(source_index),
                        target_palace_index: Some(palace_index),
                        code: sihua_code(source, sihua_type, None),
                    });
                }
            }
        }
        Ok(result)
    }

    // ==========================================
    // 飞化
    // ==========================================

    /// 自某宫飞出的四化: 恰好 4 条, 编码 字母→目标宫
    pub fn flying_from(
        &self,
        source_index: u8,
        palace_stem: Stem,
        placement: &StarPlacement,
    ) -> ZiweiResult<Vec<SihuaTransformation>> {
        let source_index = check_branch_index("source_palace_index", source_index)?;

        self.stem_transformations(palace_stem)?
            .into_iter()
            .map(|(sihua_type, star)| {
                let target = self.locate(placement, star)?;
                Ok(SihuaTransformation {
                    star,
                    sihua_type,
                    source: SihuaSource::Flying,
                    source_palace_index: Some(source_index),
                    target_palace_index: Some(target),
                    code: sihua_code(SihuaSource::Flying, sihua_type, Some(target)),
                })
            })
            .collect()
    }

    /// 在已成盘的命盘上查询飞化
    pub fn flying_from_chart(
        &self,
        chart: &CompleteChart,
        source_index: u8,
    ) -> ZiweiResult<Vec<SihuaTransformation>> {
        let stem = chart.palace(source_index)?.position.stem;

        self.stem_transformations(stem)?
            .into_iter()
            .map(|(sihua_type, star)| {
                let target = chart.star_position(star).ok_or_else(|| {
                    ZiweiError::InvalidState(format!("命盘中找不到星曜 {}", star))
                })?;
                Ok(SihuaTransformation {
                    star,
                    sihua_type,
                    source: SihuaSource::Flying,
                    source_palace_index: Some(source_index),
                    target_palace_index: Some(target),
                    code: sihua_code(SihuaSource::Flying, sihua_type, Some(target)),
                })
            })
            .collect()
    }

    fn locate(&self, placement: &StarPlacement, star: StarName) -> ZiweiResult<u8> {
        placement
            .position(star)
            .map_err(|_| ZiweiError::InvalidState(format!("四化星曜未安放: {}", star)))
    }
}

impl Default for SihuaEngine {
    fn default() -> Self {
        Self::new()
    }
}
