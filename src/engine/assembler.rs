// ==========================================
// 紫微斗数排盘引擎 - 命盘组装器
// ==========================================
// 用途: 协调各引擎的执行顺序, 产出完整命盘
// 顺序: 宫位 → 五行局 → 安星 → 亮度 → 四化 → 命身主/来因 → 大运
// ==========================================
// 红线: 任一步失败即整体失败, 不产出半成品命盘
// ==========================================

use crate::config::EngineConfig;
use crate::domain::chart::{ChartMetadata, CompleteChart, LunarDate, PalaceData, SihuaTransformation, Star};
use crate::domain::types::{Branch, Gender};
use crate::engine::period::{PeriodEngine, DEFAULT_AGE_CEILING};
use crate::engine::{
    BrightnessEvaluator, BureauClassifier, MasterResolver, PalacePositioner, SihuaEngine,
    StarPlacement, StarPlacementEngine,
};
use crate::error::{ZiweiError, ZiweiResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

// ==========================================
// ChartOptions - 排盘选项
// ==========================================
// 所有字段均参与指纹
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartOptions {
    pub include_palace_transformations: bool,
    pub include_self_transformations: bool,
    pub major_period_count: u8,
    pub age_ceiling: u16,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            include_palace_transformations: true,
            include_self_transformations: true,
            major_period_count: 12,
            age_ceiling: DEFAULT_AGE_CEILING,
        }
    }
}

impl ChartOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            include_palace_transformations: config.include_palace_transformations,
            include_self_transformations: config.include_self_transformations,
            major_period_count: config.major_period_count,
            age_ceiling: config.age_ceiling,
        }
    }

    pub fn validate(&self) -> ZiweiResult<()> {
        if self.major_period_count == 0 || self.major_period_count > 12 {
            return Err(ZiweiError::invalid_argument(
                "major_period_count",
                format!("大运步数必须在 1..=12, 实际为 {}", self.major_period_count),
            ));
        }
        PeriodEngine::with_age_ceiling(self.age_ceiling)?;
        Ok(())
    }

    /// 指纹片段, 形如 p1s1n12a120
    pub fn as_key(&self) -> String {
        format!(
            "p{}s{}n{}a{}",
            self.include_palace_transformations as u8,
            self.include_self_transformations as u8,
            self.major_period_count,
            self.age_ceiling
        )
    }
}

/// 元数据中由调用方提供的部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartContext {
    pub fingerprint: String,
    pub calendar_source: String,
}

// ==========================================
// ChartAssembler - 命盘组装器
// ==========================================
pub struct ChartAssembler {
    positioner: PalacePositioner,
    classifier: BureauClassifier,
    stars: StarPlacementEngine,
    brightness: BrightnessEvaluator,
    sihua: SihuaEngine,
    masters: MasterResolver,
}

impl ChartAssembler {
    pub fn new() -> Self {
        Self {
            positioner: PalacePositioner::new(),
            classifier: BureauClassifier::new(),
            stars: StarPlacementEngine::new(),
            brightness: BrightnessEvaluator::new(),
            sihua: SihuaEngine::new(),
            masters: MasterResolver::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 组装完整命盘
    ///
    /// # 参数
    /// - lunar: 农历日期与四柱
    /// - gender: 性别 (仅大运方向使用)
    /// - options: 排盘选项
    /// - context: 指纹与历法来源
    #[instrument(skip(self, lunar, context), fields(fingerprint = %context.fingerprint))]
    pub fn compose(
        &self,
        lunar: &LunarDate,
        gender: Gender,
        options: &ChartOptions,
        context: ChartContext,
    ) -> ZiweiResult<CompleteChart> {
        lunar.validate()?;
        options.validate()?;

        // ===== 步骤 1: 宫位 =====
        let location = self
            .positioner
            .position(lunar.month, lunar.hour_branch_index())?;
        let life_branch = Branch::from_index(location.life as i32);
        let positions = self.positioner.palace_positions(lunar.year_stem);
        let stems = self.positioner.palace_stems(lunar.year_stem);

        // ===== 步骤 2: 五行局 =====
        let bureau = self.classifier.classify(lunar.year_stem, life_branch)?;
        debug!(bureau = %bureau, life = location.life, body = location.body, "定局完成");

        // ===== 步骤 3: 安星 =====
        let placement = self.stars.place_all(lunar, bureau)?;

        // ===== 步骤 4: 四化 =====
        let birth = self.sihua.birth_transformations(lunar.year_stem)?;
        let palace_flows = if options.include_palace_transformations {
            self.sihua.palace_transformations(&stems, &placement)?
        } else {
            Vec::new()
        };

        // ===== 步骤 5: 十二宫 (含亮度) =====
        let mut palaces = Vec::with_capacity(12);
        for position in positions {
            let index = position.index;
            let self_flows = if options.include_self_transformations {
                self.sihua.self_transformations(index, &stems, &placement)?
            } else {
                Vec::new()
            };
            let incoming: Vec<SihuaTransformation> = palace_flows
                .iter()
                .filter(|t| t.target_palace_index == Some(index))
                .cloned()
                .collect();

            let stars = self.palace_stars(index, &placement, &birth, &incoming, &self_flows)?;
            let is_empty = !stars.iter().any(|s| s.is_main_star);
            palaces.push(PalaceData {
                position,
                stars,
                sihua: incoming,
                self_transformations: self_flows,
                is_empty,
            });
        }

        // ===== 步骤 6: 命主 / 身主 / 来因宫 =====
        let life_master = self.masters.life_master(life_branch)?;
        let body_master = self.masters.body_master(lunar.year_branch)?;
        let laiyin_palace = self.positioner.laiyin(lunar.year_stem, location.life)?;

        // ===== 步骤 7: 大运 =====
        let periods = PeriodEngine::with_age_ceiling(options.age_ceiling)?;
        let period_seed = periods.seed(lunar.year_stem, gender, bureau)?;
        let major_periods = periods.major_periods(
            period_seed,
            location.life,
            &stems,
            lunar.year,
            options.major_period_count,
        )?;

        let eight_characters = lunar.eight_characters().to_string();
        info!(
            eight_characters = %eight_characters,
            bureau = %bureau,
            life = location.life,
            "命盘组装完成"
        );

        Ok(CompleteChart {
            lunar_date: lunar.clone(),
            palaces,
            life_palace_index: location.life,
            body_palace_index: location.body,
            bureau,
            life_master,
            body_master,
            laiyin_palace,
            period_seed,
            major_periods,
            metadata: ChartMetadata {
                fingerprint: context.fingerprint,
                engine_version: crate::VERSION.to_string(),
                calendar_source: context.calendar_source,
                gender,
                birth_year: lunar.year,
                eight_characters,
            },
        })
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 某宫星曜: 亮度 + 生年 / 宫干 / 自化标注
    fn palace_stars(
        &self,
        index: u8,
        placement: &StarPlacement,
        birth: &[SihuaTransformation],
        incoming: &[SihuaTransformation],
        self_flows: &[SihuaTransformation],
    ) -> ZiweiResult<Vec<Star>> {
        placement
            .stars_at(index)
            .into_iter()
            .map(|name| {
                let mut star = Star::new(name, self.brightness.brightness_of(name, index)?);
                star.sihua_transformations = birth
                    .iter()
                    .chain(incoming)
                    .chain(self_flows)
                    .filter(|t| t.star == name)
                    .cloned()
                    .collect();
                Ok(star)
            })
            .collect()
    }
}

impl Default for ChartAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::star::StarName;
    use crate::domain::types::{Bureau, PalaceName, SihuaSource, SihuaType};
    use crate::engine::test_support::sample_lunar_1988;

    fn context() -> ChartContext {
        ChartContext {
            fingerprint: "test".to_string(),
            calendar_source: "fixture".to_string(),
        }
    }

    fn sample_chart(options: ChartOptions) -> CompleteChart {
        ChartAssembler::new()
            .compose(&sample_lunar_1988(), Gender::Male, &options, context())
            .unwrap()
    }

    #[test]
    fn test_compose_sample_chart() {
        let chart = sample_chart(ChartOptions::default());
        assert_eq!(chart.bureau, Bureau::Fire6);
        assert_eq!(chart.life_palace_index, 6);
        assert_eq!(chart.body_palace_index, 6);
        assert_eq!(chart.palaces.len(), 12);
        assert_eq!(chart.life_master, StarName::Pojun);
        assert_eq!(chart.body_master, StarName::Wenchang);
        assert_eq!(chart.laiyin_palace.name, PalaceName::Life);
        assert_eq!(chart.metadata.eight_characters, "戊辰戊午丙午戊子");
        assert_eq!(chart.metadata.birth_year, 1988);
        assert_eq!(chart.major_periods.len(), 12);
        assert!(chart.period_seed.forward);

        for (index, palace) in chart.palaces.iter().enumerate() {
            assert_eq!(palace.index() as usize, index);
        }
    }

    #[test]
    fn test_empty_palaces_follow_main_stars() {
        let chart = sample_chart(ChartOptions::default());
        // 子宫七杀, 丑宫无主星
        assert!(!chart.palace(0).unwrap().is_empty);
        assert!(chart.palace(1).unwrap().is_empty);
        for palace in &chart.palaces {
            assert_eq!(palace.is_empty, palace.main_stars().next().is_none());
        }
    }

    #[test]
    fn test_birth_annotations_on_stars() {
        let chart = sample_chart(ChartOptions::default());
        // 戊年: 贪狼禄 太阴权 右弼科 天机忌
        let expected = [
            (StarName::Tanlang, SihuaType::Lu),
            (StarName::Taiyin, SihuaType::Quan),
            (StarName::Youbi, SihuaType::Ke),
            (StarName::Tianji, SihuaType::Ji),
        ];
        for (name, sihua_type) in expected {
            let star = chart.star(name).unwrap();
            assert!(star
                .sihua_transformations
                .iter()
                .any(|t| t.source == SihuaSource::Birth && t.sihua_type == sihua_type));
        }
    }

    #[test]
    fn test_options_switch_annotations() {
        let full = sample_chart(ChartOptions::default());
        assert!(full.palaces.iter().any(|p| !p.sihua.is_empty()));

        let bare = sample_chart(ChartOptions {
            include_palace_transformations: false,
            include_self_transformations: false,
            major_period_count: 8,
            ..ChartOptions::default()
        });
        assert!(bare.palaces.iter().all(|p| p.sihua.is_empty()));
        assert!(bare.palaces.iter().all(|p| p.self_transformations.is_empty()));
        assert_eq!(bare.major_periods.len(), 8);
        for palace in &bare.palaces {
            for star in &palace.stars {
                assert!(star
                    .sihua_transformations
                    .iter()
                    .all(|t| t.source == SihuaSource::Birth));
            }
        }
    }

    #[test]
    fn test_palace_annotations_match_palace_lists() {
        let chart = sample_chart(ChartOptions::default());
        for palace in &chart.palaces {
            for t in palace.sihua.iter().chain(&palace.self_transformations) {
                assert_eq!(t.target_palace_index, Some(palace.index()));
                let star = palace.stars.iter().find(|s| s.name == t.star).unwrap();
                assert!(star.sihua_transformations.contains(t));
            }
            for t in &palace.sihua {
                assert_ne!(t.source_palace_index, Some(palace.index()));
            }
        }
    }

    #[test]
    fn test_invalid_options_rejected() {
        let assembler = ChartAssembler::new();
        let bad = ChartOptions {
            major_period_count: 0,
            ..ChartOptions::default()
        };
        assert!(assembler
            .compose(&sample_lunar_1988(), Gender::Male, &bad, context())
            .is_err());
        assert_eq!(ChartOptions::default().as_key(), "p1s1n12a120");
    }
}
