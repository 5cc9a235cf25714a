use super::*;
use crate::domain::star::StarName;
use crate::domain::types::{SihuaSource, SihuaType, Stem};
use crate::engine::palace::PalacePositioner;
use crate::engine::star_placement::StarPlacement;
use crate::engine::test_support::sample_placement_1988;
use std::collections::HashSet;

fn wu_year_stems() -> [Stem; 12] {
    PalacePositioner::new().palace_stems(Stem::Wu)
}

// ==========================================
// 生年四化
// ==========================================

#[test]
fn test_birth_transformations_four_distinct_for_every_stem() {
    let engine = SihuaEngine::new();
    for stem in Stem::ALL {
        let list = engine.birth_transformations(stem).unwrap();
        assert_eq!(list.len(), 4);

        let stars: HashSet<_> = list.iter().map(|t| t.star).collect();
        let types: HashSet<_> = list.iter().map(|t| t.sihua_type).collect();
        assert_eq!(stars.len(), 4, "{}", stem);
        assert_eq!(types.len(), 4, "{}", stem);
        assert!(list.iter().all(|t| t.source == SihuaSource::Birth));
    }
}

#[test]
fn test_birth_transformations_jia_and_wu() {
    let engine = SihuaEngine::new();
    let jia = engine.birth_transformations(Stem::Jia).unwrap();
    let names: Vec<_> = jia.iter().map(|t| (t.star, t.code.as_str())).collect();
    assert_eq!(
        names,
        vec![
            (StarName::Lianzhen, "A"),
            (StarName::Pojun, "B"),
            (StarName::Wuqu, "C"),
            (StarName::Taiyang, "D"),
        ]
    );

    let wu = engine.birth_transformations(Stem::Wu).unwrap();
    assert_eq!(wu[0].star, StarName::Tanlang);
    assert_eq!(wu[1].star, StarName::Taiyin);
    assert_eq!(wu[2].star, StarName::Youbi);
    assert_eq!(wu[3].star, StarName::Tianji);
}

// ==========================================
// 宫干四化
// ==========================================

#[test]
fn test_palace_stem_transformations_always_four() {
    let engine = SihuaEngine::new();
    let placement = sample_placement_1988();
    let stems = wu_year_stems();
    for index in 0..12u8 {
        let list = engine
            .palace_stem_transformations(index, stems[index as usize], &placement)
            .unwrap();
        assert_eq!(list.len(), 4);
        for t in &list {
            assert_eq!(t.source_palace_index, Some(index));
            assert_eq!(t.target_palace_index, Some(placement.position(t.star).unwrap()));
            assert!(t.code.starts_with('P'));
        }
    }
}

#[test]
fn test_palace_transformations_exclude_same_palace() {
    let engine = SihuaEngine::new();
    let placement = sample_placement_1988();
    let stems = wu_year_stems();
    let list = engine.palace_transformations(&stems, &placement).unwrap();

    assert!(list
        .iter()
        .all(|t| t.target_palace_index != t.source_palace_index));

    // 午宫戊干化右弼科,右弼坐午 → 归入离心自化,不计入宫干四化
    assert!(!list
        .iter()
        .any(|t| t.source_palace_index == Some(6) && t.star == StarName::Youbi));

    let outward_total: usize = (0..12u8)
        .map(|i| {
            engine
                .self_transformations(i, &stems, &placement)
                .unwrap()
                .iter()
                .filter(|t| t.source == SihuaSource::SelfOutward)
                .count()
        })
        .sum();
    assert_eq!(list.len() + outward_total, 48);
}

// ==========================================
// 自化
// ==========================================

#[test]
fn test_self_transformations_worked_example() {
    let engine = SihuaEngine::new();
    let placement = sample_placement_1988();
    let stems = wu_year_stems();

    let list = engine.self_transformations(6, &stems, &placement).unwrap();
    let outward: Vec<_> = list
        .iter()
        .filter(|t| t.source == SihuaSource::SelfOutward)
        .collect();
    let inward: Vec<_> = list
        .iter()
        .filter(|t| t.source == SihuaSource::SelfInward)
        .collect();

    assert_eq!(outward.len(), 1);
    assert_eq!(outward[0].star, StarName::Youbi);
    assert_eq!(outward[0].code, "xC");

    // 对宫子干甲 → 武曲化科
    assert_eq!(inward.len(), 1);
    assert_eq!(inward[0].star, StarName::Wuqu);
    assert_eq!(inward[0].code, "iC");
    assert_eq!(inward[0].source_palace_index, Some(0));
}

#[test]
fn test_outward_and_inward_not_exclusive() {
    let engine = SihuaEngine::new();
    let mut placement = StarPlacement::new();
    placement.place(StarName::Lianzhen, 0);
    let stems = [Stem::Jia; 12];

    let list = engine.self_transformations(0, &stems, &placement).unwrap();
    assert_eq!(list.len(), 2);
    assert!(list
        .iter()
        .any(|t| t.source == SihuaSource::SelfOutward && t.code == "xA"));
    assert!(list
        .iter()
        .any(|t| t.source == SihuaSource::SelfInward && t.code == "iA"));
}

#[test]
fn test_missing_star_is_invalid_state() {
    let engine = SihuaEngine::new();
    let placement = StarPlacement::new();
    let result = engine.palace_stem_transformations(0, Stem::Jia, &placement);
    assert!(matches!(result, Err(crate::error::ZiweiError::InvalidState(_))));
}

// ==========================================
// 飞化 / 编码
// ==========================================

#[test]
fn test_flying_codes_carry_target() {
    let engine = SihuaEngine::new();
    let placement = sample_placement_1988();
    // 午宫戊干: 贪狼禄 → 申(8)
    let list = engine.flying_from(6, Stem::Wu, &placement).unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list[0].star, StarName::Tanlang);
    assert_eq!(list[0].code, "A→8");
    assert_eq!(list[0].target_palace_index, Some(8));
    assert!(list.iter().all(|t| t.source == SihuaSource::Flying));
}

#[test]
fn test_codes() {
    assert_eq!(sihua_code(SihuaSource::Birth, SihuaType::Ji, None), "D");
    assert_eq!(sihua_code(SihuaSource::Palace, SihuaType::Lu, None), "PA");
    assert_eq!(sihua_code(SihuaSource::SelfOutward, SihuaType::Quan, None), "xB");
    assert_eq!(sihua_code(SihuaSource::SelfInward, SihuaType::Ke, None), "iC");
    assert_eq!(sihua_code(SihuaSource::Flying, SihuaType::Lu, Some(3)), "A→3");
}
