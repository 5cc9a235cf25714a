// ==========================================
// 运限引擎测试
// ==========================================
// 职责: 大运方向 / 流年岁数 / 流月 / 小限 的组合规则
// 红线: 大运方向看 (年干阴阳, 性别); 小限方向只看性别
// ==========================================

mod helpers;

use helpers::{fixture_calendar, BirthInputBuilder};
use std::collections::HashSet;
use ziwei_chart::{
    Branch, Bureau, ChartOptions, ChartService, EngineConfig, Gender, PalaceName, PeriodEngine,
    Stem, ZiweiError,
};

#[test]
fn test_major_ladder_covers_all_branches_in_order() {
    let service = ChartService::new(EngineConfig::default(), fixture_calendar()).unwrap();

    for builder in [BirthInputBuilder::new(), BirthInputBuilder::new().female()] {
        let chart = service.compute(&builder.build()).unwrap();
        let ladder: Vec<u8> = chart.major_periods.iter().map(|p| p.palace_index).collect();
        assert_eq!(ladder.len(), 12);
        assert_eq!(ladder.iter().collect::<HashSet<_>>().len(), 12);

        let step: i32 = if chart.period_seed.forward { 1 } else { 11 };
        for pair in ladder.windows(2) {
            assert_eq!((pair[0] as i32 + step) % 12, pair[1] as i32);
        }
        for pair in chart.major_periods.windows(2) {
            assert_eq!(pair[0].end_age + 1, pair[1].start_age);
            assert_eq!(pair[0].end_year + 1, pair[1].start_year);
        }
    }
}

#[test]
fn test_gender_flips_major_direction_only() {
    let engine = PeriodEngine::new();

    for stem in Stem::ALL {
        assert_ne!(
            engine.is_forward(stem, Gender::Male),
            engine.is_forward(stem, Gender::Female)
        );
    }
    assert!(engine.is_forward(Stem::Wu, Gender::Male));
    assert!(engine.is_forward(Stem::Yi, Gender::Female));

    // 小限: 起宫只看年支, 方向男顺女逆
    let male = engine.minor_limits(Branch::Chen, Gender::Male).unwrap();
    let female = engine.minor_limits(Branch::Chen, Gender::Female).unwrap();
    assert_eq!(male[0].palace_index, female[0].palace_index);
    assert_eq!((male[0].palace_index + 1) % 12, male[1].palace_index);
    assert_eq!((female[0].palace_index + 11) % 12, female[1].palace_index);
}

#[test]
fn test_start_age_equals_bureau_number() {
    let engine = PeriodEngine::new();
    for bureau in Bureau::ALL {
        for forward in [true, false] {
            assert_eq!(engine.start_age(bureau, forward).unwrap(), bureau.cycle_number());
        }
    }
}

#[test]
fn test_major_period_for_age() {
    let service = ChartService::new(EngineConfig::default(), fixture_calendar()).unwrap();
    let chart = service.compute(&BirthInputBuilder::new().build()).unwrap();
    let engine = PeriodEngine::new();

    assert!(engine.major_period_for_age(&chart.major_periods, 3).unwrap().is_none());
    let period = engine
        .major_period_for_age(&chart.major_periods, 36)
        .unwrap()
        .unwrap();
    assert_eq!(period.index, 4);
    assert_eq!((period.start_age, period.end_age), (36, 45));
    assert!(matches!(
        engine.major_period_for_age(&chart.major_periods, 0),
        Err(ZiweiError::InvalidArgument { .. })
    ));
}

#[test]
fn test_fleeting_years() {
    let engine = PeriodEngine::new();

    // 辰年生人, 流年到午: 3, 15, 27, ...
    let ages = engine.fleeting_year_ages(6, Branch::Chen).unwrap();
    assert_eq!(&ages[..3], &[3, 15, 27]);
    assert!(ages.iter().all(|a| *a <= 120));
    assert_eq!(ages.len(), 10);

    let year = engine.fleeting_year(2024, 1988, 6).unwrap();
    assert_eq!(year.age, 37);
    assert_eq!((year.stem, year.branch), (Stem::Jia, Branch::Chen));
    assert_eq!(year.palace_index, 4);
    assert_eq!(year.palace_name, PalaceName::Spouse);

    assert!(engine.fleeting_year(1987, 1988, 6).is_err());
    assert!(engine.fleeting_year_ages(12, Branch::Chen).is_err());
}

#[test]
fn test_fleeting_months_start_from_dou_jun() {
    let engine = PeriodEngine::new();

    // 2024 甲辰年, 生于五月子时: 斗君 = 辰 - 4 + 0 = 子
    assert_eq!(engine.dou_jun(Branch::Chen, 5, 0).unwrap(), 0);

    let first = engine.fleeting_month(2024, 1, 5, 0, 6).unwrap();
    assert_eq!(first.palace_index, 0);
    assert_eq!((first.stem, first.branch), (Stem::Bing, Branch::Yin));
    assert_eq!(first.palace_name, PalaceName::Travel);

    let months: Vec<u8> = (1..=12u8)
        .map(|m| engine.fleeting_month(2024, m, 5, 0, 6).unwrap().palace_index)
        .collect();
    assert_eq!(months.iter().collect::<HashSet<_>>().len(), 12);
    assert!(engine.fleeting_month(2024, 13, 5, 0, 6).is_err());
}

#[test]
fn test_minor_limit_table_follows_triads() {
    let engine = PeriodEngine::new();
    let table = engine.minor_limit_start_table().unwrap();

    // 申子辰 → 戌, 亥卯未 → 丑, 寅午戌 → 辰, 巳酉丑 → 未
    assert_eq!(table[Branch::Zi.index() as usize], 10);
    assert_eq!(table[Branch::Mao.index() as usize], 1);
    assert_eq!(table[Branch::Wu.index() as usize], 4);
    assert_eq!(table[Branch::You.index() as usize], 7);
    for branch in Branch::ALL {
        for member in Branch::ALL.iter().filter(|b| b.triad() == branch.triad()) {
            assert_eq!(table[branch.index() as usize], table[member.index() as usize]);
        }
    }

    assert_eq!(engine.minor_limit_palace(Branch::Chen, Gender::Male, 1).unwrap(), 10);
    assert_eq!(engine.minor_limit_palace(Branch::Chen, Gender::Female, 3).unwrap(), 8);
    assert!(engine.minor_limit_palace(Branch::Chen, Gender::Male, 121).is_err());
}

#[test]
fn test_options_bound_period_count_and_ceiling() {
    let service = ChartService::new(EngineConfig::default(), fixture_calendar()).unwrap();
    let options = ChartOptions {
        major_period_count: 8,
        age_ceiling: 90,
        ..ChartOptions::default()
    };
    let chart = service
        .compute_with(&BirthInputBuilder::new().build(), &options)
        .unwrap();
    assert_eq!(chart.major_periods.len(), 8);

    let bad = ChartOptions {
        age_ceiling: 200,
        ..ChartOptions::default()
    };
    assert!(service
        .compute_with(&BirthInputBuilder::new().build(), &bad)
        .is_err());
}
