// ==========================================
// 引擎层单元测试公共样本
// ==========================================

use crate::domain::chart::{EightCharacters, LunarDate, Pillar};
use crate::domain::types::{Branch, Bureau, Stem};
use crate::engine::star_placement::{StarPlacement, StarPlacementEngine};

/// 1988-06-20 23:00 → 农历戊辰年五月初七子时, 八字 戊辰 戊午 丙午 戊子
pub(crate) fn sample_lunar_1988() -> LunarDate {
    let pillars = EightCharacters {
        year: Pillar::new(Stem::Wu, Branch::Chen),
        month: Pillar::new(Stem::Wu, Branch::Wu),
        day: Pillar::new(Stem::Bing, Branch::Wu),
        hour: Pillar::new(Stem::Wu, Branch::Zi),
    };
    LunarDate::new(1988, 5, 7, 23, false, pillars).unwrap()
}

/// 样本命盘全盘安星 (火六局)
pub(crate) fn sample_placement_1988() -> StarPlacement {
    StarPlacementEngine::new()
        .place_all(&sample_lunar_1988(), Bureau::Fire6)
        .unwrap()
}
