// ==========================================
// 干支换算辅助
// ==========================================
// 年柱: 公元 4 年甲子
// 月柱: 五虎遁 (寅月为正月)
// 日柱: 儒略日序号, (JDN + 49) mod 60
// 时柱: 五鼠遁 (23 点起子时, 不换日)
// ==========================================

use crate::domain::chart::Pillar;
use crate::domain::types::{Branch, Stem};
use crate::engine::palace::five_tigers_start;
use crate::error::{check_branch_index, check_month, ZiweiError, ZiweiResult};
use chrono::{Datelike, NaiveDate};

/// 公历 0001-01-01 的儒略日序号减一
const JDN_CE_OFFSET: i64 = 1_721_425;

/// 农历年 → 年柱
pub fn year_pillar(lunar_year: i32) -> Pillar {
    Pillar::from_sexagenary(lunar_year - 4)
}

/// 年干 + 农历月 → 月柱
pub fn month_pillar(year_stem: Stem, lunar_month: u8) -> ZiweiResult<Pillar> {
    let month = check_month(lunar_month)? as i32;
    Ok(Pillar::new(
        five_tigers_start(year_stem).offset(month - 1),
        Branch::from_index(month + 1),
    ))
}

/// 公历日期 → 日柱
pub fn day_pillar(date: NaiveDate) -> Pillar {
    let jdn = date.num_days_from_ce() as i64 + JDN_CE_OFFSET;
    Pillar::from_sexagenary(((jdn + 49) % 60) as i32)
}

/// 钟点 → 时辰索引; 23 点与 0 点同为子时
pub fn hour_branch_index(clock_hour: u32) -> ZiweiResult<u8> {
    if clock_hour > 23 {
        return Err(ZiweiError::invalid_argument(
            "hour",
            format!("钟点必须在 0..=23, 实际为 {}", clock_hour),
        ));
    }
    Ok((((clock_hour + 1) / 2) % 12) as u8)
}

/// 日干 + 时辰 → 时柱 (五鼠遁: 甲己起甲子)
pub fn hour_pillar(day_stem: Stem, hour_branch: u8) -> ZiweiResult<Pillar> {
    let hour = check_branch_index("hour_branch_index", hour_branch)? as i32;
    let start = Stem::from_index((day_stem.index() % 5) as i32 * 2);
    Ok(Pillar::new(start.offset(hour), Branch::from_index(hour)))
}
