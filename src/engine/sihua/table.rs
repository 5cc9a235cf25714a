use crate::domain::star::StarName;
use crate::domain::types::{SihuaSource, SihuaType};

use StarName::*;

/// 十干四化表: [禄, 权, 科, 忌]
pub(super) const SIHUA_TABLE: [[StarName; 4]; 10] = [
    [Lianzhen, Pojun, Wuqu, Taiyang],      // 甲
    [Tianji, Tianliang, Ziwei, Taiyin],    // 乙
    [Tiantong, Tianji, Wenchang, Lianzhen], // 丙
    [Taiyin, Tiantong, Tianji, Jumen],     // 丁
    [Tanlang, Taiyin, Youbi, Tianji],      // 戊
    [Wuqu, Tanlang, Tianliang, Wenqu],     // 己
    [Taiyang, Wuqu, Taiyin, Tiantong],     // 庚
    [Jumen, Taiyang, Wenqu, Wenchang],     // 辛
    [Tianliang, Ziwei, Zuofu, Wuqu],       // 壬
    [Pojun, Jumen, Taiyin, Tanlang],       // 癸
];

/// 四化编码
///
/// 飞化编码需附目标宫,由调用方传入
pub fn sihua_code(source: SihuaSource, sihua_type: SihuaType, target: Option<u8>) -> String {
    let letter = sihua_type.letter();
    match source {
        SihuaSource::Birth => letter.to_string(),
        SihuaSource::Palace => format!("P{}", letter),
        SihuaSource::SelfOutward => format!("x{}", letter),
        SihuaSource::SelfInward => format!("i{}", letter),
        SihuaSource::Flying => match target {
            Some(t) => format!("{}→{}", letter, t),
            None => letter.to_string(),
        },
    }
}
