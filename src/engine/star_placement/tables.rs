// ==========================================
// 安星查表
// ==========================================

use crate::domain::star::StarName;

/// 紫微定位表: [农历日 - 1][局列]
///
/// 列: 水二 / 木三 / 金四 / 土五 / 火六
/// 值: 紫微所在地支索引
pub(super) const ZIWEI_TABLE: [[u8; 5]; 30] = [
    [1, 4, 11, 6, 9],   // 1
    [2, 1, 4, 11, 6],   // 2
    [2, 2, 1, 4, 11],   // 3
    [3, 5, 2, 1, 4],    // 4
    [3, 2, 0, 2, 1],    // 5
    [4, 3, 5, 7, 2],    // 6
    [4, 6, 2, 0, 10],   // 7
    [5, 3, 3, 5, 7],    // 8
    [5, 4, 1, 2, 0],    // 9
    [6, 7, 6, 3, 5],    // 10
    [6, 4, 3, 8, 2],    // 11
    [7, 5, 4, 1, 3],    // 12
    [7, 8, 2, 6, 11],   // 13
    [8, 5, 7, 3, 8],    // 14
    [8, 6, 4, 4, 1],    // 15
    [9, 9, 5, 9, 6],    // 16
    [9, 6, 3, 2, 3],    // 17
    [10, 7, 8, 7, 4],   // 18
    [10, 10, 5, 4, 0],  // 19
    [11, 7, 6, 5, 9],   // 20
    [11, 8, 4, 10, 2],  // 21
    [0, 11, 9, 3, 7],   // 22
    [0, 8, 6, 8, 4],    // 23
    [1, 9, 7, 5, 5],    // 24
    [1, 0, 5, 6, 1],    // 25
    [2, 9, 10, 11, 10], // 26
    [2, 10, 7, 4, 3],   // 27
    [3, 1, 8, 9, 8],    // 28
    [3, 10, 6, 6, 5],   // 29
    [4, 11, 11, 7, 6],  // 30
];

/// 天府相对紫微的固定偏移: 天府与紫微以寅申线对称
pub(super) const TIANFU_OFFSET: [u8; 12] = [4, 2, 0, 10, 8, 6, 4, 2, 0, 10, 8, 6];

/// 紫微星系: 自紫微逆时针
pub(super) const ZIWEI_SERIES: [(StarName, i32); 6] = [
    (StarName::Ziwei, 0),
    (StarName::Tianji, -1),
    (StarName::Taiyang, -3),
    (StarName::Wuqu, -4),
    (StarName::Tiantong, -5),
    (StarName::Lianzhen, -8),
];

/// 天府星系: 自天府顺时针
pub(super) const TIANFU_SERIES: [(StarName, i32); 8] = [
    (StarName::Tianfu, 0),
    (StarName::Taiyin, 1),
    (StarName::Tanlang, 2),
    (StarName::Jumen, 3),
    (StarName::Tianxiang, 4),
    (StarName::Tianliang, 5),
    (StarName::Qisha, 6),
    (StarName::Pojun, 10),
];

/// 天魁 / 天钺 (按年干)
pub(super) const KUI_YUE: [(u8, u8); 10] = [
    (1, 7),  // 甲
    (0, 8),  // 乙
    (11, 9), // 丙
    (11, 9), // 丁
    (1, 7),  // 戊
    (0, 8),  // 己
    (1, 7),  // 庚
    (6, 2),  // 辛
    (3, 5),  // 壬
    (3, 5),  // 癸
];

/// 禄存 (按年干)
pub(super) const LUCUN: [u8; 10] = [2, 3, 5, 6, 5, 6, 8, 9, 11, 0];

/// 三合分组: 申子辰 / 亥卯未 / 寅午戌 / 巳酉丑
/// 天马: 寅 / 巳 / 申 / 亥
pub(super) const TIANMA: [u8; 4] = [2, 5, 8, 11];

/// 火星起宫: 寅 / 酉 / 丑 / 卯
pub(super) const HUOXING_BASE: [u8; 4] = [2, 9, 1, 3];

/// 铃星起宫: 戌 / 戌 / 卯 / 戌
pub(super) const LINGXING_BASE: [u8; 4] = [10, 10, 3, 10];

/// 咸池: 酉 / 子 / 卯 / 午
pub(super) const XIANCHI: [u8; 4] = [9, 0, 3, 6];

/// 天府位置 = (紫微 + 偏移) mod 12
pub fn tianfu_offset(ziwei_index: u8) -> Option<u8> {
    TIANFU_OFFSET.get(ziwei_index as usize).copied()
}
