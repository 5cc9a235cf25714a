// ==========================================
// 紫微斗数排盘引擎 - 宫位关系
// ==========================================
// 对宫 (+6) / 三合 (+4,+8) / 四正 (+3,+6,+9) / 三方四正 / 夹宫
// 所有关系均按地支索引 mod 12 计算,成员关系对称
// ==========================================

use crate::domain::types::wrap;
use crate::error::{check_branch_index, ZiweiResult};

fn shifted(index: u8, offsets: &[i32]) -> ZiweiResult<Vec<u8>> {
    let index = check_branch_index("palace_index", index)? as i32;
    Ok(offsets
        .iter()
        .map(|offset| wrap(index + offset, 12) as u8)
        .collect())
}

/// 对宫
///
/// 自化的向心检查只使用对宫,不套用三合/四正的偏移
pub fn opposite(index: u8) -> ZiweiResult<u8> {
    let index = check_branch_index("palace_index", index)?;
    Ok((index + 6) % 12)
}

/// 三合宫（含本宫）
pub fn trinity(index: u8) -> ZiweiResult<Vec<u8>> {
    shifted(index, &[0, 4, 8])
}

/// 四正宫（含本宫）
pub fn square(index: u8) -> ZiweiResult<Vec<u8>> {
    shifted(index, &[0, 3, 6, 9])
}

/// 三方四正: 本宫 + 三合 + 对宫
pub fn sanfang_sizheng(index: u8) -> ZiweiResult<Vec<u8>> {
    shifted(index, &[0, 4, 8, 6])
}

/// 夹宫: 左右邻宫
pub fn adjacent(index: u8) -> ZiweiResult<Vec<u8>> {
    shifted(index, &[-1, 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_involution() {
        for i in 0..12u8 {
            let o = opposite(i).unwrap();
            assert_ne!(o, i);
            assert_eq!(opposite(o).unwrap(), i);
        }
    }

    #[test]
    fn test_relations_are_symmetric() {
        let families: [fn(u8) -> ZiweiResult<Vec<u8>>; 4] =
            [trinity, square, sanfang_sizheng, adjacent];
        for relation in families {
            for i in 0..12u8 {
                for j in relation(i).unwrap() {
                    assert!(relation(j).unwrap().contains(&i), "{} ~ {}", i, j);
                }
            }
        }
    }

    #[test]
    fn test_relation_members() {
        assert_eq!(trinity(6).unwrap(), vec![6, 10, 2]);
        assert_eq!(square(0).unwrap(), vec![0, 3, 6, 9]);
        assert_eq!(sanfang_sizheng(6).unwrap(), vec![6, 10, 2, 0]);
        assert_eq!(adjacent(0).unwrap(), vec![11, 1]);
        assert!(trinity(12).is_err());
        assert!(opposite(12).is_err());
    }
}
