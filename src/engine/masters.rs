// ==========================================
// 紫微斗数排盘引擎 - 命主 / 身主
// ==========================================
// 命主: 按命宫地支; 身主: 按年支
// ==========================================

use crate::domain::star::StarName;
use crate::domain::types::Branch;
use crate::error::{ZiweiError, ZiweiResult};

use StarName::*;

/// 命主表 (子..亥)
const LIFE_MASTER: [StarName; 12] = [
    Tanlang, Jumen, Lucun, Wenqu, Lianzhen, Wuqu, Pojun, Wuqu, Lianzhen, Wenqu, Lucun, Jumen,
];

/// 身主表 (子..亥)
const BODY_MASTER: [StarName; 12] = [
    Huoxing, Tianxiang, Tianliang, Tiantong, Wenchang, Tianji, Lingxing, Tianxiang, Tianliang,
    Tiantong, Wenchang, Tianji,
];

pub struct MasterResolver {}

impl MasterResolver {
    pub fn new() -> Self {
        Self {}
    }

    pub fn life_master(&self, life_palace_branch: Branch) -> ZiweiResult<StarName> {
        LIFE_MASTER
            .get(life_palace_branch.index() as usize)
            .copied()
            .ok_or_else(|| {
                ZiweiError::InvalidState(format!("命主表缺少地支 {}", life_palace_branch))
            })
    }

    pub fn body_master(&self, year_branch: Branch) -> ZiweiResult<StarName> {
        BODY_MASTER
            .get(year_branch.index() as usize)
            .copied()
            .ok_or_else(|| ZiweiError::InvalidState(format!("身主表缺少地支 {}", year_branch)))
    }
}

impl Default for MasterResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masters() {
        let resolver = MasterResolver::new();
        // 命宫午 → 破军; 辰年 → 文昌
        assert_eq!(resolver.life_master(Branch::Wu).unwrap(), StarName::Pojun);
        assert_eq!(resolver.body_master(Branch::Chen).unwrap(), StarName::Wenchang);
        assert_eq!(resolver.life_master(Branch::Yin).unwrap(), StarName::Lucun);
        assert_eq!(resolver.body_master(Branch::Zi).unwrap(), StarName::Huoxing);
    }
}
