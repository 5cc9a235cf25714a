use crate::domain::star::StarName;
use crate::error::{ZiweiError, ZiweiResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// StarPlacement - 安星结果
// ==========================================
/// 星曜 → 所在地支索引集合
///
/// 目前每颗星恰好落一宫,仍以集合返回,保持接口统一
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarPlacement {
    positions: BTreeMap<StarName, BTreeSet<u8>>,
}

impl StarPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn place(&mut self, star: StarName, index: u8) {
        self.positions.entry(star).or_default().insert(index % 12);
    }

    /// 合并另一组安星结果
    pub fn merge(&mut self, other: StarPlacement) {
        for (star, indices) in other.positions {
            self.positions.entry(star).or_default().extend(indices);
        }
    }

    /// 星曜所在地支索引集合
    pub fn positions_of(&self, star: StarName) -> Option<&BTreeSet<u8>> {
        self.positions.get(&star)
    }

    /// 单宫星曜的位置
    ///
    /// 未安放的星曜报 UnknownStar
    pub fn position(&self, star: StarName) -> ZiweiResult<u8> {
        self.positions
            .get(&star)
            .and_then(|set| set.iter().next().copied())
            .ok_or_else(|| ZiweiError::UnknownStar(star.as_str().to_string()))
    }

    /// 按中文星名查位置
    pub fn position_by_name(&self, name: &str) -> ZiweiResult<u8> {
        let star: StarName = name
            .parse()
            .map_err(|_| ZiweiError::UnknownStar(name.to_string()))?;
        self.position(star)
    }

    /// 某宫内的全部星曜（按字母表顺序）
    pub fn stars_at(&self, index: u8) -> Vec<StarName> {
        self.positions
            .iter()
            .filter(|(_, set)| set.contains(&index))
            .map(|(star, _)| *star)
            .collect()
    }

    pub fn contains(&self, star: StarName) -> bool {
        self.positions.contains_key(&star)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StarName, &BTreeSet<u8>)> {
        self.positions.iter()
    }
}
