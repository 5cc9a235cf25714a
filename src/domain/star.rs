// ==========================================
// 紫微斗数排盘引擎 - 星曜字母表
// ==========================================
// 范围: 十四主星 + 8 辅星 + 7 煞星 + 4 桃花星
// ==========================================

use crate::domain::types::StarCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// StarName - 星曜名
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarName {
    // 紫微星系
    Ziwei,
    Tianji,
    Taiyang,
    Wuqu,
    Tiantong,
    Lianzhen,
    // 天府星系
    Tianfu,
    Taiyin,
    Tanlang,
    Jumen,
    Tianxiang,
    Tianliang,
    Qisha,
    Pojun,
    // 辅星
    Wenchang,
    Wenqu,
    Zuofu,
    Youbi,
    Tiankui,
    Tianyue,
    Lucun,
    Tianma,
    // 煞星
    Qingyang,
    Tuoluo,
    Huoxing,
    Lingxing,
    Dikong,
    Dijie,
    Tianxing,
    // 桃花星
    Hongluan,
    Tianxi,
    Tianyao,
    Xianchi,
}

impl StarName {
    pub const MAIN: [StarName; 14] = [
        StarName::Ziwei,
        StarName::Tianji,
        StarName::Taiyang,
        StarName::Wuqu,
        StarName::Tiantong,
        StarName::Lianzhen,
        StarName::Tianfu,
        StarName::Taiyin,
        StarName::Tanlang,
        StarName::Jumen,
        StarName::Tianxiang,
        StarName::Tianliang,
        StarName::Qisha,
        StarName::Pojun,
    ];

    pub const AUXILIARY: [StarName; 8] = [
        StarName::Wenchang,
        StarName::Wenqu,
        StarName::Zuofu,
        StarName::Youbi,
        StarName::Tiankui,
        StarName::Tianyue,
        StarName::Lucun,
        StarName::Tianma,
    ];

    pub const MALEFIC: [StarName; 7] = [
        StarName::Qingyang,
        StarName::Tuoluo,
        StarName::Huoxing,
        StarName::Lingxing,
        StarName::Dikong,
        StarName::Dijie,
        StarName::Tianxing,
    ];

    pub const ROMANCE: [StarName; 4] = [
        StarName::Hongluan,
        StarName::Tianxi,
        StarName::Tianyao,
        StarName::Xianchi,
    ];

    /// 全部星曜（按分类顺序）
    pub fn all() -> impl Iterator<Item = StarName> {
        StarName::MAIN
            .into_iter()
            .chain(StarName::AUXILIARY)
            .chain(StarName::MALEFIC)
            .chain(StarName::ROMANCE)
    }

    pub fn category(self) -> StarCategory {
        match self {
            StarName::Ziwei
            | StarName::Tianji
            | StarName::Taiyang
            | StarName::Wuqu
            | StarName::Tiantong
            | StarName::Lianzhen
            | StarName::Tianfu
            | StarName::Taiyin
            | StarName::Tanlang
            | StarName::Jumen
            | StarName::Tianxiang
            | StarName::Tianliang
            | StarName::Qisha
            | StarName::Pojun => StarCategory::Main,
            StarName::Wenchang
            | StarName::Wenqu
            | StarName::Zuofu
            | StarName::Youbi
            | StarName::Tiankui
            | StarName::Tianyue
            | StarName::Lucun
            | StarName::Tianma => StarCategory::Auxiliary,
            StarName::Qingyang
            | StarName::Tuoluo
            | StarName::Huoxing
            | StarName::Lingxing
            | StarName::Dikong
            | StarName::Dijie
            | StarName::Tianxing => StarCategory::Malefic,
            StarName::Hongluan | StarName::Tianxi | StarName::Tianyao | StarName::Xianchi => {
                StarCategory::Romance
            }
        }
    }

    pub fn is_main(self) -> bool {
        self.category() == StarCategory::Main
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StarName::Ziwei => "紫微",
            StarName::Tianji => "天机",
            StarName::Taiyang => "太阳",
            StarName::Wuqu => "武曲",
            StarName::Tiantong => "天同",
            StarName::Lianzhen => "廉贞",
            StarName::Tianfu => "天府",
            StarName::Taiyin => "太阴",
            StarName::Tanlang => "贪狼",
            StarName::Jumen => "巨门",
            StarName::Tianxiang => "天相",
            StarName::Tianliang => "天梁",
            StarName::Qisha => "七杀",
            StarName::Pojun => "破军",
            StarName::Wenchang => "文昌",
            StarName::Wenqu => "文曲",
            StarName::Zuofu => "左辅",
            StarName::Youbi => "右弼",
            StarName::Tiankui => "天魁",
            StarName::Tianyue => "天钺",
            StarName::Lucun => "禄存",
            StarName::Tianma => "天马",
            StarName::Qingyang => "擎羊",
            StarName::Tuoluo => "陀罗",
            StarName::Huoxing => "火星",
            StarName::Lingxing => "铃星",
            StarName::Dikong => "地空",
            StarName::Dijie => "地劫",
            StarName::Tianxing => "天刑",
            StarName::Hongluan => "红鸾",
            StarName::Tianxi => "天喜",
            StarName::Tianyao => "天姚",
            StarName::Xianchi => "咸池",
        }
    }
}

impl fmt::Display for StarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StarName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // 天空为地空的旧称
        if s == "天空" {
            return Ok(StarName::Dikong);
        }
        StarName::all()
            .find(|star| star.as_str() == s)
            .ok_or_else(|| format!("未知星曜: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_size() {
        assert_eq!(StarName::all().count(), 33);
        assert_eq!(StarName::all().filter(|s| s.is_main()).count(), 14);
    }

    #[test]
    fn test_names_round_trip() {
        for star in StarName::all() {
            assert_eq!(star.as_str().parse::<StarName>().unwrap(), star);
        }
        assert_eq!("天空".parse::<StarName>().unwrap(), StarName::Dikong);
        assert!("北斗".parse::<StarName>().is_err());
    }
}
