// ==========================================
// 紫微斗数排盘引擎 - 领域类型定义
// ==========================================
// 红线: 天干运算一律 mod 10, 地支运算一律 mod 12, 不允许负余数
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 非负取模
#[inline]
pub(crate) fn wrap(value: i32, modulus: i32) -> i32 {
    ((value % modulus) + modulus) % modulus
}

// ==========================================
// 天干 (Heavenly Stem)
// ==========================================
// 索引: 甲=0 … 癸=9, 偶数为阳干
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stem {
    Jia,  // 甲
    Yi,   // 乙
    Bing, // 丙
    Ding, // 丁
    Wu,   // 戊
    Ji,   // 己
    Geng, // 庚
    Xin,  // 辛
    Ren,  // 壬
    Gui,  // 癸
}

const STEM_CHARS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    /// 按索引取天干（循环取模,负数亦可）
    pub fn from_index(index: i32) -> Stem {
        Stem::ALL[wrap(index, 10) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// 阳干: 甲丙戊庚壬
    pub fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// 顺推 n 位
    pub fn offset(self, n: i32) -> Stem {
        Stem::from_index(self.index() as i32 + n)
    }

    pub fn as_str(self) -> &'static str {
        STEM_CHARS[self.index() as usize]
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        STEM_CHARS
            .iter()
            .position(|c| *c == s)
            .map(|i| Stem::ALL[i])
            .ok_or_else(|| format!("无效的天干: {}", s))
    }
}

// ==========================================
// 地支 (Earthly Branch)
// ==========================================
// 索引: 子=0 … 亥=11; 宫位索引即地支索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Branch {
    Zi,   // 子
    Chou, // 丑
    Yin,  // 寅
    Mao,  // 卯
    Chen, // 辰
    Si,   // 巳
    Wu,   // 午
    Wei,  // 未
    Shen, // 申
    You,  // 酉
    Xu,   // 戌
    Hai,  // 亥
}

const BRANCH_CHARS: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    /// 按索引取地支（循环取模,负数亦可）
    pub fn from_index(index: i32) -> Branch {
        Branch::ALL[wrap(index, 12) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn offset(self, n: i32) -> Branch {
        Branch::from_index(self.index() as i32 + n)
    }

    pub fn as_str(self) -> &'static str {
        BRANCH_CHARS[self.index() as usize]
    }

    /// 三合局分组: 申子辰=0, 亥卯未=1, 寅午戌=2, 巳酉丑=3
    pub fn triad(self) -> u8 {
        match self {
            Branch::Shen | Branch::Zi | Branch::Chen => 0,
            Branch::Hai | Branch::Mao | Branch::Wei => 1,
            Branch::Yin | Branch::Wu | Branch::Xu => 2,
            Branch::Si | Branch::You | Branch::Chou => 3,
        }
    }

    /// 地支本气五行
    pub fn element(self) -> Element {
        match self {
            Branch::Zi | Branch::Hai => Element::Water,
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Element::Earth,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Branch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BRANCH_CHARS
            .iter()
            .position(|c| *c == s)
            .map(|i| Branch::ALL[i])
            .ok_or_else(|| format!("无效的地支: {}", s))
    }
}

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,   // 男
    Female, // 女
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    pub fn title_cn(self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "男" => Ok(Gender::Male),
            "female" | "f" | "女" => Ok(Gender::Female),
            other => Err(format!("无效的性别: {}", other)),
        }
    }
}

// ==========================================
// 五行 (Element)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    Water, // 水
    Wood,  // 木
    Metal, // 金
    Earth, // 土
    Fire,  // 火
}

impl Element {
    pub fn title_cn(self) -> &'static str {
        match self {
            Element::Water => "水",
            Element::Wood => "木",
            Element::Metal => "金",
            Element::Earth => "土",
            Element::Fire => "火",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title_cn())
    }
}

// ==========================================
// 五行局 (Five Elements Bureau)
// ==========================================
// 局数 2..6 即起运岁数,亦为紫微定位表的列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bureau {
    Water2, // 水二局
    Wood3,  // 木三局
    Metal4, // 金四局
    Earth5, // 土五局
    Fire6,  // 火六局
}

impl Bureau {
    pub const ALL: [Bureau; 5] = [
        Bureau::Water2,
        Bureau::Wood3,
        Bureau::Metal4,
        Bureau::Earth5,
        Bureau::Fire6,
    ];

    /// 局数
    pub fn cycle_number(self) -> u8 {
        match self {
            Bureau::Water2 => 2,
            Bureau::Wood3 => 3,
            Bureau::Metal4 => 4,
            Bureau::Earth5 => 5,
            Bureau::Fire6 => 6,
        }
    }

    /// 查表列号: 水=0, 木=1, 金=2, 土=3, 火=4
    pub fn column(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        match self {
            Bureau::Water2 => Element::Water,
            Bureau::Wood3 => Element::Wood,
            Bureau::Metal4 => Element::Metal,
            Bureau::Earth5 => Element::Earth,
            Bureau::Fire6 => Element::Fire,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Bureau::Water2 => "水二局",
            Bureau::Wood3 => "木三局",
            Bureau::Metal4 => "金四局",
            Bureau::Earth5 => "土五局",
            Bureau::Fire6 => "火六局",
        }
    }
}

impl fmt::Display for Bureau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Bureau {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bureau::ALL
            .iter()
            .copied()
            .find(|b| b.name() == s.trim())
            .ok_or_else(|| format!("无效的五行局: {}", s))
    }
}

// ==========================================
// 星曜亮度 (Brightness)
// ==========================================
// 顺序: 庙 > 旺 > 得 > 利 > 平 > 不 > 陷
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Brightness {
    Miao, // 庙
    Wang, // 旺
    De,   // 得
    Li,   // 利
    Ping, // 平
    Bu,   // 不
    Xian, // 陷
}

impl Brightness {
    pub fn as_str(self) -> &'static str {
        match self {
            Brightness::Miao => "庙",
            Brightness::Wang => "旺",
            Brightness::De => "得",
            Brightness::Li => "利",
            Brightness::Ping => "平",
            Brightness::Bu => "不",
            Brightness::Xian => "陷",
        }
    }

    /// 从单字解析（亮度表使用）
    pub fn from_char(c: char) -> Option<Brightness> {
        match c {
            '庙' => Some(Brightness::Miao),
            '旺' => Some(Brightness::Wang),
            '得' => Some(Brightness::De),
            '利' => Some(Brightness::Li),
            '平' => Some(Brightness::Ping),
            '不' => Some(Brightness::Bu),
            '陷' => Some(Brightness::Xian),
            _ => None,
        }
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 四化类型 (Sihua Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SihuaType {
    Lu,   // 化禄 A
    Quan, // 化权 B
    Ke,   // 化科 C
    Ji,   // 化忌 D
}

impl SihuaType {
    pub const ALL: [SihuaType; 4] = [SihuaType::Lu, SihuaType::Quan, SihuaType::Ke, SihuaType::Ji];

    /// 固定字母编码: 禄A 权B 科C 忌D
    pub fn letter(self) -> char {
        match self {
            SihuaType::Lu => 'A',
            SihuaType::Quan => 'B',
            SihuaType::Ke => 'C',
            SihuaType::Ji => 'D',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SihuaType::Lu => "禄",
            SihuaType::Quan => "权",
            SihuaType::Ke => "科",
            SihuaType::Ji => "忌",
        }
    }

    pub fn title_cn(self) -> &'static str {
        match self {
            SihuaType::Lu => "化禄",
            SihuaType::Quan => "化权",
            SihuaType::Ke => "化科",
            SihuaType::Ji => "化忌",
        }
    }
}

impl fmt::Display for SihuaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title_cn())
    }
}

// ==========================================
// 四化来源 (Sihua Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SihuaSource {
    Birth,       // 生年四化
    Palace,      // 宫干四化
    SelfOutward, // 离心自化 (本宫干)
    SelfInward,  // 向心自化 (对宫干)
    Flying,      // 飞化
}

impl SihuaSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SihuaSource::Birth => "birth",
            SihuaSource::Palace => "palace",
            SihuaSource::SelfOutward => "self-outward",
            SihuaSource::SelfInward => "self-inward",
            SihuaSource::Flying => "flying",
        }
    }
}

impl fmt::Display for SihuaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 星曜分类 (Star Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarCategory {
    Main,      // 十四主星
    Auxiliary, // 六吉 + 禄存天马
    Malefic,   // 六煞 + 天刑
    Romance,   // 桃花星
    Minor,     // 杂曜
}

impl StarCategory {
    pub fn title_cn(self) -> &'static str {
        match self {
            StarCategory::Main => "主星",
            StarCategory::Auxiliary => "辅星",
            StarCategory::Malefic => "煞星",
            StarCategory::Romance => "桃花星",
            StarCategory::Minor => "杂曜",
        }
    }
}

impl fmt::Display for StarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title_cn())
    }
}

// ==========================================
// 宫名 (Palace Name)
// ==========================================
// 顺序即从命宫逆数的相对序号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PalaceName {
    Life,       // 命宫
    Siblings,   // 兄弟宫
    Spouse,     // 夫妻宫
    Children,   // 子女宫
    Wealth,     // 财帛宫
    Health,     // 疾厄宫
    Travel,     // 迁移宫
    Friends,    // 交友宫
    Career,     // 官禄宫
    Property,   // 田宅宫
    Fortune,    // 福德宫
    Parents,    // 父母宫
}

impl PalaceName {
    pub const ALL: [PalaceName; 12] = [
        PalaceName::Life,
        PalaceName::Siblings,
        PalaceName::Spouse,
        PalaceName::Children,
        PalaceName::Wealth,
        PalaceName::Health,
        PalaceName::Travel,
        PalaceName::Friends,
        PalaceName::Career,
        PalaceName::Property,
        PalaceName::Fortune,
        PalaceName::Parents,
    ];

    /// 相对命宫的序号 (命宫=0)
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// 宫名只由 (地支索引, 命宫索引) 决定,从命宫起逆时针排列
    pub fn at(branch_index: u8, life_index: u8) -> PalaceName {
        PalaceName::ALL[wrap(life_index as i32 - branch_index as i32, 12) as usize]
    }

    /// 宫名所在地支索引
    pub fn branch_index(self, life_index: u8) -> u8 {
        wrap(life_index as i32 - self.ordinal() as i32, 12) as u8
    }

    pub fn title_cn(self) -> &'static str {
        match self {
            PalaceName::Life => "命宫",
            PalaceName::Siblings => "兄弟宫",
            PalaceName::Spouse => "夫妻宫",
            PalaceName::Children => "子女宫",
            PalaceName::Wealth => "财帛宫",
            PalaceName::Health => "疾厄宫",
            PalaceName::Travel => "迁移宫",
            PalaceName::Friends => "交友宫",
            PalaceName::Career => "官禄宫",
            PalaceName::Property => "田宅宫",
            PalaceName::Fortune => "福德宫",
            PalaceName::Parents => "父母宫",
        }
    }
}

impl fmt::Display for PalaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title_cn())
    }
}

impl FromStr for PalaceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PalaceName::ALL
            .iter()
            .copied()
            .find(|p| p.title_cn() == s.trim())
            .ok_or_else(|| format!("无效的宫名: {}", s))
    }
}
