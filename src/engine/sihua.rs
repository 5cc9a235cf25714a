// ==========================================
// 紫微斗数排盘引擎 - 四化引擎
// ==========================================
// 职责: 生年四化 + 宫干四化 + 自化 (离心/向心) + 飞化
// 输入: 年干 / 十二宫干 / 安星结果
// 输出: SihuaTransformation 列表
// ==========================================
// 编码: 禄A 权B 科C 忌D
//   生年 = 字母; 宫干 = P+字母; 离心自化 = x+字母; 向心自化 = i+字母
//   飞化 = 字母→目标宫索引
// ==========================================
// 红线: 离心/向心两种自化独立判定,可同时成立
// 红线: 向心自化只看对宫 (+6) 宫干
// ==========================================

mod core;
mod table;

#[cfg(test)]
mod tests;

pub use core::SihuaEngine;
pub use table::sihua_code;
