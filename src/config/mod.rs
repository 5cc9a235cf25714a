// ==========================================
// 紫微斗数排盘引擎 - 配置层
// ==========================================
// 职责: 缓存 / 运限 / 四化开关配置, 支持文件与环境变量覆写
// ==========================================

pub mod engine_config;

pub use engine_config::{config_keys, env_keys, EngineConfig};
