// ==========================================
// 紫微斗数排盘引擎 - 引擎配置
// ==========================================
// 来源优先级: 环境变量 > 配置文件 > 默认值
// 配置文件: <config_dir>/ziwei-chart/config.json
// ==========================================

use crate::engine::period::MAX_AGE_CEILING;
use crate::error::{ZiweiError, ZiweiResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // 缓存
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,

    // 运限
    pub age_ceiling: u16,
    pub major_period_count: u8,

    // 四化
    pub include_self_transformations: bool,
    pub include_palace_transformations: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_secs: 3600,
            cache_max_entries: 100,
            age_ceiling: 120,
            major_period_count: 12,
            include_self_transformations: true,
            include_palace_transformations: true,
        }
    }
}

impl EngineConfig {
    // ==========================================
    // 加载
    // ==========================================

    /// 从 JSON 字符串解析; 缺省字段取默认值
    pub fn from_json_str(json: &str) -> ZiweiResult<Self> {
        serde_json::from_str(json).map_err(|e| ZiweiError::Config(format!("配置 JSON 解析失败: {}", e)))
    }

    /// 从 JSON 文件加载
    pub fn from_json_file(path: impl AsRef<Path>) -> ZiweiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = Self::from_json_str(&content)?;
        debug!(path = %path.display(), "配置文件已加载");
        Ok(config)
    }

    /// 默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ziwei-chart").join("config.json"))
    }

    /// 默认路径存在则读文件, 否则取默认值; 再叠加环境变量并校验
    pub fn load() -> ZiweiResult<Self> {
        let mut config = match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_json_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        info!(
            cache_enabled = config.cache_enabled,
            cache_ttl_secs = config.cache_ttl_secs,
            cache_max_entries = config.cache_max_entries,
            "引擎配置加载完成"
        );
        Ok(config)
    }

    // ==========================================
    // 环境变量覆写
    // ==========================================

    /// 读取进程环境变量覆写
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// 按给定的取值函数覆写; 无法解析的值记 warn 并保留原值
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_override(&lookup, env_keys::CACHE_TTL_SECS) {
            self.cache_ttl_secs = v;
        }
        if let Some(v) = parse_override(&lookup, env_keys::CACHE_MAX_ENTRIES) {
            self.cache_max_entries = v;
        }
        if let Some(v) = parse_override(&lookup, env_keys::CACHE_ENABLED) {
            self.cache_enabled = v;
        }
        if let Some(v) = parse_override(&lookup, env_keys::AGE_CEILING) {
            self.age_ceiling = v;
        }
    }

    // ==========================================
    // 校验 / 快照
    // ==========================================

    pub fn validate(&self) -> ZiweiResult<()> {
        if self.cache_enabled && self.cache_max_entries == 0 {
            return Err(ZiweiError::Config(format!(
                "{} 在启用缓存时不能为 0",
                config_keys::CACHE_MAX_ENTRIES
            )));
        }
        if self.age_ceiling == 0 || self.age_ceiling > MAX_AGE_CEILING {
            return Err(ZiweiError::Config(format!(
                "{} 必须在 1..={}, 实际为 {}",
                config_keys::AGE_CEILING,
                MAX_AGE_CEILING,
                self.age_ceiling
            )));
        }
        if self.major_period_count == 0 || self.major_period_count > 12 {
            return Err(ZiweiError::Config(format!(
                "{} 必须在 1..=12, 实际为 {}",
                config_keys::MAJOR_PERIOD_COUNT,
                self.major_period_count
            )));
        }
        Ok(())
    }

    /// 配置快照 (JSON), 便于随结果记录
    pub fn snapshot(&self) -> ZiweiResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ZiweiError::Config(format!("配置序列化失败: {}", e)))
    }
}

fn parse_override<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(env = name, raw_value = %raw, "环境变量格式错误, 忽略覆写");
            None
        }
    }
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 缓存
    pub const CACHE_ENABLED: &str = "cache_enabled";
    pub const CACHE_TTL_SECS: &str = "cache_ttl_secs";
    pub const CACHE_MAX_ENTRIES: &str = "cache_max_entries";

    // 运限
    pub const AGE_CEILING: &str = "age_ceiling";
    pub const MAJOR_PERIOD_COUNT: &str = "major_period_count";

    // 四化
    pub const INCLUDE_SELF_TRANSFORMATIONS: &str = "include_self_transformations";
    pub const INCLUDE_PALACE_TRANSFORMATIONS: &str = "include_palace_transformations";
}

/// 环境变量名
pub mod env_keys {
    pub const CACHE_TTL_SECS: &str = "ZIWEI_CHART_CACHE_TTL_SECS";
    pub const CACHE_MAX_ENTRIES: &str = "ZIWEI_CHART_CACHE_MAX_ENTRIES";
    pub const CACHE_ENABLED: &str = "ZIWEI_CHART_CACHE_ENABLED";
    pub const AGE_CEILING: &str = "ZIWEI_CHART_AGE_CEILING";
}
