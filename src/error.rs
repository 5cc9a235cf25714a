// ==========================================
// 紫微斗数排盘引擎 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 查表缺键必须报错,不允许静默回退默认值
// ==========================================

use thiserror::Error;

/// 排盘引擎错误类型
#[derive(Error, Debug)]
pub enum ZiweiError {
    // ===== 调用方错误 =====
    #[error("参数越界 (field={field}): {message}")]
    InvalidArgument { field: String, message: String },

    #[error("未知星曜: {0}")]
    UnknownStar(String),

    // ===== 内部表错误 =====
    #[error("内部状态错误: {0}")]
    InvalidState(String),

    // ===== 外部协作方错误 =====
    #[error("历法转换失败: {0}")]
    Calendar(String),

    #[error("配置错误: {0}")]
    Config(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ZiweiError {
    /// 构造参数越界错误
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        ZiweiError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 是否为调用方参数错误
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ZiweiError::InvalidArgument { .. } | ZiweiError::UnknownStar(_)
        )
    }
}

/// 排盘结果类型别名
pub type ZiweiResult<T> = Result<T, ZiweiError>;

// ==========================================
// 定义域校验辅助
// ==========================================

/// 校验农历月份 (1..=12)
pub(crate) fn check_month(month: u8) -> ZiweiResult<u8> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ZiweiError::invalid_argument(
            "month",
            format!("农历月份必须在 1..=12, 实际为 {}", month),
        ))
    }
}

/// 校验宫位/地支索引 (0..=11)
pub(crate) fn check_branch_index(field: &str, index: u8) -> ZiweiResult<u8> {
    if index < 12 {
        Ok(index)
    } else {
        Err(ZiweiError::invalid_argument(
            field,
            format!("地支索引必须在 0..=11, 实际为 {}", index),
        ))
    }
}

/// 校验农历日 (1..=30)
pub(crate) fn check_lunar_day(day: u8) -> ZiweiResult<u8> {
    if (1..=30).contains(&day) {
        Ok(day)
    } else {
        Err(ZiweiError::invalid_argument(
            "day",
            format!("农历日必须在 1..=30, 实际为 {}", day),
        ))
    }
}
