//! 统一错误处理模块
//!
//! 提供proxy-translate项目的统一错误类型定义和处理机制

// 标准库导入
use std::fmt;

/// proxy-translate 统一错误类型
///
/// 网络、信封解析和缺失字段三类错误对应翻译客户端的失败模式，
/// 其余变体覆盖输入校验、配置和本地设施（剪贴板、朗读）。
#[derive(Debug)]
pub enum TranslationError {
    /// 网络请求相关错误（连接失败、DNS失败、非2xx状态码）
    Network {
        /// 错误消息
        message: String,
        /// HTTP状态码（如果适用）
        status_code: Option<u16>,
    },

    /// 代理或上游响应结构不符合预期
    EnvelopeParse {
        /// 具体错误信息
        details: String,
    },

    /// 上游响应缺少译文字段（仅在严格模式下作为错误返回）
    MissingField {
        /// 字段名
        field: String,
    },

    /// 输入验证错误
    InputValidation {
        /// 输入值
        input: String,
        /// 验证失败原因
        reason: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 剪贴板或朗读设施错误
    Facility {
        /// 设施名称
        facility: String,
        /// 错误详情
        details: String,
    },
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Network { message, status_code } => {
                if let Some(code) = status_code {
                    write!(f, "网络请求失败 [{}]: {}", code, message)
                } else {
                    write!(f, "网络请求失败: {}", message)
                }
            },
            TranslationError::EnvelopeParse { details } => {
                write!(f, "响应解析失败: {}", details)
            },
            TranslationError::MissingField { field } => {
                write!(f, "响应缺少字段: {}", field)
            },
            TranslationError::InputValidation { input, reason } => {
                write!(f, "输入验证失败 [{}]: {}", input, reason)
            },
            TranslationError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            },
            TranslationError::Facility { facility, details } => {
                write!(f, "{}不可用: {}", facility, details)
            },
        }
    }
}

impl std::error::Error for TranslationError {}

/// proxy-translate 结果类型别名
pub type Result<T> = std::result::Result<T, TranslationError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! translation_error {
    (network, $msg:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
            status_code: None,
        }
    };
    (network, $msg:expr, $code:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
            status_code: Some($code),
        }
    };
    (envelope, $details:expr) => {
        $crate::error::TranslationError::EnvelopeParse {
            details: $details.to_string(),
        }
    };
    (missing_field, $field:expr) => {
        $crate::error::TranslationError::MissingField {
            field: $field.to_string(),
        }
    };
    (input_validation, $input:expr, $reason:expr) => {
        $crate::error::TranslationError::InputValidation {
            input: $input.to_string(),
            reason: $reason.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::TranslationError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
    (facility, $facility:expr, $details:expr) => {
        $crate::error::TranslationError::Facility {
            facility: $facility.to_string(),
            details: $details.to_string(),
        }
    };
}

/// 从reqwest::Error转换为TranslationError
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return TranslationError::EnvelopeParse {
                details: error.to_string(),
            };
        }
        let status_code = error.status().map(|s| s.as_u16());
        TranslationError::Network {
            message: error.to_string(),
            status_code,
        }
    }
}

/// 从serde_json::Error转换为TranslationError
impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::EnvelopeParse {
            details: error.to_string(),
        }
    }
}
