/// 翻译API配置常量
///
/// 该文件定义了代理、翻译服务和会话相关的常量配置，方便统一管理和维护

/// 远程服务地址配置
pub mod api_config {
    /// 默认CORS代理地址（通过 `url` 查询参数转发请求）
    pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/get";

    /// 默认翻译API地址
    pub const DEFAULT_TRANSLATE_URL: &str = "https://ftapi.pythonanywhere.com/translate";

    /// 默认语言列表API地址
    pub const DEFAULT_LANGUAGES_URL: &str = "https://ftapi.pythonanywhere.com/languages";

    /// 代理响应中包裹上游响应体的字段
    pub const PROXY_CONTENTS_FIELD: &str = "contents";

    /// 上游响应中译文所在的字段
    pub const DESTINATION_TEXT_FIELD: &str = "destination-text";
}

/// 翻译服务配置
pub mod service_config {
    /// 自动检测源语言的保留值
    pub const AUTO_DETECT: &str = "auto";

    /// 默认源语言
    pub const DEFAULT_SOURCE_LANG: &str = AUTO_DETECT;

    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "te";

    /// 单次翻译文本的最大字符数
    pub const MAX_TEXT_CHARS: usize = 500;

    /// 上游未返回译文时使用的占位文本
    pub const NO_TRANSLATION_PLACEHOLDER: &str = "No translation available";
}

/// 朗读配置
pub mod speech_config {
    /// 朗读语速
    pub const SPEECH_RATE: f32 = 0.9;

    /// 按优先级尝试的系统朗读程序
    pub const SPEECH_PROGRAMS: &[&str] = &["espeak-ng", "espeak", "say"];
}

/// 错误消息常量
pub mod error_messages {
    /// 展示给用户的统一翻译失败消息
    pub const TRANSLATION_FAILED: &str =
        "Translation failed. Try shorter text or different languages.";
}

/// 实用工具函数
/// 验证API URL是否有效
pub fn is_valid_api_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// 判断源语言是否为自动检测
pub fn is_auto_detect(code: &str) -> bool {
    code == service_config::AUTO_DETECT
}
