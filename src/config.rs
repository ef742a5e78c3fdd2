//! 配置管理模块
//!
//! 提供CLI参数解析和翻译配置管理功能

// 标准库导入
use std::time::Duration;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::api_constants::{api_config, is_valid_api_url, service_config};
use crate::error::Result;
use crate::translation_error;

/// 翻译配置结构体
///
/// 支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use proxy_translate::config::TranslatorConfig;
///
/// let config = TranslatorConfig::new()
///     .with_proxy_url("http://localhost:8080/get")
///     .strict_missing_field(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// CORS代理地址
    proxy_url: String,
    /// 翻译API地址
    translate_url: String,
    /// 语言列表API地址
    languages_url: String,
    /// 请求超时，None表示不限制
    timeout: Option<Duration>,
    /// 译文字段缺失时是否报错（默认返回占位文本）
    strict_missing_field: bool,
    /// 单次翻译文本的最大字符数
    max_text_chars: usize,
}

impl TranslatorConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - 代理地址: api.allorigins.win
    /// - 翻译API: ftapi.pythonanywhere.com
    /// - 无超时
    /// - 译文缺失时返回占位文本
    pub fn new() -> Self {
        Self {
            proxy_url: api_config::DEFAULT_PROXY_URL.to_string(),
            translate_url: api_config::DEFAULT_TRANSLATE_URL.to_string(),
            languages_url: api_config::DEFAULT_LANGUAGES_URL.to_string(),
            timeout: None,
            strict_missing_field: false,
            max_text_chars: service_config::MAX_TEXT_CHARS,
        }
    }

    /// 获取代理地址
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// 获取翻译API地址
    pub fn translate_url(&self) -> &str {
        &self.translate_url
    }

    /// 获取语言列表API地址
    pub fn languages_url(&self) -> &str {
        &self.languages_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_strict_missing_field(&self) -> bool {
        self.strict_missing_field
    }

    /// 获取单次翻译文本的字符上限
    pub fn max_text_chars(&self) -> usize {
        self.max_text_chars
    }

    /// 设置代理地址
    pub fn with_proxy_url(mut self, url: &str) -> Self {
        self.proxy_url = url.to_string();
        self
    }

    /// 设置翻译API地址
    pub fn with_translate_url(mut self, url: &str) -> Self {
        self.translate_url = url.to_string();
        self
    }

    /// 设置语言列表API地址
    pub fn with_languages_url(mut self, url: &str) -> Self {
        self.languages_url = url.to_string();
        self
    }

    /// 设置请求超时
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 设置译文缺失时是否报错
    pub fn strict_missing_field(mut self, strict: bool) -> Self {
        self.strict_missing_field = strict;
        self
    }

    /// 设置单次翻译文本的字符上限
    pub fn with_max_text_chars(mut self, max_chars: usize) -> Self {
        self.max_text_chars = max_chars;
        self
    }

    /// 校验所有地址均为http(s)
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [
            ("proxy", &self.proxy_url),
            ("api", &self.translate_url),
            ("languages_api", &self.languages_url),
        ] {
            if !is_valid_api_url(url) {
                return Err(translation_error!(config, field, format!("不是有效的http(s)地址: {}", url)));
            }
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(translation_error!(config, "timeout", "超时时间必须大于0"));
        }

        if self.max_text_chars == 0 {
            return Err(translation_error!(config, "max_text_chars", "字符上限必须大于0"));
        }

        Ok(())
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "通过CORS代理调用远程翻译API的命令行翻译工具", long_about = None)]
pub struct Cli {
    /// 待翻译文本 (省略时从标准输入读取)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// 源语言代码 (auto 表示自动检测)
    #[arg(short, long, default_value = service_config::DEFAULT_SOURCE_LANG)]
    pub from: String,

    /// 目标语言代码 (如: te, en, fr, zh-CN)
    #[arg(short, long, default_value = service_config::DEFAULT_TARGET_LANG)]
    pub to: String,

    /// CORS代理地址
    #[arg(long, default_value = api_config::DEFAULT_PROXY_URL)]
    pub proxy: String,

    /// 翻译API地址
    #[arg(long, default_value = api_config::DEFAULT_TRANSLATE_URL)]
    pub api: String,

    /// 语言列表API地址
    #[arg(long, default_value = api_config::DEFAULT_LANGUAGES_URL)]
    pub languages_api: String,

    /// 请求超时时间（秒），默认不限制
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// 单次翻译文本的最大字符数
    #[arg(long, value_name = "CHARS", default_value_t = service_config::MAX_TEXT_CHARS)]
    pub max_chars: usize,

    /// 上游未返回译文时报错而不是输出占位文本
    #[arg(long)]
    pub strict: bool,

    /// 翻译前交换源语言和目标语言
    #[arg(long)]
    pub swap: bool,

    /// 将译文复制到剪贴板
    #[arg(long)]
    pub copy: bool,

    /// 朗读译文
    #[arg(long)]
    pub speak: bool,

    /// 交互模式
    #[arg(short, long)]
    pub interactive: bool,

    /// 列出内置语言目录
    #[arg(long)]
    pub list_languages: bool,

    /// 通过代理获取上游支持的语言
    #[arg(long)]
    pub remote_languages: bool,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出译文和错误)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// 根据命令行参数生成翻译配置
    pub fn translator_config(&self) -> Result<TranslatorConfig> {
        let config = TranslatorConfig::new()
            .with_proxy_url(&self.proxy)
            .with_translate_url(&self.api)
            .with_languages_url(&self.languages_api)
            .with_timeout(self.timeout.map(Duration::from_secs))
            .strict_missing_field(self.strict)
            .with_max_text_chars(self.max_chars);
        config.validate()?;
        Ok(config)
    }
}
