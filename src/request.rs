//! 翻译请求构建模块
//!
//! 负责把文本和语言代码拼成上游翻译API的查询串，
//! 再将完整的上游URL编码后作为代理的 `url` 参数。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::api_constants::{is_auto_detect, service_config};
use crate::error::Result;
use crate::languages::{is_supported_language, is_valid_source};
use crate::translation_error;

/// 与浏览器 `encodeURIComponent` 相同的保留字符集
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// 按 `encodeURIComponent` 规则编码
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// 去除首尾空白，与浏览器 `String.prototype.trim` 一致（包括 U+FEFF）
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// 经过校验的翻译请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source_code: String,
    target_code: String,
}

impl TranslationRequest {
    /// 使用默认的500字符上限创建翻译请求
    pub fn new(text: &str, source_code: &str, target_code: &str) -> Result<Self> {
        Self::with_limit(text, source_code, target_code, service_config::MAX_TEXT_CHARS)
    }

    /// 创建翻译请求
    ///
    /// 文本去除首尾空白后必须非空且不超过 `max_chars` 个字符；
    /// 源语言可以是 `auto` 或目录中的代码，目标语言必须是目录中的代码。
    pub fn with_limit(text: &str, source_code: &str, target_code: &str, max_chars: usize) -> Result<Self> {
        let trimmed = trim_text(text);
        if trimmed.is_empty() {
            return Err(translation_error!(input_validation, text, "文本为空"));
        }

        let char_count = trimmed.chars().count();
        if char_count > max_chars {
            return Err(translation_error!(
                input_validation,
                format!("{} 个字符", char_count),
                format!("文本超过 {} 个字符上限", max_chars)
            ));
        }

        if !is_valid_source(source_code) {
            return Err(translation_error!(input_validation, source_code, "不支持的源语言"));
        }

        if !is_supported_language(target_code) {
            return Err(translation_error!(input_validation, target_code, "不支持的目标语言"));
        }

        Ok(Self {
            text: trimmed.to_string(),
            source_code: source_code.to_string(),
            target_code: target_code.to_string(),
        })
    }

    /// 去除首尾空白后的文本
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn target_code(&self) -> &str {
        &self.target_code
    }

    /// 生成经代理转发的请求URL
    pub fn proxied_url(&self, proxy_url: &str, translate_url: &str) -> String {
        build_proxied_url(
            proxy_url,
            translate_url,
            &self.text,
            &self.source_code,
            &self.target_code,
        )
    }
}

/// 构建上游查询串: `[sl=<源>&]dl=<目标>&text=<编码文本>`
pub fn build_inner_query(text: &str, source_code: &str, target_code: &str) -> String {
    let encoded_text = encode_component(trim_text(text));
    if is_auto_detect(source_code) {
        format!("dl={}&text={}", target_code, encoded_text)
    } else {
        format!("sl={}&dl={}&text={}", source_code, target_code, encoded_text)
    }
}

/// 构建上游完整URL
pub fn build_inner_url(translate_url: &str, text: &str, source_code: &str, target_code: &str) -> String {
    format!("{}?{}", translate_url, build_inner_query(text, source_code, target_code))
}

/// 将任意URL包装为代理请求
pub fn wrap_in_proxy(proxy_url: &str, inner_url: &str) -> String {
    let separator = if proxy_url.contains('?') { '&' } else { '?' };
    format!("{}{}url={}", proxy_url, separator, encode_component(inner_url))
}

/// 构建经代理转发的翻译请求URL，纯字符串拼接，不做校验
pub fn build_proxied_url(
    proxy_url: &str,
    translate_url: &str,
    text: &str,
    source_code: &str,
    target_code: &str,
) -> String {
    let inner_url = build_inner_url(translate_url, text, source_code, target_code);
    wrap_in_proxy(proxy_url, &inner_url)
}
