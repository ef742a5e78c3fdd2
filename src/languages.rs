//! 语言目录模块
//!
//! 静态、有序的受支持语言列表。语言代码在目录内唯一。

use crate::api_constants::is_auto_detect;

/// 受支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// 语言代码 (如: en, te, zh-CN)
    pub code: &'static str,
    /// 显示名称
    pub name: &'static str,
}

/// 语言目录，顺序即展示顺序
pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "🇺🇸 English" },
    Language { code: "te", name: "🇮🇳 Telugu" },
    Language { code: "hi", name: "🇮🇳 Hindi" },
    Language { code: "ta", name: "🇮🇳 Tamil" },
    Language { code: "fr", name: "🇫🇷 French" },
    Language { code: "es", name: "🇪🇸 Spanish" },
    Language { code: "de", name: "🇩🇪 German" },
    Language { code: "it", name: "🇮🇹 Italian" },
    Language { code: "pt", name: "🇵🇹 Portuguese" },
    Language { code: "ru", name: "🇷🇺 Russian" },
    Language { code: "ja", name: "🇯🇵 Japanese" },
    Language { code: "ar", name: "🇸🇦 Arabic" },
    Language { code: "tr", name: "🇹🇷 Turkish" },
    Language { code: "zh-CN", name: "🇨🇳 Chinese (Simplified)" },
];

/// 按代码查找语言
pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// 验证语言代码是否在目录中
pub fn is_supported_language(code: &str) -> bool {
    find_language(code).is_some()
}

/// 验证源语言代码（允许自动检测）
pub fn is_valid_source(code: &str) -> bool {
    is_auto_detect(code) || is_supported_language(code)
}

/// 获取语言的显示名称，未知代码原样返回
pub fn display_name(code: &str) -> &str {
    if is_auto_detect(code) {
        return "🔍 Auto detect";
    }
    find_language(code).map(|lang| lang.name).unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = LANGUAGES.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn test_catalog_order() {
        assert_eq!(LANGUAGES.first().map(|l| l.code), Some("en"));
        assert_eq!(LANGUAGES.last().map(|l| l.code), Some("zh-CN"));
        assert_eq!(LANGUAGES.len(), 14);
    }

    #[test]
    fn test_language_validation() {
        assert!(is_supported_language("te"));
        assert!(is_supported_language("zh-CN"));
        assert!(!is_supported_language("zh-cn"));
        assert!(!is_supported_language("auto"));
        assert!(is_valid_source("auto"));
        assert!(!is_valid_source("xx"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("fr"), "🇫🇷 French");
        assert_eq!(display_name("auto"), "🔍 Auto detect");
        assert_eq!(display_name("xx"), "xx");
    }
}
