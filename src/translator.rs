use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api_constants::{api_config, service_config};
use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::request::wrap_in_proxy;
use crate::translation_error;

/// 翻译服务接口
///
/// 会话控制器只依赖这个接口，便于替换为其他实现。
#[async_trait]
pub trait Translate: Send + Sync {
    /// 请求已构建好的代理URL并返回译文
    async fn translate(&self, url: &str) -> Result<String>;
}

/// 代理响应信封
#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    contents: Option<Value>,
}

/// 通过CORS代理调用翻译API的客户端
#[derive(Debug, Clone)]
pub struct TranslationClient {
    client: Client,
    strict_missing_field: bool,
}

impl TranslationClient {
    /// 根据配置创建客户端
    ///
    /// 未配置超时时不设置请求超时。
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| translation_error!(config, "http_client", e))?;

        Ok(Self {
            client,
            strict_missing_field: config.is_strict_missing_field(),
        })
    }

    /// 使用默认配置创建客户端
    pub fn with_defaults() -> Result<Self> {
        Self::new(&TranslatorConfig::default())
    }

    /// 请求代理并取出 `contents` 中的上游响应体
    async fn fetch_contents(&self, url: &str) -> Result<String> {
        debug!("🌐 请求代理: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(translation_error!(
                network,
                format!("代理返回错误状态: {}", status),
                status.as_u16()
            ));
        }

        let body = response.text().await?;
        parse_proxy_envelope(&body)
    }

    /// 通过代理获取上游支持的语言列表
    pub async fn fetch_languages(&self, proxy_url: &str, languages_url: &str) -> Result<BTreeMap<String, String>> {
        let url = wrap_in_proxy(proxy_url, languages_url);
        let contents = self.fetch_contents(&url).await?;
        let languages = parse_language_map(&contents)?;
        info!("📚 获取到 {} 种上游语言", languages.len());
        Ok(languages)
    }
}

#[async_trait]
impl Translate for TranslationClient {
    async fn translate(&self, url: &str) -> Result<String> {
        let start = Instant::now();
        let contents = self.fetch_contents(url).await?;
        let translated = extract_destination_text(&contents, self.strict_missing_field)?;
        debug!("✅ 翻译完成，耗时 {}", format_duration(start.elapsed()));
        Ok(translated)
    }
}

/// 解析代理信封，返回 `contents` 字段中的字符串
pub fn parse_proxy_envelope(body: &str) -> Result<String> {
    let envelope: ProxyEnvelope = serde_json::from_str(body)?;

    match envelope.contents {
        Some(Value::String(contents)) => Ok(contents),
        Some(Value::Null) | None => Err(translation_error!(
            envelope,
            format!("代理响应缺少 {} 字段", api_config::PROXY_CONTENTS_FIELD)
        )),
        Some(other) => Err(translation_error!(
            envelope,
            format!("{} 字段不是字符串: {}", api_config::PROXY_CONTENTS_FIELD, other)
        )),
    }
}

/// 从上游响应中取出译文
///
/// 字段缺失或为空时返回占位文本；严格模式下返回 `MissingField` 错误。
pub fn extract_destination_text(contents: &str, strict: bool) -> Result<String> {
    let data: Value = serde_json::from_str(contents)?;
    if data.is_null() {
        return Err(translation_error!(envelope, "上游响应为 null"));
    }

    match data.get(api_config::DESTINATION_TEXT_FIELD).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ if strict => Err(translation_error!(missing_field, api_config::DESTINATION_TEXT_FIELD)),
        _ => {
            warn!("⚠️  上游响应缺少译文，使用占位文本");
            Ok(service_config::NO_TRANSLATION_PLACEHOLDER.to_string())
        }
    }
}

/// 解析上游语言列表（代码 → 名称）
pub fn parse_language_map(contents: &str) -> Result<BTreeMap<String, String>> {
    let data: Value = serde_json::from_str(contents)?;
    let object = data
        .as_object()
        .ok_or_else(|| translation_error!(envelope, "语言列表不是JSON对象"))?;

    Ok(object
        .iter()
        .filter_map(|(code, name)| name.as_str().map(|n| (code.clone(), n.to_string())))
        .collect())
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
