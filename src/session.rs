//! 翻译会话模块
//!
//! 会话状态是一个显式的 `SessionState` 值，状态转换由下面几个纯函数完成：
//! - `begin_translation`: Idle/Success/Failed -> Loading
//! - `complete_translation`: Loading -> Success / Failed
//! - `abandon_translation`: 请求被取消时 Loading -> Idle
//! - `swap_languages`: 任意状态下交换源语言和目标语言
//!
//! `TranslationSession` 在这些函数之上编排网络调用、剪贴板和朗读。

use tracing::{debug, info, warn};

use crate::api_constants::{error_messages, service_config, speech_config};
use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::facilities::{Clipboard, CommandSpeech, Speech, SystemClipboard, Utterance};
use crate::languages::{is_supported_language, is_valid_source};
use crate::request::{trim_text, TranslationRequest};
use crate::translation_error;
use crate::translator::Translate;

/// 会话所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// 单个会话的全部状态
///
/// `loading` 为真时 `translated` 和 `error` 均为空；
/// 请求结束后两者恰有一个被设置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub translated: String,
    pub loading: bool,
    pub error: String,
    /// 每次发起翻译或重置时递增，用于丢弃过期响应
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            source_lang: service_config::DEFAULT_SOURCE_LANG.to_string(),
            target_lang: service_config::DEFAULT_TARGET_LANG.to_string(),
            translated: String::new(),
            loading: false,
            error: String::new(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if !self.error.is_empty() {
            Phase::Failed
        } else if !self.translated.is_empty() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// 一次进行中翻译的凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// 发起翻译的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// 已进入 Loading 状态
    Started(Ticket),
    /// 文本为空白，状态未变
    Blank,
    /// 已有翻译在进行中，状态未变
    Busy,
}

/// 发起翻译: 清空上次结果并进入 Loading
pub fn begin_translation(state: &mut SessionState) -> BeginOutcome {
    if trim_text(&state.text).is_empty() {
        return BeginOutcome::Blank;
    }
    if state.loading {
        return BeginOutcome::Busy;
    }

    state.generation += 1;
    state.translated.clear();
    state.error.clear();
    state.loading = true;

    BeginOutcome::Started(Ticket {
        generation: state.generation,
    })
}

/// 应用翻译结果
///
/// 凭据已过期（之后又发起过翻译或会话被重置）时丢弃结果并返回 false。
/// 任何错误都折叠为同一条用户可见消息。
pub fn complete_translation(state: &mut SessionState, ticket: Ticket, result: Result<String>) -> bool {
    if !state.loading || ticket.generation != state.generation {
        debug!(
            "丢弃过期的翻译结果: ticket={}, current={}",
            ticket.generation, state.generation
        );
        return false;
    }

    state.loading = false;
    match result {
        Ok(translated) if translated.is_empty() => {
            warn!("⚠️  翻译服务返回空译文，使用占位文本");
            state.translated = service_config::NO_TRANSLATION_PLACEHOLDER.to_string();
            state.error.clear();
        },
        Ok(translated) => {
            state.translated = translated;
            state.error.clear();
        },
        Err(e) => {
            warn!("❌ 翻译失败: {}", e);
            state.translated.clear();
            state.error = error_messages::TRANSLATION_FAILED.to_string();
        },
    }
    true
}

/// 放弃进行中的翻译，回到 Idle 并使凭据失效
///
/// 凭据已过期时不做任何事并返回 false。
pub fn abandon_translation(state: &mut SessionState, ticket: Ticket) -> bool {
    if !state.loading || ticket.generation != state.generation {
        return false;
    }

    debug!("翻译请求被取消: ticket={}", ticket.generation);
    state.loading = false;
    state.generation += 1;
    true
}

/// 进行中的翻译，在结果返回前被丢弃时撤销 Loading
struct PendingTranslation<'a> {
    state: &'a mut SessionState,
    ticket: Ticket,
    settled: bool,
}

impl PendingTranslation<'_> {
    fn settle(mut self, result: Result<String>) {
        self.settled = true;
        complete_translation(&mut *self.state, self.ticket, result);
    }
}

impl Drop for PendingTranslation<'_> {
    fn drop(&mut self) {
        if !self.settled {
            abandon_translation(&mut *self.state, self.ticket);
        }
    }
}

/// 交换源语言和目标语言，不影响其他字段
pub fn swap_languages(state: &mut SessionState) {
    std::mem::swap(&mut state.source_lang, &mut state.target_lang);
}

/// 重置会话，使所有进行中的翻译失效
pub fn reset_session(state: &mut SessionState) {
    let generation = state.generation + 1;
    *state = SessionState {
        generation,
        ..SessionState::new()
    };
}

/// `TranslationSession::translate` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// 翻译成功，附带译文
    Translated(String),
    /// 翻译失败，附带用户可见的错误消息
    Failed(String),
    /// 文本为空白，未发送请求
    Blank,
    /// 已有翻译在进行中
    Busy,
}

/// 翻译会话控制器
pub struct TranslationSession<T: Translate> {
    state: SessionState,
    translator: T,
    clipboard: Box<dyn Clipboard>,
    speech: Box<dyn Speech>,
    config: TranslatorConfig,
}

impl<T: Translate> TranslationSession<T> {
    /// 使用系统剪贴板和系统朗读程序创建会话
    pub fn new(translator: T, config: TranslatorConfig) -> Self {
        Self {
            state: SessionState::new(),
            translator,
            clipboard: Box::new(SystemClipboard),
            speech: Box::new(CommandSpeech::detect()),
            config,
        }
    }

    /// 替换剪贴板设施
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// 替换朗读设施
    pub fn with_speech(mut self, speech: Box<dyn Speech>) -> Self {
        self.speech = speech;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn set_text(&mut self, text: &str) {
        self.state.text = text.to_string();
    }

    /// 设置源语言，允许 `auto`
    pub fn set_source_lang(&mut self, code: &str) -> Result<()> {
        if !is_valid_source(code) {
            return Err(translation_error!(input_validation, code, "不支持的源语言"));
        }
        self.state.source_lang = code.to_string();
        Ok(())
    }

    /// 设置目标语言
    pub fn set_target_lang(&mut self, code: &str) -> Result<()> {
        if !is_supported_language(code) {
            return Err(translation_error!(input_validation, code, "不支持的目标语言"));
        }
        self.state.target_lang = code.to_string();
        Ok(())
    }

    pub fn swap(&mut self) {
        swap_languages(&mut self.state);
        debug!(
            "🔁 交换语言: {} -> {}",
            self.state.source_lang, self.state.target_lang
        );
    }

    pub fn reset(&mut self) {
        reset_session(&mut self.state);
    }

    /// 翻译当前文本
    ///
    /// 返回的future在完成前被丢弃（超时、select!等）时会话回到 Idle。
    pub async fn translate(&mut self) -> TranslateOutcome {
        let ticket = match begin_translation(&mut self.state) {
            BeginOutcome::Started(ticket) => ticket,
            BeginOutcome::Blank => return TranslateOutcome::Blank,
            BeginOutcome::Busy => return TranslateOutcome::Busy,
        };

        info!(
            "🚀 开始翻译: {} -> {}",
            self.state.source_lang, self.state.target_lang
        );

        let url = TranslationRequest::with_limit(
            &self.state.text,
            &self.state.source_lang,
            &self.state.target_lang,
            self.config.max_text_chars(),
        )
        .map(|request| request.proxied_url(self.config.proxy_url(), self.config.translate_url()));

        let pending = PendingTranslation {
            state: &mut self.state,
            ticket,
            settled: false,
        };
        let result = match url {
            Ok(url) => self.translator.translate(&url).await,
            Err(e) => Err(e),
        };
        pending.settle(result);

        if self.state.error.is_empty() {
            TranslateOutcome::Translated(self.state.translated.clone())
        } else {
            TranslateOutcome::Failed(self.state.error.clone())
        }
    }

    /// 复制译文到剪贴板，无译文时不做任何事并返回 false
    pub fn copy(&mut self) -> Result<bool> {
        if self.state.translated.is_empty() {
            return Ok(false);
        }
        self.clipboard.write_text(&self.state.translated)?;
        Ok(true)
    }

    /// 朗读译文，无译文或朗读设施不可用时返回 false
    pub fn speak(&mut self) -> Result<bool> {
        if self.state.translated.is_empty() || !self.speech.is_available() {
            return Ok(false);
        }
        let utterance = Utterance {
            text: self.state.translated.clone(),
            lang: self.state.target_lang.clone(),
            rate: speech_config::SPEECH_RATE,
        };
        self.speech.speak(&utterance)?;
        Ok(true)
    }
}
