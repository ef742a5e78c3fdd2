//! 运行环境设施模块
//!
//! 剪贴板和语音朗读的抽象接口及桌面实现：
//! - `SystemClipboard` 通过 cli-clipboard 写入系统剪贴板
//! - `CommandSpeech` 调用 PATH 中的系统朗读程序，前一句读完后再读下一句

use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use cli_clipboard::{ClipboardContext, ClipboardProvider};
use tracing::debug;

use crate::api_constants::speech_config;
use crate::error::Result;
use crate::translation_error;

/// 待朗读的语音片段
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// 语言标签 (如: te, zh-CN)
    pub lang: String,
    /// 语速，1.0 为正常
    pub rate: f32,
}

/// 剪贴板设施
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// 语音朗读设施
pub trait Speech: Send {
    /// 设施是否可用
    fn is_available(&self) -> bool;

    /// 将语音片段加入朗读队列
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;
}

/// 系统剪贴板
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        // cli-clipboard 的错误类型不是 Send，就地转为字符串
        let mut ctx = ClipboardContext::new()
            .map_err(|e| translation_error!(facility, "剪贴板", e.to_string()))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| translation_error!(facility, "剪贴板", e.to_string()))?;
        debug!("📋 已写入剪贴板: {} 个字符", text.chars().count());
        Ok(())
    }
}

/// 调用系统朗读程序 (espeak-ng / espeak / say)
#[derive(Debug)]
pub struct CommandSpeech {
    program: Option<PathBuf>,
    /// 正在朗读的子进程
    pending: Option<Child>,
}

impl CommandSpeech {
    /// 在PATH中查找可用的朗读程序
    pub fn detect() -> Self {
        let program = speech_config::SPEECH_PROGRAMS
            .iter()
            .find_map(|name| find_in_path(name));
        if let Some(path) = &program {
            debug!("🔊 使用朗读程序: {}", path.display());
        }
        Self::with_program(program)
    }

    /// 使用指定程序
    pub fn with_program(program: Option<PathBuf>) -> Self {
        Self {
            program,
            pending: None,
        }
    }

    /// 正在朗读的子进程ID
    pub fn pending_id(&self) -> Option<u32> {
        self.pending.as_ref().map(Child::id)
    }

    /// 等待正在朗读的子进程结束并回收
    pub fn wait_pending(&mut self) -> Result<Option<ExitStatus>> {
        match self.pending.take() {
            Some(mut child) => {
                let status = child
                    .wait()
                    .map_err(|e| translation_error!(facility, "语音朗读", e))?;
                Ok(Some(status))
            },
            None => Ok(None),
        }
    }

    fn build_command(program: &Path, utterance: &Utterance) -> Command {
        let words_per_minute = (175.0 * utterance.rate) as u32;
        let is_say = program
            .file_name()
            .map(|name| name == "say")
            .unwrap_or(false);

        let mut command = Command::new(program);
        if is_say {
            command.arg("-r").arg(words_per_minute.to_string());
        } else {
            command
                .arg("-v")
                .arg(espeak_voice(&utterance.lang))
                .arg("-s")
                .arg(words_per_minute.to_string());
        }
        command
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Speech for CommandSpeech {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        let program = self
            .program
            .clone()
            .ok_or_else(|| translation_error!(facility, "语音朗读", "未找到朗读程序"))?;

        // 排队: 上一句读完后再开始
        self.wait_pending()?;

        let child = Self::build_command(&program, utterance)
            .spawn()
            .map_err(|e| translation_error!(facility, "语音朗读", e))?;
        self.pending = Some(child);
        debug!("🔊 已发送朗读请求: lang={}, rate={}", utterance.lang, utterance.rate);
        Ok(())
    }
}

/// espeak 对中文使用 cmn 声音，其余取小写代码
fn espeak_voice(lang: &str) -> String {
    match lang {
        "zh-CN" => "cmn".to_string(),
        other => other.to_lowercase(),
    }
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance() -> Utterance {
        Utterance {
            text: "నమస్తే".to_string(),
            lang: "te".to_string(),
            rate: speech_config::SPEECH_RATE,
        }
    }

    #[test]
    fn test_speech_unavailable_without_program() {
        let mut speech = CommandSpeech::with_program(None);
        assert!(!speech.is_available());
        assert!(speech.speak(&utterance()).is_err());
    }

    #[test]
    fn test_espeak_command_arguments() {
        let command = CommandSpeech::build_command(Path::new("/usr/bin/espeak-ng"), &utterance());
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["-v", "te", "-s", "157", "నమస్తే"]);
    }

    #[test]
    fn test_say_command_arguments() {
        let command = CommandSpeech::build_command(Path::new("/usr/bin/say"), &utterance());
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["-r", "157", "నమస్తే"]);
    }

    #[test]
    fn test_espeak_voice() {
        assert_eq!(espeak_voice("zh-CN"), "cmn");
        assert_eq!(espeak_voice("FR"), "fr");
    }

    #[test]
    fn test_previous_utterance_is_reaped() {
        // 用 true 代替朗读程序，它会忽略参数并立即退出
        let Some(program) = find_in_path("true") else {
            return;
        };
        let mut speech = CommandSpeech::with_program(Some(program));

        speech.speak(&utterance()).unwrap();
        let first = speech.pending_id().unwrap();

        speech.speak(&utterance()).unwrap();
        let second = speech.pending_id().unwrap();
        assert_ne!(first, second);

        #[cfg(target_os = "linux")]
        assert!(!Path::new(&format!("/proc/{}", first)).exists());

        let status = speech.wait_pending().unwrap();
        assert!(status.map(|s| s.success()).unwrap_or(false));
        assert!(speech.pending_id().is_none());
        assert!(speech.wait_pending().unwrap().is_none());
    }
}
