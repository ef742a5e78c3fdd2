use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use proxy_translate::config::Cli;
use proxy_translate::languages::{display_name, LANGUAGES};
use proxy_translate::session::{TranslateOutcome, TranslationSession};
use proxy_translate::translator::{format_duration, Translate, TranslationClient};
use proxy_translate::utils::{char_counter, init_logging, read_input_text, truncate_to_limit};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    if cli.list_languages {
        print_languages();
        return Ok(());
    }

    let config = cli.translator_config()?;
    let client = TranslationClient::new(&config)?;

    if cli.remote_languages {
        let languages = client
            .fetch_languages(config.proxy_url(), config.languages_url())
            .await?;
        for (code, name) in &languages {
            println!("{:<8} {}", code, name);
        }
        return Ok(());
    }

    let mut session = TranslationSession::new(client, config);
    session.set_source_lang(&cli.from)?;
    session.set_target_lang(&cli.to)?;
    if cli.swap {
        session.swap();
    }

    if cli.interactive {
        return run_interactive(&mut session).await;
    }

    let text = read_input_text(cli.text.as_deref())?;
    let max_chars = session.config().max_text_chars();
    session.set_text(limit_text(&text, max_chars));

    let start = Instant::now();
    match session.translate().await {
        TranslateOutcome::Translated(translated) => {
            println!("{}", translated);
            info!("✅ 翻译完成，耗时 {}", format_duration(start.elapsed()));
        },
        TranslateOutcome::Failed(message) => {
            error!("⚠️  {}", message);
            if cli.quiet {
                eprintln!("{}", message);
            }
            std::process::exit(1);
        },
        TranslateOutcome::Blank => anyhow::bail!("待翻译文本为空"),
        TranslateOutcome::Busy => anyhow::bail!("已有翻译在进行中"),
    }

    if cli.copy {
        copy_result(&mut session);
    }
    if cli.speak {
        speak_result(&mut session);
    }

    Ok(())
}

/// 与输入框的长度上限一致，超出部分直接截断
fn limit_text(text: &str, max_chars: usize) -> &str {
    let limited = truncate_to_limit(text, max_chars);
    if limited.len() < text.len() {
        warn!("⚠️  文本超过长度上限，已截断为 {}", char_counter(limited, max_chars));
    }
    limited
}

fn print_languages() {
    println!("{:<8} {}", "auto", display_name("auto"));
    for lang in LANGUAGES {
        println!("{:<8} {}", lang.code, lang.name);
    }
}

fn copy_result<T: Translate>(session: &mut TranslationSession<T>) {
    match session.copy() {
        Ok(true) => info!("📋 译文已复制到剪贴板"),
        Ok(false) => warn!("没有可复制的译文"),
        Err(e) => warn!("❌ 复制失败: {}", e),
    }
}

fn speak_result<T: Translate>(session: &mut TranslationSession<T>) {
    match session.speak() {
        Ok(true) => info!("🔊 正在朗读译文"),
        Ok(false) => warn!("没有可朗读的译文或朗读设施不可用"),
        Err(e) => warn!("❌ 朗读失败: {}", e),
    }
}

const INTERACTIVE_HELP: &str = "\
输入文本后回车即翻译，其他命令:
  :from CODE   设置源语言 (auto 表示自动检测)
  :to CODE     设置目标语言
  :swap        交换源语言和目标语言
  :copy        复制译文到剪贴板
  :speak       朗读译文
  :state       显示当前会话状态
  :langs       列出支持的语言
  :reset       重置会话
  :help        显示帮助
  :quit        退出";

/// 交互模式，每行输入对应一次表单操作
async fn run_interactive<T: Translate>(session: &mut TranslationSession<T>) -> Result<()> {
    println!("🌍 Language Translator");
    println!("{}", INTERACTIVE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!(
            "[{} → {}] > ",
            session.state().source_lang,
            session.state().target_lang
        );
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            ":quit" | ":q" => break,
            ":help" => println!("{}", INTERACTIVE_HELP),
            ":langs" => print_languages(),
            ":swap" => session.swap(),
            ":copy" => copy_result(session),
            ":speak" => speak_result(session),
            ":reset" => session.reset(),
            ":from" => {
                if let Err(e) = session.set_source_lang(argument) {
                    println!("⚠️  {}", e);
                }
            },
            ":to" => {
                if let Err(e) = session.set_target_lang(argument) {
                    println!("⚠️  {}", e);
                }
            },
            ":state" => {
                let max_chars = session.config().max_text_chars();
                let state = session.state();
                println!("源语言: {}", display_name(&state.source_lang));
                println!("目标语言: {}", display_name(&state.target_lang));
                println!("阶段: {:?}", state.phase());
                println!("文本: {} ({})", state.text, char_counter(&state.text, max_chars));
                if !state.translated.is_empty() {
                    println!("译文: {}", state.translated);
                }
                if !state.error.is_empty() {
                    println!("错误: {}", state.error);
                }
            },
            other if other.starts_with(':') => {
                println!("未知命令: {}，输入 :help 查看帮助", other);
            },
            _ => {
                let max_chars = session.config().max_text_chars();
                session.set_text(limit_text(line, max_chars));
                match session.translate().await {
                    TranslateOutcome::Translated(translated) => println!("✅ {}", translated),
                    TranslateOutcome::Failed(message) => println!("⚠️  {}", message),
                    TranslateOutcome::Blank | TranslateOutcome::Busy => {},
                }
            },
        }
    }

    Ok(())
}
