use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};

/// 初始化日志系统
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // 日志写到stderr，stdout只留给译文
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// 获取待翻译文本
/// 优先使用命令行参数，否则从标准输入读取
pub fn read_input_text(arg: Option<&str>) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text.to_string());
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("未提供待翻译文本，请通过参数或标准输入传入");
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("读取标准输入失败")?;
    Ok(buffer)
}

/// 统计文本字符数并给出 `已用/上限` 形式的提示
pub fn char_counter(text: &str, max_chars: usize) -> String {
    format!("{}/{}", text.chars().count(), max_chars)
}

/// 按字符截断到单次翻译上限
pub fn truncate_to_limit(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_text_prefers_argument() {
        assert_eq!(read_input_text(Some("hello")).unwrap(), "hello");
    }

    #[test]
    fn test_char_counter() {
        assert_eq!(char_counter("héllo", 500), "5/500");
        assert_eq!(char_counter("", 120), "0/120");
    }

    #[test]
    fn test_truncate_to_limit() {
        let short = "short text";
        assert_eq!(truncate_to_limit(short, 500), short);

        let long = "語".repeat(600);
        let truncated = truncate_to_limit(&long, 500);
        assert_eq!(truncated.chars().count(), 500);
        assert!(long.starts_with(truncated));

        assert_eq!(truncate_to_limit("héllo wörld", 5), "héllo");
    }
}
