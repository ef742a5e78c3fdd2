//! proxy-translate - 通过CORS代理调用远程翻译API的文本翻译库
//!
//! 这个库提供了语言目录、代理请求构建、翻译客户端、会话状态管理以及剪贴板和朗读等核心功能。

pub mod api_constants;
pub mod config;
pub mod error;
pub mod facilities;
pub mod languages;
pub mod request;
pub mod session;
pub mod translator;
pub mod utils;
