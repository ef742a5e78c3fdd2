//! 翻译客户端与会话的集成测试，使用mockito模拟CORS代理

use mockito::{Matcher, Server};
use serde_json::json;

use proxy_translate::api_constants::{error_messages, service_config};
use proxy_translate::config::TranslatorConfig;
use proxy_translate::error::TranslationError;
use proxy_translate::request::{build_inner_url, build_proxied_url};
use proxy_translate::session::{Phase, TranslateOutcome, TranslationSession};
use proxy_translate::translator::{Translate, TranslationClient};

const TRANSLATE_URL: &str = "https://translator.test/translate";

fn proxy_body(contents: &str) -> String {
    json!({ "contents": contents, "status": { "http_code": 200 } }).to_string()
}

fn config_for(server: &Server) -> TranslatorConfig {
    TranslatorConfig::new()
        .with_proxy_url(&format!("{}/get", server.url()))
        .with_translate_url(TRANSLATE_URL)
}

#[tokio::test]
async fn test_translate_unwraps_both_envelopes() {
    let mut server = Server::new_async().await;
    let inner_url = build_inner_url(TRANSLATE_URL, "Hello", "en", "es");
    let mock = server
        .mock("GET", "/get")
        .match_query(Matcher::UrlEncoded("url".into(), inner_url))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(proxy_body(r#"{"destination-text":"Hola","source-language":"en"}"#))
        .create_async()
        .await;

    let config = config_for(&server);
    let client = TranslationClient::new(&config).unwrap();
    let url = build_proxied_url(config.proxy_url(), TRANSLATE_URL, "Hello", "en", "es");

    assert_eq!(client.translate(&url).await.unwrap(), "Hola");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_destination_text_falls_back_to_placeholder() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(proxy_body("{}"))
        .create_async()
        .await;

    let config = config_for(&server);
    let client = TranslationClient::new(&config).unwrap();
    let url = build_proxied_url(config.proxy_url(), TRANSLATE_URL, "Hello", "auto", "te");

    assert_eq!(
        client.translate(&url).await.unwrap(),
        service_config::NO_TRANSLATION_PLACEHOLDER
    );

    let strict_client = TranslationClient::new(&config.clone().strict_missing_field(true)).unwrap();
    assert!(matches!(
        strict_client.translate(&url).await,
        Err(TranslationError::MissingField { .. })
    ));
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let config = config_for(&server);
    let client = TranslationClient::new(&config).unwrap();
    let url = build_proxied_url(config.proxy_url(), TRANSLATE_URL, "Hello", "auto", "te");

    match client.translate(&url).await {
        Err(TranslationError::Network { status_code, .. }) => assert_eq!(status_code, Some(502)),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_contents_is_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(proxy_body("<html>rate limited</html>"))
        .create_async()
        .await;

    let config = config_for(&server);
    let client = TranslationClient::new(&config).unwrap();
    let url = build_proxied_url(config.proxy_url(), TRANSLATE_URL, "Hello", "auto", "te");

    assert!(matches!(
        client.translate(&url).await,
        Err(TranslationError::EnvelopeParse { .. })
    ));
}

#[tokio::test]
async fn test_transport_failure_sets_session_error() {
    // 绑定后立即释放端口，得到一个拒绝连接的地址
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = TranslatorConfig::new()
        .with_proxy_url(&format!("http://127.0.0.1:{}/get", port))
        .with_translate_url(TRANSLATE_URL);
    let client = TranslationClient::new(&config).unwrap();

    let url = build_proxied_url(config.proxy_url(), TRANSLATE_URL, "Hello", "auto", "te");
    assert!(matches!(
        client.translate(&url).await,
        Err(TranslationError::Network { status_code: None, .. })
    ));

    let mut session = TranslationSession::new(client, config);
    session.set_text("Hello");
    let outcome = session.translate().await;

    assert_eq!(
        outcome,
        TranslateOutcome::Failed(error_messages::TRANSLATION_FAILED.to_string())
    );
    assert_eq!(session.state().error, error_messages::TRANSLATION_FAILED);
    assert!(session.state().translated.is_empty());
    assert_eq!(session.state().phase(), Phase::Failed);
}

#[tokio::test]
async fn test_session_recovers_after_failure() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server);
    let client = TranslationClient::new(&config).unwrap();
    let mut session = TranslationSession::new(client, config);
    session.set_text("Good morning");
    session.set_source_lang("en").unwrap();
    session.set_target_lang("hi").unwrap();

    assert!(matches!(session.translate().await, TranslateOutcome::Failed(_)));
    failing.assert_async().await;
    failing.remove_async().await;

    let inner_url = build_inner_url(TRANSLATE_URL, "Good morning", "en", "hi");
    let succeeding = server
        .mock("GET", "/get")
        .match_query(Matcher::UrlEncoded("url".into(), inner_url))
        .with_status(200)
        .with_body(proxy_body(r#"{"destination-text":"सुप्रभात"}"#))
        .create_async()
        .await;

    assert_eq!(
        session.translate().await,
        TranslateOutcome::Translated("सुप्रभात".to_string())
    );
    assert!(session.state().error.is_empty());
    succeeding.assert_async().await;
}

#[tokio::test]
async fn test_fetch_languages_through_proxy() {
    let mut server = Server::new_async().await;
    let languages_url = "https://translator.test/languages";
    let mock = server
        .mock("GET", "/get")
        .match_query(Matcher::UrlEncoded("url".into(), languages_url.into()))
        .with_status(200)
        .with_body(proxy_body(r#"{"en":"english","te":"telugu"}"#))
        .create_async()
        .await;

    let config = config_for(&server);
    let client = TranslationClient::new(&config).unwrap();
    let languages = client
        .fetch_languages(config.proxy_url(), languages_url)
        .await
        .unwrap();

    assert_eq!(languages.len(), 2);
    assert_eq!(languages.get("en").map(String::as_str), Some("english"));
    mock.assert_async().await;
}
