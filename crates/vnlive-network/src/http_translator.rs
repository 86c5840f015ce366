//! HTTP 번역 클라이언트.
//!
//! LibreTranslate 호환 API를 호출한다.
//! - 요청: `POST {endpoint}` + `{"q", "source", "target", "format": "text", "api_key"?}`
//! - 응답: `{"translatedText": "..."}`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vnlive_core::config::TranslationConfig;
use vnlive_core::error::CoreError;
use vnlive_core::ports::translator::Translator;

/// 요청 본문
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// 응답 본문
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// HTTP 번역 클라이언트
#[derive(Debug)]
pub struct HttpTranslator {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// API 엔드포인트 URL
    endpoint: String,
    /// 원문 언어
    source_lang: String,
    /// 번역 언어
    target_lang: String,
    /// API 키 (메모리에만 유지)
    api_key: Option<String>,
}

impl HttpTranslator {
    /// 새 HttpTranslator 생성
    pub fn new(config: &TranslationConfig) -> Result<Self, CoreError> {
        if config.endpoint.trim().is_empty() {
            return Err(CoreError::Config("번역 엔드포인트 미설정".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            source = %config.source_lang,
            target = %config.target_lang,
            timeout = config.timeout_secs,
            "HttpTranslator 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    /// 응답 본문 파싱
    fn parse_response(body: &str) -> Result<String, CoreError> {
        let response: TranslateResponse = serde_json::from_str(body).map_err(|e| {
            CoreError::Translation(format!("번역 응답 JSON 파싱 실패: {}", e))
        })?;
        Ok(response.translated_text.trim().to_string())
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String, CoreError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = TranslateRequest {
            q: text,
            source: &self.source_lang,
            target: &self.target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!(
            endpoint = %self.endpoint,
            chars = text.chars().count(),
            "번역 API 호출"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("번역 API 호출 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("번역 API 응답 읽기 실패: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, "번역 API 오류 응답");
            return Err(CoreError::Network(format!(
                "번역 API 오류 ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let translated = Self::parse_response(&body)?;
        debug!(chars = translated.chars().count(), "번역 완료");
        Ok(translated)
    }

    fn name(&self) -> &str {
        "libretranslate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(server: &mockito::ServerGuard) -> TranslationConfig {
        TranslationConfig {
            enabled: true,
            endpoint: format!("{}/translate", server.url()),
            timeout_secs: 5,
            ..TranslationConfig::default()
        }
    }

    #[test]
    fn empty_endpoint_is_config_error() {
        let config = TranslationConfig {
            endpoint: "  ".to_string(),
            ..TranslationConfig::default()
        };
        assert!(matches!(
            HttpTranslator::new(&config),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn request_omits_missing_api_key() {
        let request = TranslateRequest {
            q: "猫",
            source: "ja",
            target: "en",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["q"], "猫");
        assert!(json.get("api_key").is_none());
    }

    #[test]
    fn parse_response_trims() {
        let text = HttpTranslator::parse_response(r#"{"translatedText":" Cat \n"}"#).unwrap();
        assert_eq!(text, "Cat");
    }

    #[tokio::test]
    async fn translate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/translate")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "q": "こんにちは",
                "source": "ja",
                "target": "en",
                "format": "text"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"translatedText":"Hello"}"#)
            .create_async()
            .await;

        let translator = HttpTranslator::new(&config_for(&server)).unwrap();
        let translated = translator.translate("こんにちは").await.unwrap();
        assert_eq!(translated, "Hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_key_is_sent_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/translate")
            .match_body(Matcher::PartialJson(serde_json::json!({ "api_key": "secret" })))
            .with_status(200)
            .with_body(r#"{"translatedText":"ok"}"#)
            .create_async()
            .await;

        let mut config = config_for(&server);
        config.api_key = Some("secret".to_string());
        let translator = HttpTranslator::new(&config).unwrap();
        translator.translate("テスト").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/translate")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let translator = HttpTranslator::new(&config_for(&server)).unwrap();
        let err = translator.translate("こんにちは").await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_translation_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/translate")
            .with_status(200)
            .with_body(r#"{"unexpected":true}"#)
            .create_async()
            .await;

        let translator = HttpTranslator::new(&config_for(&server)).unwrap();
        let err = translator.translate("こんにちは").await.unwrap_err();
        assert!(matches!(err, CoreError::Translation(_)));
    }

    #[tokio::test]
    async fn blank_text_skips_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/translate")
            .expect(0)
            .create_async()
            .await;

        let translator = HttpTranslator::new(&config_for(&server)).unwrap();
        assert_eq!(translator.translate("  ").await.unwrap(), "");
        mock.assert_async().await;
    }
}
