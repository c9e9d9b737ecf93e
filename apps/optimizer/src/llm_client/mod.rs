//! LLM Client — the single point of entry for all chat-completion calls.
//!
//! No other module talks to the text-generation service directly.
//! One request per call: no retries, no backoff. The only bound on a hung
//! request is the client timeout.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client: fixed model, bearer credential, one system + one user turn.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        model: String,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a system turn and a user turn, returning the full response object.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = self.build_request(system, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }

    /// Calls the model and deserializes the reply text as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<T, LlmError> {
        let response = self.complete(system, prompt).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        parse_json_reply(text)
    }

    fn build_request<'a>(&'a self, system: &'a str, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

/// Parses model output as JSON, tolerating a surrounding code fence.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn make_client() -> LlmClient {
        LlmClient::new(
            "sk-test".to_string(),
            DEFAULT_MODEL.to_string(),
            "https://example.invalid/v1/",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_endpoint_joins_base_without_double_slash() {
        assert_eq!(
            make_client().endpoint,
            "https://example.invalid/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_has_system_then_user_turn() {
        let client = make_client();
        let body = serde_json::to_value(client.build_request("persona", "payload")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "payload"}
                ]
            })
        );
    }

    #[test]
    fn test_response_text_takes_first_choice() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "{\"a\": 1}"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }))
        .unwrap();
        assert_eq!(resp.text(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_response_text_empty_when_no_content() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(resp.text(), None);

        let resp: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(resp.text(), None);
    }

    #[test]
    fn test_parse_json_reply_rejects_prose() {
        let err = parse_json_reply::<serde_json::Value>("Sure! Here is your layout.").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    /// Serves one canned HTTP response on a local port. The handle yields the raw request.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/v1", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn local_client(base: &str) -> LlmClient {
        LlmClient::new(
            "sk-test".to_string(),
            DEFAULT_MODEL.to_string(),
            base,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_error_status_uses_api_error_message() {
        let (base, server) = serve_once(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .await;

        let err = local_client(&base).complete("s", "u").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected API error, got {other:?}"),
        }

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions "));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer sk-test"));
    }

    #[tokio::test]
    async fn test_error_status_without_json_body_keeps_raw_text() {
        let (base, server) = serve_once("503 Service Unavailable", "upstream overloaded").await;

        let err = local_client(&base).complete("s", "u").await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::Api { status: 503, ref message } if message == "upstream overloaded"
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_json_parses_fenced_reply() {
        let reply = json!({
            "choices": [{"message": {
                "role": "assistant",
                "content": "```json\n{\"screens\": [], \"note\": \"ok\"}\n```"
            }}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7}
        });
        let (base, server) = serve_once("200 OK", &reply.to_string()).await;

        let value: serde_json::Value = local_client(&base)
            .complete_json("persona", "payload")
            .await
            .unwrap();
        assert_eq!(value, json!({"screens": [], "note": "ok"}));

        let request = server.await.unwrap();
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["messages"][1]["content"], json!("payload"));
    }

    #[tokio::test]
    async fn test_complete_json_empty_content() {
        let reply = json!({"choices": [{"message": {"role": "assistant", "content": "  "}}]});
        let (base, server) = serve_once("200 OK", &reply.to_string()).await;

        let err = local_client(&base)
            .complete_json::<serde_json::Value>("s", "u")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let client = LlmClient::new(
            "sk-test".to_string(),
            DEFAULT_MODEL.to_string(),
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
