use async_trait::async_trait;
use pgvector::Vector;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::model_provider::{
    CompletionError, CompletionProvider, EmbeddingError, EmbeddingProvider, PromptMessage,
};

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let embedding_model =
            env::var("EMBEDDING_MODEL").unwrap_or_else(|_| "text-embedding-ada-002".to_string());
        let chat_model = env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        Self {
            api_key,
            base_url,
            embedding_model,
            chat_model,
            max_retries: 3,
            timeout_secs: 30,
            backoff_factor: 1.5,
        }
    }
}

#[derive(Debug)]
enum ApiCallError {
    RequestError(String),
    StatusError(u16, String),
    ParseError(String),
}

impl ApiCallError {
    fn message(self) -> String {
        match self {
            ApiCallError::RequestError(msg) => msg,
            ApiCallError::StatusError(code, body) => format!("HTTP {}: {}", code, body),
            ApiCallError::ParseError(msg) => msg,
        }
    }

    fn is_network(&self) -> bool {
        matches!(self, ApiCallError::RequestError(_))
    }
}

/// Client for an OpenAI-compatible API, covering both embeddings and chat
/// completions. Transient failures are retried with exponential backoff.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(OpenAiConfig::default())
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, ApiCallError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let mut attempts = 0;
        let mut last_error = None;

        loop {
            attempts += 1;

            match self.execute_request(path, request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);

                    if attempts > self.config.max_retries {
                        break;
                    }

                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );

                    tokio::time::sleep(backoff_time).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ApiCallError::RequestError("Max retries exceeded".to_string())))
    }

    async fn execute_request<Req, Resp>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp, ApiCallError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiCallError::RequestError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiCallError::StatusError(status.as_u16(), body));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ApiCallError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingsRequest {
            model: &self.config.embedding_model,
            input: texts,
        };

        let response: EmbeddingsResponse = self
            .post_json("/v1/embeddings", &request)
            .await
            .map_err(|e| {
                if e.is_network() {
                    EmbeddingError::NetworkError(e.message())
                } else {
                    EmbeddingError::ApiError(e.message())
                }
            })?;

        if response.data.len() != texts.len() {
            return Err(EmbeddingError::EmptyResponse);
        }

        // The API does not guarantee response order, but tags each entry
        // with the index of the input it embeds.
        let mut data = response.data;
        data.sort_by_key(|entry| entry.index);

        Ok(data
            .into_iter()
            .map(|entry| Vector::from(entry.embedding))
            .collect())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        messages: &[PromptMessage],
        temperature: Option<f32>,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.config.chat_model,
            messages,
            temperature,
        };

        let response: ChatCompletionResponse = self
            .post_json("/v1/chat/completions", &request)
            .await
            .map_err(|e| {
                if e.is_network() {
                    CompletionError::NetworkError(e.message())
                } else {
                    CompletionError::ApiError(e.message())
                }
            })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
