use super::api::{ChatCompletionMessage, CreateChatCompletionRequest, CreateChatCompletionResponse};
use crate::{client_utils, GenerationRequest, GeneratorError, GeneratorResult, TextGenerator};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use std::time::Duration;

const PROVIDER: &str = "openai";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Generator backed by the OpenAI chat completions endpoint.
///
/// Each [`GenerationRequest`] becomes a two-message conversation
/// (system + user) and the first choice's text is returned verbatim.
pub struct OpenAIGenerator {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    temperature: Option<f64>,
}

#[derive(Clone, Default)]
pub struct OpenAIGeneratorOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    /// Upper bound on a single generation round trip. Generation blocks the
    /// triggering user action, so a hung request would otherwise hang the
    /// action indefinitely. Defaults to 60 seconds. There is no retry.
    pub timeout: Option<Duration>,
    /// Bring-your-own client. When set, its own timeout configuration wins
    /// and `timeout` is ignored.
    pub client: Option<Client>,
    pub temperature: Option<f64>,
}

impl OpenAIGenerator {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: OpenAIGeneratorOptions) -> Self {
        let OpenAIGeneratorOptions {
            base_url,
            api_key,
            timeout,
            client,
            temperature,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(|| {
            Client::builder()
                .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .unwrap_or_default()
        });

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            temperature,
        }
    }

    fn request_headers(&self) -> GeneratorResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                GeneratorError::InvalidInput(format!("Invalid OpenAI API key header value: {error}"))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAIGenerator {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn generate(&self, request: GenerationRequest) -> GeneratorResult<String> {
        let body = CreateChatCompletionRequest {
            model: self.model_id.clone(),
            messages: vec![
                ChatCompletionMessage {
                    role: "system",
                    content: request.system,
                },
                ChatCompletionMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            temperature: self.temperature,
        };
        let headers = self.request_headers()?;

        tracing::debug!(provider = PROVIDER, model = %self.model_id, "sending generation request");
        let response: CreateChatCompletionResponse = client_utils::send_json(
            &self.client,
            &format!("{}/chat/completions", self.base_url),
            &body,
            headers,
        )
        .await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            GeneratorError::Invariant(PROVIDER, "no choices returned".to_string())
        })?;
        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GeneratorError::NoContent(PROVIDER)),
        }
    }
}
