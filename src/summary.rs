//! Cultural summary generation through an OpenAI-compatible chat API.
//!
//! The generator never fails: without an API key it answers with
//! [`PLACEHOLDER`], and any provider error is turned into a short error text
//! so the computed periods can still be shown.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ExternalServiceError;
use crate::periods::PeriodSet;

/// Returned verbatim when no API key is configured.
pub const PLACEHOLDER: &str = concat!(
    "(OpenAI API key not configured or library not found, so here is a placeholder.)\n",
    "Imagine descriptions of pop culture, music scenes, and societal ",
    "changes spanning the requested years here."
);

/// Prompt wording used when no country was given.
pub const DEFAULT_COUNTRY: &str = "their country";

/// Settings for the summary service.
#[derive(Clone, Debug)]
pub struct SummaryConfig {
    /// Bearer token; `None` or empty selects the placeholder provider
    pub api_key: Option<String>,
    /// Base URL up to and including the version segment
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound on the whole request
    pub timeout: Duration,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 600,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Years and country interpolated into the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub child_start: i32,
    pub child_end: i32,
    pub teen_start: i32,
    pub teen_end: i32,
    pub ya_start: i32,
    pub ya_end: i32,
    pub country: String,
}

impl SummaryRequest {
    /// Blank or missing countries fall back to [`DEFAULT_COUNTRY`].
    pub fn from_periods(periods: &PeriodSet, country: Option<&str>) -> Self {
        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COUNTRY);

        Self {
            child_start: periods.childhood.start_year(),
            child_end: periods.childhood.end_year(),
            teen_start: periods.teenage.start_year(),
            teen_end: periods.teenage.end_year(),
            ya_start: periods.young_adult.start_year(),
            ya_end: periods.young_adult.end_year(),
            country: country.to_string(),
        }
    }
}

/// Instruction sent to the model as a single system message.
pub fn build_prompt(req: &SummaryRequest) -> String {
    let SummaryRequest {
        child_start,
        child_end,
        teen_start,
        teen_end,
        ya_start,
        ya_end,
        country,
    } = req;

    format!(
        "You are a cultural historian. For an individual from {country}, provide a personalized cultural summary for the following periods: childhood ({child_start}-{child_end}), teenage years ({teen_start}-{teen_end}), and young adult years ({ya_start}-{ya_end}).\n\n\
Present the information using Markdown. Do NOT add any overall title or introduction before the 'Childhood' section. Use the following structure EXACTLY:\n\n\
Childhood ({child_start}-{child_end})\n\
- **Event/Trend Title 1:** [Brief, personalized description of its relevance to a child of that age in {country} (also consider wider UK influences like popular music, TV, or national events where significant) during those years. Maximum 2-3 sentences.]\n\
- **Event/Trend Title 2:** [Brief, personalized description as above... Maximum 2-3 sentences.]\n\
\n\
Teenage Years ({teen_start}-{teen_end})\n\
- **Event/Trend Title 1:** [Brief, personalized description of its relevance to a teenager of that age in {country} (also consider wider UK influences like popular music, TV, or national events where significant) during those years. Maximum 2-3 sentences.]\n\
- **Event/Trend Title 2:** [Brief, personalized description as above... Maximum 2-3 sentences.]\n\
\n\
Young Adult Years ({ya_start}-{ya_end})\n\
- **Event/Trend Title 1:** [Brief, personalized description of its relevance to a young adult of that age in {country} (also consider wider UK influences like popular music, TV, or national events where significant) during those years. Maximum 2-3 sentences.]\n\
- **Event/Trend Title 2:** [Brief, personalized description as above... Maximum 2-3 sentences.]\n\
\n\
Ensure you provide 3 to 4 bullet-pointed items for each of the three periods.\n\
The descriptions for each item MUST be very concise (2-3 sentences maximum) and focus on the personal impact and experience for someone of that specific age primarily in {country}, while acknowledging significant broader UK cultural influences where applicable (e.g., music, national media, major political shifts).\n\
The tone should be engaging."
    )
}

/// Something that turns a prompt into text.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalServiceError>;
}

/// Answers every prompt with [`PLACEHOLDER`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderProvider;

#[async_trait]
impl TextProvider for PlaceholderProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ExternalServiceError> {
        Ok(PLACEHOLDER.to_string())
    }
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client. One request per prompt, no retries.
#[derive(Clone)]
pub struct OpenAiProvider {
    api_key: Arc<String>,
    http: Arc<Client>,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: &SummaryConfig) -> Result<Self, ExternalServiceError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ExternalServiceError::MissingCredential)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("era-calc/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_key: Arc::new(api_key.to_string()),
            http: Arc::new(http),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalServiceError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "system",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "requesting summary");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&*self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExternalServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ExternalServiceError::EmptyResponse)
    }
}

/// Produces the cultural summary text, whatever happens downstream.
#[derive(Clone)]
pub struct SummaryGenerator {
    provider: Arc<dyn TextProvider>,
    timeout: Duration,
}

impl SummaryGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn placeholder() -> Self {
        Self::new(Arc::new(PlaceholderProvider), SummaryConfig::default().timeout)
    }

    /// Uses the OpenAI provider when an API key is configured, the
    /// placeholder otherwise.
    pub fn from_config(config: &SummaryConfig) -> Self {
        match OpenAiProvider::new(config) {
            Ok(provider) => Self::new(Arc::new(provider), config.timeout),
            Err(ExternalServiceError::MissingCredential) => {
                debug!("no API key configured, using placeholder summary");
                Self::placeholder()
            }
            Err(e) => {
                warn!("failed to build summary client, using placeholder: {e}");
                Self::placeholder()
            }
        }
    }

    pub async fn generate(&self, req: &SummaryRequest) -> String {
        let prompt = build_prompt(req);

        match tokio::time::timeout(self.timeout, self.provider.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("summary request failed: {e}");
                error_text(&e)
            }
            Err(_) => {
                let e = ExternalServiceError::Timeout(self.timeout);
                warn!("summary request failed: {e}");
                error_text(&e)
            }
        }
    }
}

fn error_text(e: &ExternalServiceError) -> String {
    format!("(Error communicating with OpenAI: {e})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birth::resolve;
    use crate::periods::compute_periods;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn request(country: Option<&str>) -> SummaryRequest {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let birth = resolve(NaiveDate::from_ymd_opt(1995, 1, 1), None, today).unwrap();
        SummaryRequest::from_periods(&compute_periods(birth), country)
    }

    struct Recording {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextProvider for Recording {
        async fn generate(&self, prompt: &str) -> Result<String, ExternalServiceError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("Childhood (2000-2007)\n- **Pokemon:** everywhere.".to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextProvider for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String, ExternalServiceError> {
            Err(ExternalServiceError::Api {
                status: 401,
                body: "invalid key".to_string(),
            })
        }
    }

    struct Stalling;

    #[async_trait]
    impl TextProvider for Stalling {
        async fn generate(&self, _prompt: &str) -> Result<String, ExternalServiceError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("too late".to_string())
        }
    }

    #[test]
    fn test_request_from_periods() {
        let req = request(Some("  Ireland "));
        assert_eq!(
            (
                req.child_start,
                req.child_end,
                req.teen_start,
                req.teen_end,
                req.ya_start,
                req.ya_end
            ),
            (2000, 2007, 2008, 2014, 2015, 2024)
        );
        assert_eq!(req.country, "Ireland");
        assert_eq!(request(None).country, DEFAULT_COUNTRY);
        assert_eq!(request(Some("")).country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_prompt_interpolates_years_and_country() {
        let prompt = build_prompt(&request(Some("Wales")));
        assert!(prompt.starts_with("You are a cultural historian. For an individual from Wales,"));
        assert!(prompt.contains("Childhood (2000-2007)\n"));
        assert!(prompt.contains("Teenage Years (2008-2014)\n"));
        assert!(prompt.contains("Young Adult Years (2015-2024)\n"));
        assert!(prompt.ends_with("The tone should be engaging."));
    }

    #[test]
    fn test_missing_key_is_rejected_by_provider() {
        let config = SummaryConfig {
            api_key: Some("   ".to_string()),
            ..SummaryConfig::default()
        };
        assert!(matches!(
            OpenAiProvider::new(&config),
            Err(ExternalServiceError::MissingCredential)
        ));
    }

    #[test]
    fn test_provider_endpoint() {
        let config = SummaryConfig {
            api_key: Some("sk-test".to_string()),
            api_base: "http://localhost:8000/v1/".to_string(),
            ..SummaryConfig::default()
        };
        let provider = OpenAiProvider::new(&config).unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8000/v1/chat/completions");
        assert_eq!(provider.model, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_no_key_returns_placeholder() {
        let generator = SummaryGenerator::from_config(&SummaryConfig::default());
        assert_eq!(generator.generate(&request(None)).await, PLACEHOLDER);
        assert_eq!(
            PLACEHOLDER,
            "(OpenAI API key not configured or library not found, so here is a placeholder.)\n\
             Imagine descriptions of pop culture, music scenes, and societal changes spanning \
             the requested years here."
        );
    }

    #[tokio::test]
    async fn test_provider_receives_prompt() {
        let provider = Arc::new(Recording {
            prompts: Mutex::new(Vec::new()),
        });
        let generator = SummaryGenerator::new(provider.clone(), Duration::from_secs(5));
        let req = request(Some("Scotland"));

        let text = generator.generate(&req).await;
        assert!(text.starts_with("Childhood (2000-2007)"));

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), [build_prompt(&req)]);
    }

    #[tokio::test]
    async fn test_provider_error_becomes_text() {
        let generator = SummaryGenerator::new(Arc::new(Failing), Duration::from_secs(5));
        assert_eq!(
            generator.generate(&request(None)).await,
            "(Error communicating with OpenAI: API returned HTTP 401: invalid key)"
        );
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let generator = SummaryGenerator::new(Arc::new(Stalling), Duration::from_millis(20));
        let text = generator.generate(&request(None)).await;
        assert!(text.starts_with("(Error communicating with OpenAI: request timed out"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"  hello \n"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("  hello \n"));

        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());
    }

    /// Serves `status` and `body` to the first connection and returns the
    /// base URL to point the provider at.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // read the full request before answering
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/v1")
    }

    fn provider_for(api_base: String) -> OpenAiProvider {
        OpenAiProvider::new(&SummaryConfig {
            api_key: Some("sk-test".to_string()),
            api_base,
            timeout: Duration::from_secs(5),
            ..SummaryConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_provider_returns_trimmed_content() {
        let base = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"  hello \n"}}]}"#,
        )
        .await;
        let text = provider_for(base).generate("prompt").await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_provider_maps_error_status() {
        let base = serve_once("401 Unauthorized", "invalid key").await;
        match provider_for(base).generate("prompt").await {
            Err(ExternalServiceError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid key");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_blank_content_is_empty_response() {
        let base = serve_once("200 OK", r#"{"choices":[{"message":{"content":"   "}}]}"#).await;
        assert!(matches!(
            provider_for(base).generate("prompt").await,
            Err(ExternalServiceError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_provider_missing_choices_is_empty_response() {
        let base = serve_once("200 OK", r#"{"choices":[]}"#).await;
        assert!(matches!(
            provider_for(base).generate("prompt").await,
            Err(ExternalServiceError::EmptyResponse)
        ));

        let base = serve_once("200 OK", r#"{"choices":[{"message":{"role":"assistant"}}]}"#).await;
        assert!(matches!(
            provider_for(base).generate("prompt").await,
            Err(ExternalServiceError::EmptyResponse)
        ));
    }
}
