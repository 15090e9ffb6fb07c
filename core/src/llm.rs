use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 600;

const SYSTEM_PROMPT: &str = "You are an activity suggestion generator. Always return ONLY raw JSON (no text outside JSON).\n\
Keys:\n\
- activities: 3–5 short, vivid activity suggestions for the given mood, weather, location, date, and time.\n\
- keywords: one-word or very short phrases matching each activity’s main theme; must match the number of activities.\n\
- reasoning: friendly 2–3 sentence explanation for why these activities fit.";

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new("```(json)?").expect("static regex"));

/// The five facts the model gets to plan around.
#[derive(Debug, Clone)]
pub struct ActivityRequest {
    pub mood: String,
    pub weather: String,
    pub city: String,
    pub date: String,
    pub time: String,
}

impl ActivityRequest {
    fn user_prompt(&self) -> String {
        format!(
            "mood: {}, weather: {}, location: {}, date: {}, time: {}",
            self.mood, self.weather, self.city, self.date, self.time
        )
    }
}

/// What the system prompt asks the model to produce. Only used to check the reply;
/// callers get the model's JSON untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityResponse {
    pub activities: Vec<String>,
    pub keywords: Vec<String>,
    pub reasoning: String,
}

impl ActivityResponse {
    /// Parse `value` and confirm it follows the prompt's rules.
    pub fn validate(value: &Value) -> std::result::Result<Self, String> {
        let parsed: Self = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        if !(3..=5).contains(&parsed.activities.len()) {
            return Err(format!("expected 3-5 activities, got {}", parsed.activities.len()));
        }
        if parsed.keywords.len() != parsed.activities.len() {
            return Err(format!(
                "{} keywords for {} activities",
                parsed.keywords.len(),
                parsed.activities.len()
            ));
        }
        Ok(parsed)
    }
}

/// Remove every ``` / ```json marker, then surrounding whitespace.
pub fn strip_code_fences(content: &str) -> String {
    CODE_FENCE.replace_all(content, "").trim().to_string()
}

/// Chat-completion client for activity suggestions.
pub struct Brain {
    http: Client,
    url: String,
    api_key: String,
    model: String,
}

impl Brain {
    pub fn new(http: Client, config: &Config) -> Self {
        info!("Brain configured. Model: {}", config.chat_model);
        Self {
            http,
            url: config.chat_completions_url.clone(),
            api_key: config.chat_api_key.clone(),
            model: config.chat_model.clone(),
        }
    }

    #[allow(deprecated)] // `max_tokens` is what OpenRouter honours
    fn build_request(&self, request: &ActivityRequest) -> Result<CreateChatCompletionRequest> {
        let chat = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .messages([
                ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(SYSTEM_PROMPT)
                        .build()?,
                ),
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(request.user_prompt())
                        .build()?,
                ),
            ])
            .build()?;
        Ok(chat)
    }

    /// Ask the model for suggestions and return its reply parsed as JSON.
    ///
    /// A non-success status comes back as [`Error::Status`]; content that is not JSON
    /// after fence stripping comes back as [`Error::InvalidContent`] carrying that text.
    pub async fn suggest_activities(&self, request: &ActivityRequest) -> Result<Value> {
        let chat = self.build_request(request)?;

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&chat)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body = response.bytes().await?;
        let data: Value = serde_json::from_slice(&body)?;
        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default();

        let content = strip_code_fences(content);
        let parsed: Value =
            serde_json::from_str(&content).map_err(|_| Error::InvalidContent(content.clone()))?;

        if let Err(reason) = ActivityResponse::validate(&parsed) {
            warn!("AI reply does not follow the requested shape: {}", reason);
        }

        Ok(parsed)
    }
}
