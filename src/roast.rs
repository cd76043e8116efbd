//! Roast generation through an OpenAI-compatible chat-completion endpoint.
//!
//! [`RoastGenerator::generate`] never fails: any transport, status or decoding
//! problem is logged and replaced by [`fallback_roast`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::LlmConfig, types::Stats, warning};

pub const TEMPERATURE: f32 = 0.9;
pub const MAX_TOKENS: u32 = 400;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const SYSTEM_PROMPT: &str =
    "You are a confident, witty roast comedian with great comedic timing.";

#[derive(Debug, Error)]
pub enum RoastError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("completion endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed completion body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("completion contained no choices")]
    EmptyCompletion,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the chat-completion endpoint that writes the roast.
pub struct RoastGenerator {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl RoastGenerator {
    pub fn new(http: Client, config: &LlmConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the default [`REQUEST_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produces the roast text for `stats`, or the fallback roast on failure.
    pub async fn generate(&self, stats: &Stats) -> String {
        match self.request_roast(stats).await {
            Ok(text) => text,
            Err(e) => {
                warning!("Roast generation failed: {}", e);
                fallback_roast()
            }
        }
    }

    /// Sends one completion request and returns the first choice verbatim.
    pub async fn request_roast(&self, stats: &Stats) -> Result<String, RoastError> {
        let prompt = render_prompt(stats);
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(RoastError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoastError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response.json().await.map_err(RoastError::Decode)?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(RoastError::EmptyCompletion)
    }
}

/// Roast served when the completion endpoint cannot deliver one.
pub fn fallback_roast() -> String {
    concat!(
        "**Your Spotify is too powerful to be roasted right now.**\n\n",
        "- Even the AI needed a moment.\n",
        "- Consider this a temporary win.\n\n",
        "Final Verdict: Try again and face the music."
    )
    .to_string()
}

/// Renders the user prompt with the four summary fields embedded as JSON.
pub fn render_prompt(stats: &Stats) -> String {
    let artists = serde_json::to_string(&stats.top_artists).unwrap_or_default();
    let genres = serde_json::to_string(&stats.genres).unwrap_or_default();
    let recent = serde_json::to_string(&stats.recent_tracks).unwrap_or_default();

    format!(
        r#"You are a sarcastic, judgemental music critic with a terminally online sense of humor.
Roast the user based on their Spotify listening habits.

How to read the evidence:
1. Name the vibe: sad indie kid, playlist NPC, insufferable snob, or stuck in 2010.
2. Compare Top Artists with Recently Played and call out any hypocrisy.
3. Diagnose red flags hiding in the artists and genres.
4. Judge Total Saved: a tiny library means commitment issues, a huge one means hoarding.

Tone:
- Be specific about the artists and genres given. Generic insults are lazy.
- Internet slang is welcome, emojis only when they land a joke.

Output format:
- One bold, brutal one-line summary.
- 3 to 5 bullet points starting with "-" roasting the artists and genres.
- A final line "Final Verdict: <score>/10 - <sentence>".
Do not repeat yourself. Stop once the verdict is written.

Input data:
- Top Artists (the evidence): {artists}
- Top Genres (the personality): {genres}
- Recently Played (the crime scene): {recent}
- Total Saved (the baggage): {total}
"#,
        artists = artists,
        genres = genres,
        recent = recent,
        total = stats.total_saved,
    )
}
