//! Gemini provider
//!
//! Streams replies from the generateContent API over SSE. The whole prompt
//! (persona + transcript + cue) travels as a single user text part, matching
//! how the page submits one rendered text blob per turn.

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use super::{Provider, StreamEvent};
use crate::config::CONFIG;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini streaming client
pub struct GeminiProvider {
    client: HttpClient,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Create a new Gemini provider for the configured model
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: HttpClient::new(),
            api_key,
            model,
            timeout: Duration::from_secs(CONFIG.gemini_timeout_secs),
        }
    }

    /// Create from environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = crate::config::require_api_key()?;
        Ok(Self::new(api_key, CONFIG.gemini_model.clone()))
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/{}:streamGenerateContent?alt=sse&key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        )
    }

    /// Build the request body for a prompt
    fn build_request(prompt: String) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: CONFIG.temperature,
                max_output_tokens: CONFIG.max_output_tokens,
                top_p: CONFIG.top_p,
                top_k: CONFIG.top_k,
            },
        }
    }

    /// Pull the text fragments out of one SSE data payload
    fn extract_deltas(response: &GeminiResponse) -> Vec<String> {
        let mut deltas = Vec::new();
        if let Some(candidates) = &response.candidates {
            for candidate in candidates {
                for part in &candidate.content.parts {
                    if let Some(text) = &part.text {
                        if !text.is_empty() {
                            deltas.push(text.clone());
                        }
                    }
                }
            }
        }
        deltas
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate_stream(&self, prompt: String) -> Result<mpsc::Receiver<StreamEvent>> {
        let (tx, rx) = mpsc::channel(100);

        let url = self.stream_url();
        let api_request = Self::build_request(prompt);
        let client = self.client.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            match client
                .post(&url)
                .json(&api_request)
                .timeout(timeout)
                .send()
                .await
            {
                Ok(response) => {
                    if !response.status().is_success() {
                        let status = response.status();
                        let body = response.text().await.unwrap_or_default();
                        let _ = tx
                            .send(StreamEvent::Error(format!(
                                "Gemini API error: {} - {}",
                                status, body
                            )))
                            .await;
                        return;
                    }

                    let mut stream = response.bytes_stream();
                    let mut buffer = String::new();

                    while let Some(chunk) = stream.next().await {
                        match chunk {
                            Ok(bytes) => {
                                buffer.push_str(&String::from_utf8_lossy(&bytes));

                                // Parse SSE events line by line
                                while let Some(line_end) = buffer.find('\n') {
                                    let line = buffer[..line_end].to_string();
                                    buffer = buffer[line_end + 1..].to_string();

                                    if let Some(data) = line.strip_prefix("data: ") {
                                        if let Ok(response) =
                                            serde_json::from_str::<GeminiResponse>(data)
                                        {
                                            if let Some(error) = response.error {
                                                let _ = tx
                                                    .send(StreamEvent::Error(format!(
                                                        "Gemini error: {}",
                                                        error.message
                                                    )))
                                                    .await;
                                                return;
                                            }
                                            for delta in Self::extract_deltas(&response) {
                                                let _ =
                                                    tx.send(StreamEvent::TextDelta(delta)).await;
                                            }
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                                return;
                            }
                        }
                    }

                    let _ = tx.send(StreamEvent::Done).await;
                }
                Err(e) => {
                    let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                }
            }
        });

        Ok(rx)
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "topK")]
    top_k: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}
