//! LLM-proxy wrappers: structured source summaries and chat.
//!
//! Both calls are passthroughs to the backend Gemini proxy. Neither retries
//! automatically; a failed call surfaces its error and the next selection
//! change naturally re-triggers summarization.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument, warn};

use fablab_core::{
    AssistBackend, ChatMessage, ChatRole, Error, LanguageTag, Result, StructuredSummary,
    SummaryInput,
};

use crate::api::ApiClient;

const SOURCE_SUMMARY_PATH: &str = "/api/v1/gemini/source-summary";
const CHAT_PATH: &str = "/api/v1/gemini/chat";

/// Request payload for the source-summary endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRequest<'a> {
    sources: &'a [SummaryInput],
    language: &'a str,
}

/// One prior turn in the chat request history.
#[derive(Serialize, Deserialize)]
struct HistoryEntry {
    role: ChatRole,
    content: String,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// Request payload for the chat endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    history: Vec<HistoryEntry>,
    sources: &'a [SummaryInput],
    message: &'a str,
    language: &'a str,
}

/// Response from the chat endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[async_trait]
impl AssistBackend for ApiClient {
    #[instrument(skip(self, sources), fields(subsystem = "client", component = "assist", op = "source_summary", selected_count = sources.len(), language = %language))]
    async fn source_summary(
        &self,
        sources: &[SummaryInput],
        language: &LanguageTag,
    ) -> Result<StructuredSummary> {
        let start = Instant::now();
        let request = SummaryRequest {
            sources,
            language: language.as_str(),
        };

        let response = self
            .request(Method::POST, SOURCE_SUMMARY_PATH)
            .json(&request)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let summary: StructuredSummary = response.json().await?;

        // Backend contract: one analysis per input source, same order. A
        // mismatched response must never be rendered as a valid summary.
        if summary.sources_analysis.len() != sources.len() {
            return Err(Error::Summary(format!(
                "backend returned {} analyses for {} sources",
                summary.sources_analysis.len(),
                sources.len()
            )));
        }

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(duration_ms = elapsed, "Summary complete");
        if elapsed > 30_000 {
            warn!(
                duration_ms = elapsed,
                selected_count = sources.len(),
                slow = true,
                "Slow summarization call"
            );
        }
        Ok(summary)
    }

    #[instrument(skip(self, history, sources, message), fields(subsystem = "client", component = "assist", op = "chat", selected_count = sources.len(), language = %language))]
    async fn chat(
        &self,
        history: &[ChatMessage],
        sources: &[SummaryInput],
        message: &str,
        language: &LanguageTag,
    ) -> Result<String> {
        let start = Instant::now();
        let request = ChatRequest {
            history: history.iter().map(HistoryEntry::from).collect(),
            sources,
            message,
            language: language.as_str(),
        };

        let response = self
            .request(Method::POST, CHAT_PATH)
            .json(&request)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let result: ChatResponse = response.json().await?;
        debug!(
            response_len = result.response.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Chat turn complete"
        );
        Ok(result.response)
    }
}
