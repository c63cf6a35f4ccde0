//! Core traits for the FabLab client abstractions.
//!
//! The session layer depends on these seams rather than on the concrete HTTP
//! client, enabling pluggable transports and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::lang::LanguageTag;
use crate::models::{ApiSource, ChatMessage, NewSource, StructuredSummary, SummaryInput};
use crate::tools::{Tool, ToolKind, ToolPatch};

/// Backend store for a notebook session's sources.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Fetch the backend's source records for a session.
    async fn list_sources(&self, session_id: &str) -> Result<Vec<ApiSource>>;

    /// Create a source; the backend assigns the id.
    async fn create_source(&self, req: &NewSource) -> Result<ApiSource>;

    /// Delete a source by id.
    async fn delete_source(&self, session_id: &str, source_id: &str) -> Result<()>;
}

/// LLM proxy operations over the selected sources.
#[async_trait]
pub trait AssistBackend: Send + Sync {
    /// Summarize the given sources in the given display language.
    ///
    /// The returned summary carries exactly one analysis per input source,
    /// in input order; implementations must reject responses that violate
    /// this.
    async fn source_summary(
        &self,
        sources: &[SummaryInput],
        language: &LanguageTag,
    ) -> Result<StructuredSummary>;

    /// One chat turn against the selected sources.
    async fn chat(
        &self,
        history: &[ChatMessage],
        sources: &[SummaryInput],
        message: &str,
        language: &LanguageTag,
    ) -> Result<String>;
}

/// Backend store for tool resources (assistants, prompts, notebooks,
/// projects).
#[async_trait]
pub trait ToolStore: Send + Sync {
    /// Fetch a tool by id (authenticated view).
    async fn get_tool(&self, id: &str) -> Result<Tool>;

    /// Partially update a tool through its kind-gated sub-resource endpoint.
    async fn update_tool(&self, id: &str, kind: ToolKind, patch: &ToolPatch) -> Result<Tool>;

    /// Toggle the public/private visibility flag.
    async fn set_public(&self, id: &str, has_public_status: bool) -> Result<Tool>;

    /// Fetch the unauthenticated public view; forbidden unless published.
    async fn get_public_tool(&self, id: &str) -> Result<Tool>;
}
