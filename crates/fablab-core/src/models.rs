//! Core data models for the FabLab client.
//!
//! These types are shared across all FabLab client crates and represent the
//! notebook session's domain entities: ingested sources, the structured
//! summary derived from them, and the chat transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// SOURCE TYPES
// =============================================================================

/// Semantic type of an ingested source, used for rendering and preview logic.
///
/// Closed set; backend category strings are normalized into it via
/// [`SourceKind::from_api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pdf,
    Url,
    Text,
    Video,
    Image,
    Html,
    Translation,
    Code,
    Config,
}

impl SourceKind {
    /// Normalize a backend category string into a semantic kind.
    ///
    /// Case-insensitive and total: every input maps to exactly one kind,
    /// with unrecognized categories falling back to [`SourceKind::Text`] so
    /// the content is still treated as displayable text rather than dropped.
    pub fn from_api(backend_type: &str) -> Self {
        match backend_type.to_ascii_uppercase().as_str() {
            "DOC" | "PDF" => Self::Pdf,
            "IMAGE" => Self::Image,
            "VIDEO" => Self::Video,
            "TEXT" => Self::Text,
            "CODE" => Self::Code,
            "WEBSITE" => Self::Url,
            "HTML" => Self::Html,
            "CONFIG" => Self::Config,
            "TRANSLATION" => Self::Translation,
            _ => Self::Text,
        }
    }

    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Url => "url",
            Self::Text => "text",
            Self::Video => "video",
            Self::Image => "image",
            Self::Html => "html",
            Self::Translation => "translation",
            Self::Code => "code",
            Self::Config => "config",
        }
    }

    /// Backend category string used when creating a source of this kind.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Pdf => "DOC",
            Self::Url => "WEBSITE",
            Self::Text => "TEXT",
            Self::Video => "VIDEO",
            Self::Image => "IMAGE",
            Self::Html => "HTML",
            Self::Translation => "TRANSLATION",
            Self::Code => "CODE",
            Self::Config => "CONFIG",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend source record as returned by the sources endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One ingested document/media/text unit attached to a notebook session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Opaque backend-assigned identifier, unique within a session. The sole
    /// key for lookups and merges.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Semantic type used for rendering/preview logic.
    pub kind: SourceKind,
    /// Raw backend category string (e.g. "DOC", "WEBSITE"), kept for
    /// display labels.
    pub backend_type: Option<String>,
    /// Textual payload fed to summarization: extracted text, base64, or a
    /// URL echo.
    pub content: String,
    /// Location for download, if any.
    pub url: Option<String>,
    /// Location for preview. May be a transient local blob URL that must be
    /// revoked when the source is deleted.
    pub preview_url: Option<String>,
    /// Creation timestamp.
    pub date_added: DateTime<Utc>,
    /// Whether this source participates in the chat/summary context. This is
    /// the only field that decides inclusion; it is never inferred from kind
    /// or content.
    pub selected: bool,
}

impl Source {
    /// Map a backend record into a local source.
    ///
    /// `filePath` feeds both `url` and `preview_url`; the content payload is
    /// the path/URL echo until richer content is attached. Loaded sources
    /// start deselected.
    pub fn from_api(api: ApiSource) -> Self {
        let kind = SourceKind::from_api(&api.source_type);
        let content = api.file_path.clone().unwrap_or_default();
        Self {
            id: api.id,
            title: api.name,
            kind,
            backend_type: Some(api.source_type),
            content,
            url: api.file_path.clone(),
            preview_url: api.file_path,
            date_added: api.created_at.unwrap_or_else(Utc::now),
            selected: false,
        }
    }

    /// Project this source into the wire shape sent to the LLM proxy.
    pub fn summary_input(&self) -> SummaryInput {
        SummaryInput {
            id: self.id.clone(),
            title: self.title.clone(),
            kind: self.kind,
            content: self.content.clone(),
            selected: self.selected,
        }
    }
}

// =============================================================================
// SOURCE CREATION
// =============================================================================

/// File payload attached to a source-creation request.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Request for creating a source in a notebook session.
///
/// Exactly the fields of the multipart create form. Absent optional fields
/// are omitted from the form entirely, never sent empty.
#[derive(Debug, Clone)]
pub struct NewSource {
    pub session_id: String,
    pub name: String,
    pub kind: SourceKind,
    pub file: Option<FileUpload>,
    pub url: Option<String>,
    pub text: Option<String>,
}

impl NewSource {
    /// A source backed by an uploaded file.
    pub fn from_file(session_id: impl Into<String>, name: impl Into<String>, kind: SourceKind, file: FileUpload) -> Self {
        Self {
            session_id: session_id.into(),
            name: name.into(),
            kind,
            file: Some(file),
            url: None,
            text: None,
        }
    }

    /// A source backed by a remote URL (websites, videos).
    pub fn from_url(session_id: impl Into<String>, name: impl Into<String>, kind: SourceKind, url: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            name: name.into(),
            kind,
            file: None,
            url: Some(url.into()),
            text: None,
        }
    }

    /// A source backed by inline text.
    pub fn from_text(session_id: impl Into<String>, name: impl Into<String>, kind: SourceKind, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            name: name.into(),
            kind,
            file: None,
            url: None,
            text: Some(text.into()),
        }
    }
}

// =============================================================================
// SUMMARY TYPES
// =============================================================================

/// Wire shape of one selected source sent to the summarization/chat proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInput {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub content: String,
    pub selected: bool,
}

/// Per-source analysis within a structured summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAnalysis {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub summary: String,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

/// Backend-computed synthesis over the currently selected sources.
///
/// Derived, never persisted: recomputed whenever the selected-source set
/// changes and discarded when nothing is selected. `sources_analysis` holds
/// exactly one entry per input source, in input order; that length contract
/// is enforced by the client before a summary is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSummary {
    pub global_overview: String,
    pub sources_analysis: Vec<SourceAnalysis>,
}

// =============================================================================
// CHAT TYPES
// =============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn in the notebook chat transcript.
///
/// Messages form an append-only ordered sequence; they are never reordered
/// or mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with a fresh local id, stamped now.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}
