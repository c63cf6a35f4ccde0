//! Tool resource types.
//!
//! "Tool" is the generic backend resource encompassing assistants, prompts,
//! notebooks, and projects, distinguished by a `type` discriminant. The
//! discriminant also gates which sub-resource endpoint a partial update goes
//! to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Tool discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Assistant,
    Prompt,
    Notebook,
    Project,
}

impl ToolKind {
    /// Sub-resource path segment for kind-gated update endpoints.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Prompt => "prompt",
            Self::Notebook => "notebook",
            Self::Project => "project",
        }
    }
}

impl FromStr for ToolKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assistant" => Ok(Self::Assistant),
            "prompt" => Ok(Self::Prompt),
            "notebook" => Ok(Self::Notebook),
            "project" => Ok(Self::Project),
            _ => Err(Error::InvalidInput(format!("unknown tool kind: {s}"))),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A tool resource as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ToolKind,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Per-resource flag gating unauthenticated read access.
    pub has_public_status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update payload for a tool. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_public_status: Option<bool>,
}

impl ToolPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.has_public_status.is_none()
    }
}

/// Fields an editor must fill before a tool draft may be left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Description,
    Category,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Description => write!(f, "description"),
            Self::Category => write!(f, "category"),
        }
    }
}
