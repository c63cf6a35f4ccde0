//! Tool CRUD: fetch, partial update, publish toggle, public read.
//!
//! Every tool has a private authenticated view and a public read-only view.
//! The public endpoint answers 403 unless the resource's `hasPublicStatus`
//! flag is set server-side.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, instrument};

use fablab_core::{Error, Result, Tool, ToolKind, ToolPatch, ToolStore};

use crate::api::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VisibilityPatch {
    has_public_status: bool,
}

fn map_tool_not_found(e: Error, id: &str) -> Error {
    match e {
        Error::NotFound(_) => Error::ToolNotFound(id.to_string()),
        other => other,
    }
}

#[async_trait]
impl ToolStore for ApiClient {
    #[instrument(skip(self), fields(subsystem = "client", component = "tools", op = "get_tool", tool_id = %id))]
    async fn get_tool(&self, id: &str) -> Result<Tool> {
        let response = self
            .request(Method::GET, &format!("/api/v1/tools/{id}"))
            .send()
            .await?;
        let response = Self::check(response)
            .await
            .map_err(|e| map_tool_not_found(e, id))?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, patch), fields(subsystem = "client", component = "tools", op = "update_tool", tool_id = %id, kind = %kind))]
    async fn update_tool(&self, id: &str, kind: ToolKind, patch: &ToolPatch) -> Result<Tool> {
        if patch.is_empty() {
            return Err(Error::InvalidInput("empty tool patch".to_string()));
        }

        let path = format!("/api/v1/tools/{id}/{}", kind.segment());
        let response = self
            .request(Method::PATCH, &path)
            .json(patch)
            .send()
            .await?;
        let response = Self::check(response)
            .await
            .map_err(|e| map_tool_not_found(e, id))?;

        let tool: Tool = response.json().await?;
        debug!("Updated tool");
        Ok(tool)
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "tools", op = "set_public", tool_id = %id, public = has_public_status))]
    async fn set_public(&self, id: &str, has_public_status: bool) -> Result<Tool> {
        let response = self
            .request(Method::PATCH, &format!("/api/v1/tools/{id}/visibility"))
            .json(&VisibilityPatch { has_public_status })
            .send()
            .await?;
        let response = Self::check(response)
            .await
            .map_err(|e| map_tool_not_found(e, id))?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "tools", op = "get_public_tool", tool_id = %id))]
    async fn get_public_tool(&self, id: &str) -> Result<Tool> {
        let response = self
            .request(Method::GET, &format!("/api/v1/public/tools/{id}"))
            .send()
            .await?;
        let response = Self::check(response)
            .await
            .map_err(|e| map_tool_not_found(e, id))?;
        Ok(response.json().await?)
    }
}
