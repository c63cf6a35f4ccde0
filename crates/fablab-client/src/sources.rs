//! Source CRUD against the notebook sources endpoints.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::time::Instant;
use tracing::{debug, instrument};

use fablab_core::{ApiSource, Error, NewSource, Result, SourceStore};

use crate::api::ApiClient;

fn sources_path(session_id: &str) -> String {
    format!("/api/v1/notebooks/{session_id}/sources")
}

impl ApiClient {
    /// Build the multipart create form. `name` and `type` are always
    /// present; `file`, `url`, and `text` parts exist only when the request
    /// carries them; absent fields are omitted, never sent empty.
    fn create_source_form(req: &NewSource) -> Result<Form> {
        let mut form = Form::new()
            .text("sessionId", req.session_id.clone())
            .text("name", req.name.clone())
            .text("type", req.kind.api_name());

        if let Some(file) = &req.file {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| {
                    Error::InvalidInput(format!("invalid mime type {}: {}", file.mime_type, e))
                })?;
            form = form.part("file", part);
        }
        if let Some(url) = &req.url {
            form = form.text("url", url.clone());
        }
        if let Some(text) = &req.text {
            form = form.text("text", text.clone());
        }

        Ok(form)
    }
}

#[async_trait]
impl SourceStore for ApiClient {
    #[instrument(skip(self), fields(subsystem = "client", component = "sources", op = "list_sources", session_id = %session_id))]
    async fn list_sources(&self, session_id: &str) -> Result<Vec<ApiSource>> {
        let start = Instant::now();

        let response = self
            .request(Method::GET, &sources_path(session_id))
            .send()
            .await?;
        let response = Self::check(response).await?;

        let records: Vec<ApiSource> = response.json().await?;
        debug!(
            source_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed sources"
        );
        Ok(records)
    }

    #[instrument(skip(self, req), fields(subsystem = "client", component = "sources", op = "create_source", session_id = %req.session_id, kind = %req.kind))]
    async fn create_source(&self, req: &NewSource) -> Result<ApiSource> {
        let start = Instant::now();
        let form = Self::create_source_form(req)?;

        let response = self
            .request(Method::POST, &sources_path(&req.session_id))
            .multipart(form)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let record: ApiSource = response.json().await?;
        debug!(
            source_id = %record.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Created source"
        );
        Ok(record)
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "sources", op = "delete_source", session_id = %session_id, source_id = %source_id))]
    async fn delete_source(&self, session_id: &str, source_id: &str) -> Result<()> {
        let path = format!("{}/{}", sources_path(session_id), source_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        Self::check(response)
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::SourceNotFound(source_id.to_string()),
                other => other,
            })?;

        debug!("Deleted source");
        Ok(())
    }
}
