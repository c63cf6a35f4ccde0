//! The authoritative in-memory source list for one notebook session.
//!
//! The registry reconciles local state with the backend: loads merge by id
//! without overwriting entries already present (local `selected` state and
//! optimistic additions survive a reload), additions go through the backend
//! first so ids stay backend-assigned, and deletions only drop local state
//! once the backend has confirmed.

use tracing::{debug, warn};

use fablab_core::{NewSource, Result, Source, SourceStore, SummaryInput};

use crate::preview::{is_local_blob, PreviewUrls};

/// In-memory source list for one notebook session.
#[derive(Debug)]
pub struct SourceRegistry {
    session_id: String,
    sources: Vec<Source>,
    previews: PreviewUrls,
}

impl SourceRegistry {
    /// Create an empty registry for a session. Built when the notebook
    /// opens and dropped when it closes; never shared across sessions.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            sources: Vec::new(),
            previews: PreviewUrls::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Sources currently included in the chat/summary context.
    pub fn selected(&self) -> Vec<&Source> {
        self.sources.iter().filter(|s| s.selected).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.sources.iter().filter(|s| s.selected).count()
    }

    /// Project the selected sources into the wire shape for the LLM proxy.
    pub fn summary_inputs(&self) -> Vec<SummaryInput> {
        self.sources
            .iter()
            .filter(|s| s.selected)
            .map(Source::summary_input)
            .collect()
    }

    /// Fetch the backend source list and merge it into the local one.
    ///
    /// Merge is append-only: records whose id is already present are
    /// skipped, never used to overwrite the local entry. Failures are
    /// logged and swallowed; the list remains whatever it was.
    pub async fn load<S: SourceStore + ?Sized>(&mut self, store: &S) {
        let records = match store.list_sources(&self.session_id).await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    subsystem = "session",
                    component = "registry",
                    session_id = %self.session_id,
                    error = %e,
                    "Failed to load sources; keeping current list"
                );
                return;
            }
        };

        let before = self.sources.len();
        for record in records {
            if self.get(&record.id).is_none() {
                self.sources.push(Source::from_api(record));
            }
        }
        debug!(
            subsystem = "session",
            component = "registry",
            session_id = %self.session_id,
            source_count = self.sources.len(),
            appended = self.sources.len() - before,
            "Merged backend sources"
        );
    }

    /// Create a source on the backend and append it, selected, to the list.
    ///
    /// There is no optimistic insert: the id must be backend-assigned and
    /// stable, so nothing is appended until the create call succeeds. On
    /// failure the list is unchanged and the error is logged and returned;
    /// callers showing a form may ignore it and stay editable.
    pub async fn add<S: SourceStore + ?Sized>(
        &mut self,
        store: &S,
        req: NewSource,
    ) -> Result<String> {
        let record = match store.create_source(&req).await {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    subsystem = "session",
                    component = "registry",
                    session_id = %self.session_id,
                    error = %e,
                    "Failed to add source"
                );
                return Err(e);
            }
        };

        let id = record.id.clone();
        if self.get(&id).is_some() {
            // Backend re-sent an id we already hold (e.g. a double submit);
            // the merge rule applies here too.
            debug!(
                subsystem = "session",
                component = "registry",
                source_id = %id,
                "Create returned an existing id; keeping local entry"
            );
            return Ok(id);
        }

        let mut source = Source::from_api(record);
        source.selected = true;
        // The backend record only carries a file path; the request knows the
        // richer local payload.
        if let Some(text) = req.text {
            source.content = text;
        }
        if let Some(url) = req.url {
            if source.content.is_empty() {
                source.content = url.clone();
            }
            source.url.get_or_insert(url.clone());
            source.preview_url.get_or_insert(url);
        }
        if req.file.is_some() && source.preview_url.is_none() {
            source.preview_url = Some(self.previews.register());
        }

        self.sources.push(source);
        debug!(
            subsystem = "session",
            component = "registry",
            session_id = %self.session_id,
            source_id = %id,
            source_count = self.sources.len(),
            "Added source"
        );
        Ok(id)
    }

    /// Flip a source's `selected` flag. No-op returning `false` when the id
    /// is absent. Pure and synchronous; inclusion in the summary/chat
    /// context is decided by this flag alone.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.sources.iter_mut().find(|s| s.id == id) {
            Some(source) => {
                source.selected = !source.selected;
                true
            }
            None => false,
        }
    }

    /// Delete a source on the backend, then drop it locally and release a
    /// local blob preview.
    ///
    /// On failure the list is left unchanged and the error is returned:
    /// unlike load/add, a silent deletion failure would misrepresent state
    /// to the user.
    pub async fn delete<S: SourceStore + ?Sized>(&mut self, store: &S, id: &str) -> Result<()> {
        store.delete_source(&self.session_id, id).await?;

        if let Some(pos) = self.sources.iter().position(|s| s.id == id) {
            let source = self.sources.remove(pos);
            if let Some(preview) = &source.preview_url {
                if is_local_blob(preview) {
                    self.previews.revoke(preview);
                }
            }
            debug!(
                subsystem = "session",
                component = "registry",
                session_id = %self.session_id,
                source_id = %id,
                source_count = self.sources.len(),
                "Deleted source"
            );
        }
        Ok(())
    }

    /// Replace a source's preview URL, releasing a previous local blob.
    pub fn set_preview(&mut self, id: &str, preview_url: String) -> bool {
        let Some(source) = self.sources.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if let Some(old) = source.preview_url.replace(preview_url) {
            if is_local_blob(&old) {
                self.previews.revoke(&old);
            }
        }
        true
    }

    /// Live local preview URLs not yet released.
    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }
}
