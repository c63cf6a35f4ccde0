//! One open notebook: sources, summary, and chat wired together.

use tracing::info;

use fablab_core::{
    AssistBackend, ChatMessage, LanguageTag, LexiconChain, NewSource, Result, SourceStore,
    StructuredSummary,
};

use crate::chat::ChatLog;
use crate::registry::SourceRegistry;
use crate::summary::{Observation, SummaryOrchestrator, SummaryPhase};

/// Session state for one open notebook.
///
/// Owns the source registry, the summary orchestrator, and the chat log for
/// exactly one session id. Created when the notebook opens, dropped when it
/// closes; nothing here is shared across sessions or stored globally.
///
/// All mutation goes through `&mut self`, so calls through this type are
/// naturally serialized. The stale-result guarantees live one level down in
/// [`SummaryOrchestrator`], whose observe/complete split stays correct for
/// drivers that do overlap requests.
pub struct NotebookSession {
    registry: SourceRegistry,
    orchestrator: SummaryOrchestrator,
    chat: ChatLog,
    language: LanguageTag,
    lexicon: LexiconChain,
}

impl NotebookSession {
    /// Open a session for a notebook id in a display language.
    pub fn open(
        session_id: impl Into<String>,
        language: LanguageTag,
        lexicon: LexiconChain,
    ) -> Self {
        let registry = SourceRegistry::new(session_id);
        info!(
            subsystem = "session",
            session_id = %registry.session_id(),
            language = %language,
            "Notebook session opened"
        );
        Self {
            registry,
            orchestrator: SummaryOrchestrator::new(),
            chat: ChatLog::new(),
            language,
            lexicon,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    pub fn summary(&self) -> Option<&StructuredSummary> {
        self.orchestrator.summary()
    }

    pub fn summary_phase(&self) -> SummaryPhase {
        self.orchestrator.phase()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    /// Switch the display language. The next [`Self::sync_summary`] call
    /// re-triggers summarization, language being a trigger input.
    pub fn set_language(&mut self, language: LanguageTag) {
        self.language = language;
    }

    /// Load and merge the backend source list (errors swallowed, see
    /// [`SourceRegistry::load`]).
    pub async fn load<S: SourceStore + ?Sized>(&mut self, store: &S) {
        self.registry.load(store).await;
    }

    /// Add a source; it joins the context selected.
    pub async fn add_source<S: SourceStore + ?Sized>(
        &mut self,
        store: &S,
        req: NewSource,
    ) -> Result<String> {
        self.registry.add(store, req).await
    }

    /// Flip a source in or out of the context.
    pub fn toggle_source(&mut self, id: &str) -> bool {
        self.registry.toggle(id)
    }

    /// Delete a source; failures leave the list unchanged and surface.
    pub async fn delete_source<S: SourceStore + ?Sized>(
        &mut self,
        store: &S,
        id: &str,
    ) -> Result<()> {
        self.registry.delete(store, id).await
    }

    /// Reconcile the summary with the current selection.
    ///
    /// Observes the selected set; when a request is due, performs it and
    /// applies the result through the orchestrator's ticket check. Returns
    /// whether a fresh summary was applied.
    pub async fn sync_summary<A: AssistBackend + ?Sized>(&mut self, assist: &A) -> bool {
        let observation = self
            .orchestrator
            .observe(self.registry.selected_count(), &self.language);

        match observation {
            Observation::Trigger(ticket) => {
                let inputs = self.registry.summary_inputs();
                let outcome = assist.source_summary(&inputs, &self.language).await;
                self.orchestrator.complete(ticket, outcome)
            }
            Observation::Cleared | Observation::Unchanged => false,
        }
    }

    /// One chat turn against the currently selected sources.
    pub async fn send_chat<A: AssistBackend + ?Sized>(
        &mut self,
        assist: &A,
        message: &str,
    ) -> ChatMessage {
        let inputs = self.registry.summary_inputs();
        self.chat
            .send(assist, &inputs, message, &self.language, &self.lexicon)
            .await
    }

    /// Close the session: invalidate outstanding summary requests so late
    /// responses are never applied to a view that no longer exists.
    pub fn close(&mut self) {
        self.orchestrator.reset();
        info!(
            subsystem = "session",
            session_id = %self.registry.session_id(),
            "Notebook session closed"
        );
    }
}
