//! Tool editor draft with a required-field exit guard.
//!
//! Leaving an editor never silently drops unsaved required-field state:
//! a dirty draft missing title, description, or category needs explicit
//! confirmation before its changes are discarded.

use fablab_core::{Error, RequiredField, Result, Tool, ToolPatch, ToolStore};

/// What happens when the user asks to leave the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Leaving is fine: nothing unsaved, or the draft is complete.
    Clean,
    /// The draft has unsaved changes with required fields missing; the
    /// caller must confirm the discard or keep editing.
    NeedsConfirmation(Vec<RequiredField>),
}

/// Editing state for one tool.
#[derive(Debug, Clone)]
pub struct ToolEditor {
    original: Tool,
    draft: Tool,
    dirty: bool,
}

impl ToolEditor {
    pub fn new(tool: Tool) -> Self {
        Self {
            original: tool.clone(),
            draft: tool,
            dirty: false,
        }
    }

    pub fn draft(&self) -> &Tool {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.dirty = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.dirty = true;
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.draft.category = category.into();
        self.dirty = true;
    }

    pub fn set_public(&mut self, has_public_status: bool) {
        self.draft.has_public_status = has_public_status;
        self.dirty = true;
    }

    /// Required fields the draft leaves empty.
    pub fn missing_required(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.draft.title.trim().is_empty() {
            missing.push(RequiredField::Title);
        }
        if self.draft.description.trim().is_empty() {
            missing.push(RequiredField::Description);
        }
        if self.draft.category.trim().is_empty() {
            missing.push(RequiredField::Category);
        }
        missing
    }

    /// Ask to leave the editor.
    pub fn request_exit(&self) -> ExitOutcome {
        if !self.dirty {
            return ExitOutcome::Clean;
        }
        let missing = self.missing_required();
        if missing.is_empty() {
            ExitOutcome::Clean
        } else {
            ExitOutcome::NeedsConfirmation(missing)
        }
    }

    /// Discard unsaved changes, reverting to the last saved state.
    pub fn confirm_discard(&mut self) {
        self.draft = self.original.clone();
        self.dirty = false;
    }

    /// The minimal patch covering every edited field.
    pub fn patch(&self) -> ToolPatch {
        let mut patch = ToolPatch::default();
        if self.draft.title != self.original.title {
            patch.title = Some(self.draft.title.clone());
        }
        if self.draft.description != self.original.description {
            patch.description = Some(self.draft.description.clone());
        }
        if self.draft.category != self.original.category {
            patch.category = Some(self.draft.category.clone());
        }
        if self.draft.has_public_status != self.original.has_public_status {
            patch.has_public_status = Some(self.draft.has_public_status);
        }
        patch
    }

    /// Persist the draft through its kind-gated endpoint.
    ///
    /// Rejected locally while required fields are missing; a no-op when
    /// nothing changed. On success the saved state becomes the new baseline.
    pub async fn save<S: ToolStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            let fields: Vec<String> = missing.iter().map(ToString::to_string).collect();
            return Err(Error::InvalidInput(format!(
                "missing required fields: {}",
                fields.join(", ")
            )));
        }

        let patch = self.patch();
        if patch.is_empty() {
            return Ok(());
        }

        let saved = store
            .update_tool(&self.draft.id, self.draft.kind, &patch)
            .await?;
        self.original = saved.clone();
        self.draft = saved;
        self.dirty = false;
        Ok(())
    }
}
