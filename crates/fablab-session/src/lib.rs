//! # fablab-session
//!
//! Client-side state for FabLab notebook sessions: the source registry, the
//! summary orchestrator, and the chat transcript, plus the tool editor's
//! exit guard.
//!
//! Everything here is an explicit, owned object with session lifetime:
//! created when a view opens, dropped when it closes. The crate talks to the
//! backend only through the `fablab-core` traits (`SourceStore`,
//! `AssistBackend`, `ToolStore`), so any transport (or a test double) plugs
//! in.
//!
//! ## Control flow
//!
//! ```text
//! UI ──▶ SourceRegistry (add/toggle/delete/load)
//!              │ selected set
//!              ▼
//!        SummaryOrchestrator ──▶ one in-flight summary per change,
//!              │                 stale results discarded by generation
//!              ▼
//!        StructuredSummary (or none)
//! ```

pub mod chat;
pub mod editor;
pub mod notebook;
pub mod preview;
pub mod registry;
pub mod summary;

pub use chat::{ChatLog, CHAT_ERROR_KEY};
pub use editor::{ExitOutcome, ToolEditor};
pub use notebook::NotebookSession;
pub use preview::{is_local_blob, PreviewUrls, LOCAL_BLOB_SCHEME};
pub use registry::SourceRegistry;
pub use summary::{Observation, SummaryOrchestrator, SummaryPhase, SummaryTicket};
