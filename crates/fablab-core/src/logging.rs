//! Structured logging schema and field name constants for the FabLab client.
//!
//! All crates use these constants for consistent structured logging fields,
//! so the host application's log aggregation can query by standardized field
//! names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed and the failure is surfaced to the caller |
//! | WARN  | Recoverable issue, state left intact (swallowed load errors, stale results) |
//! | INFO  | Session lifecycle (open, close), completed mutations |
//! | DEBUG | Decision points: trigger/skip summarization, merge outcomes |
//! | TRACE | Per-item iteration (per-source mapping, lexicon lookups) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "client", "session"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "sources", "assist", "tools", "registry", "summary", "chat"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "list_sources", "create_source", "source_summary", "chat"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Notebook session id being operated on.
pub const SESSION_ID: &str = "session_id";

/// Source id being operated on.
pub const SOURCE_ID: &str = "source_id";

/// Tool id being operated on.
pub const TOOL_ID: &str = "tool_id";

/// Active display language tag.
pub const LANGUAGE: &str = "language";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of sources in the session list.
pub const SOURCE_COUNT: &str = "source_count";

/// Number of currently selected sources.
pub const SELECTED_COUNT: &str = "selected_count";

/// Summary request generation applied or discarded.
pub const GENERATION: &str = "generation";
