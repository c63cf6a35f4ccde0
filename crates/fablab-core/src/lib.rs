//! # fablab-core
//!
//! Core types, traits, and abstractions for the FabLab client.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the transport (`fablab-client`) and state (`fablab-session`) crates
//! depend on.

pub mod error;
pub mod lang;
pub mod logging;
pub mod models;
pub mod tools;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use lang::{LanguageTag, Lexicon, LexiconChain};
pub use models::*;
pub use tools::{RequiredField, Tool, ToolKind, ToolPatch};
pub use traits::*;
