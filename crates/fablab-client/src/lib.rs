//! # fablab-client
//!
//! HTTP client for the FabLab REST backend and its LLM proxy.
//!
//! The backend performs all substantive work (LLM calls, persistence,
//! authorization); this crate is thin transport: request construction,
//! response parsing, and error mapping. The session layer consumes it
//! through the `fablab-core` traits (`SourceStore`, `AssistBackend`).
//!
//! ## API groups
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | [`sources`] | notebook source list/create/delete |
//! | [`assist`] | `gemini/source-summary`, `gemini/chat` |
//! | [`tools`] | tool fetch, kind-gated patch, publish toggle, public read |

pub mod api;
pub mod assist;
pub mod config;
pub mod sources;
pub mod tools;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
