//! Display-language resolution.
//!
//! Dictionaries are a validated, versioned schema rather than free-form
//! maps: a [`Lexicon`] declares its schema version and language, and a
//! [`LexiconChain`] resolves keys through an ordered fallback chain:
//! requested language, then backend custom language, then built-in default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Lexicon schema version this client understands.
pub const LEXICON_SCHEMA_VERSION: u32 = 1;

/// A validated display-language tag: a 2–3 letter lowercase primary subtag
/// with an optional 2-letter uppercase region (`en`, `pt-BR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and validate a tag. Invalid input is an error, never a silent
    /// passthrough.
    pub fn parse(tag: &str) -> Result<Self> {
        let (primary, region) = match tag.split_once('-') {
            Some((p, r)) => (p, Some(r)),
            None => (tag, None),
        };

        let primary_ok = (2..=3).contains(&primary.len())
            && primary.chars().all(|c| c.is_ascii_lowercase());
        let region_ok = match region {
            None => true,
            Some(r) => r.len() == 2 && r.chars().all(|c| c.is_ascii_uppercase()),
        };

        if primary_ok && region_ok {
            Ok(Self(tag.to_string()))
        } else {
            Err(Error::InvalidInput(format!("invalid language tag: {tag:?}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl FromStr for LanguageTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A versioned key-value dictionary for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lexicon {
    pub schema_version: u32,
    pub language: LanguageTag,
    pub entries: HashMap<String, String>,
}

impl Lexicon {
    /// An empty lexicon for the given language at the current schema version.
    pub fn empty(language: LanguageTag) -> Self {
        Self {
            schema_version: LEXICON_SCHEMA_VERSION,
            language,
            entries: HashMap::new(),
        }
    }

    /// Parse a lexicon from backend JSON, rejecting unknown schema versions.
    pub fn from_json(json: &str) -> Result<Self> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != LEXICON_SCHEMA_VERSION {
            return Err(Error::InvalidInput(format!(
                "unsupported lexicon schema version {} (expected {})",
                self.schema_version, LEXICON_SCHEMA_VERSION
            )));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// Ordered fallback chain over lexicons.
///
/// Lookup walks requested → custom → default. A key absent everywhere
/// resolves to the key itself, so call sites always render *something*
/// instead of optional-chaining at every access.
#[derive(Debug, Clone)]
pub struct LexiconChain {
    layers: Vec<Lexicon>,
}

impl LexiconChain {
    pub fn new(requested: Option<Lexicon>, custom: Option<Lexicon>, default: Lexicon) -> Self {
        let mut layers = Vec::with_capacity(3);
        layers.extend(requested);
        layers.extend(custom);
        layers.push(default);
        Self { layers }
    }

    /// The language the chain resolves for: the first layer's tag.
    pub fn language(&self) -> &LanguageTag {
        &self.layers[0].language
    }

    /// Look a key up through the chain, `None` if absent everywhere.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.layers.iter().find_map(|lexicon| lexicon.get(key))
    }

    /// Resolve a key, falling back to the key itself if absent everywhere.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }
}
