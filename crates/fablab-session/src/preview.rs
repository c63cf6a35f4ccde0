//! Transient local preview URLs.
//!
//! Sources backed by an uploaded file get a local `blob:` preview URL until
//! the backend serves a real one. These are the one resource the session
//! must release explicitly: on source deletion and on preview replacement.
//! The registry is constructor-injected into the session that owns it and
//! dropped with it; there is no process-wide store.

use std::collections::HashSet;
use uuid::Uuid;

/// Scheme prefix of transient local preview URLs.
pub const LOCAL_BLOB_SCHEME: &str = "blob:";

/// True if the URL is a transient local blob requiring revocation.
pub fn is_local_blob(url: &str) -> bool {
    url.starts_with(LOCAL_BLOB_SCHEME)
}

/// Registry of live local preview URLs for one session.
#[derive(Debug, Default)]
pub struct PreviewUrls {
    live: HashSet<String>,
}

impl PreviewUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint and track a fresh local preview URL.
    pub fn register(&mut self) -> String {
        let url = format!("{}{}", LOCAL_BLOB_SCHEME, Uuid::new_v4());
        self.live.insert(url.clone());
        url
    }

    /// Release a local preview URL. Returns whether it was live. Non-blob
    /// URLs are not tracked and revoke to `false`.
    pub fn revoke(&mut self, url: &str) -> bool {
        self.live.remove(url)
    }

    /// Number of URLs still awaiting release.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_blob() {
        assert!(is_local_blob("blob:4cd38a9d"));
        assert!(!is_local_blob("http://example.com/file.pdf"));
        assert!(!is_local_blob(""));
    }

    #[test]
    fn test_register_and_revoke() {
        let mut previews = PreviewUrls::new();
        let url = previews.register();
        assert!(is_local_blob(&url));
        assert!(previews.is_live(&url));
        assert_eq!(previews.live_count(), 1);

        assert!(previews.revoke(&url));
        assert_eq!(previews.live_count(), 0);
        // Second revoke is a no-op.
        assert!(!previews.revoke(&url));
    }

    #[test]
    fn test_registered_urls_are_distinct() {
        let mut previews = PreviewUrls::new();
        let a = previews.register();
        let b = previews.register();
        assert_ne!(a, b);
        assert_eq!(previews.live_count(), 2);
    }

    #[test]
    fn test_revoking_untracked_url_is_false() {
        let mut previews = PreviewUrls::new();
        assert!(!previews.revoke("blob:never-registered"));
        assert!(!previews.revoke("http://example.com"));
    }
}
