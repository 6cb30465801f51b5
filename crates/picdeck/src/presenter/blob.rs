use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const SCHEME: &str = "blob:picdeck/";

/// An owned reference to image bytes held by a [`BlobStore`].
///
/// Not `Clone`: each URL is revoked exactly once, by handing it back to the
/// store that issued it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct BlobUrl(u64);

impl BlobUrl {
    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}", self.0)
    }
}

/// In-process registry of transient image data.
#[derive(Debug, Default)]
pub struct BlobStore {
    next_id: u64,
    entries: HashMap<u64, Arc<[u8]>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, bytes: impl Into<Arc<[u8]>>) -> BlobUrl {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, bytes.into());
        BlobUrl(id)
    }

    pub fn get(&self, url: &BlobUrl) -> Option<Arc<[u8]>> {
        self.entries.get(&url.0).cloned()
    }

    /// Release the bytes behind `url`. Outstanding `Arc`s handed out by
    /// [`BlobStore::get`] stay valid until they are dropped.
    pub fn revoke(&mut self, url: BlobUrl) {
        if self.entries.remove(&url.0).is_none() {
            log::debug!("revoke of unknown blob {url}");
        }
    }

    /// Number of blobs created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }
}
