//! Transient resource handles for uploaded font data.
//!
//! A handle plays the part of an object URL: a string the style sheet can
//! reference that stays valid until it is revoked or the session ends.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ahash::RandomState;

const HANDLE_PREFIX: &str = "blob:font-registry/";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    id: u64,
}

impl ResourceHandle {
    pub fn from_id(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> String {
        format!("{}{}", HANDLE_PREFIX, self.id)
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", HANDLE_PREFIX, self.id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Font data is empty")]
    Empty,
}

pub trait ResourceStore {
    fn create(&mut self, data: Arc<[u8]>) -> Result<ResourceHandle, ResourceError>;

    /// Releases a handle. Returns false if it was not live.
    fn revoke(&mut self, handle: &ResourceHandle) -> bool;

    fn is_live(&self, handle: &ResourceHandle) -> bool;

    fn live_count(&self) -> usize;
}

pub struct MemoryResourceStore {
    blobs: HashMap<u64, Arc<[u8]>, RandomState>,
    next_id: u64,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self {
            blobs: HashMap::default(),
            next_id: 1,
        }
    }
}

impl Default for MemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for MemoryResourceStore {
    fn create(&mut self, data: Arc<[u8]>) -> Result<ResourceHandle, ResourceError> {
        if data.is_empty() {
            return Err(ResourceError::Empty);
        }

        let handle = ResourceHandle::from_id(self.next_id);
        self.next_id += 1;
        log::debug!("Created resource {} ({} bytes)", handle, data.len());
        self.blobs.insert(handle.id, data);
        Ok(handle)
    }

    fn revoke(&mut self, handle: &ResourceHandle) -> bool {
        let revoked = self.blobs.remove(&handle.id).is_some();
        if revoked {
            log::debug!("Revoked resource {}", handle);
        }
        revoked
    }

    fn is_live(&self, handle: &ResourceHandle) -> bool {
        self.blobs.contains_key(&handle.id)
    }

    fn live_count(&self) -> usize {
        self.blobs.len()
    }
}
