//! Display handles for encoded output.
//!
//! A [`DisplayHandle`] lets a rendering collaborator show the encoded bytes
//! without copying them. Handles are acquired when a result is assembled and
//! must be released exactly once by the caller; nothing is released on drop.
//! A second release is harmless to the registry but is reported as a caller
//! bug.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;

static GLOBAL_REGISTRY: Lazy<HandleRegistry> = Lazy::new(HandleRegistry::new);

/// Opaque reference to encoded bytes held by a [`HandleRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(u64);

impl DisplayHandle {
    /// Rebuild a handle from an id previously obtained via [`DisplayHandle::id`].
    pub fn from_id(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pixpress:display/{}", self.0)
    }
}

/// What a release call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The handle was live and is now gone.
    Released,
    /// The handle was already released (or never issued). Caller bug.
    AlreadyReleased,
}

/// Thread-safe table of live display handles.
#[derive(Debug)]
pub struct HandleRegistry {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Arc<[u8]>>>,
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry used by [`crate::compress`].
    pub fn global() -> &'static HandleRegistry {
        &GLOBAL_REGISTRY
    }

    /// Register `bytes` and hand out a new handle. Ids are never reused.
    pub fn acquire(&self, bytes: Arc<[u8]>) -> DisplayHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, bytes);
        DisplayHandle(id)
    }

    /// Shared access to the bytes behind a live handle.
    pub fn resolve(&self, handle: &DisplayHandle) -> Option<Arc<[u8]>> {
        self.lock().get(&handle.0).cloned()
    }

    pub fn is_live(&self, handle: &DisplayHandle) -> bool {
        self.lock().contains_key(&handle.0)
    }

    /// Drop the registry's reference to the handle's bytes.
    pub fn release(&self, handle: &DisplayHandle) -> ReleaseOutcome {
        match self.lock().remove(&handle.0) {
            Some(_) => ReleaseOutcome::Released,
            None => {
                log::warn!("display handle {} released twice or never issued", handle);
                ReleaseOutcome::AlreadyReleased
            }
        }
    }

    /// Number of handles acquired but not yet released.
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    // Every map update is a single call, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, Arc<[u8]>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
