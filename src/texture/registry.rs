//! Reference-counted texture handles shared between terrain patches.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use bevy::prelude::*;

type EntryMap = HashMap<String, Arc<TextureEntry>>;

struct TextureEntry {
    name: String,
    refs: AtomicU32,
    registry: Weak<Mutex<EntryMap>>,
}

/// Process-wide cache of texture handles keyed by lowercase name.
///
/// Every live [`TextureRef`] counts as one reference. The entry is dropped
/// from the registry when the last reference is released, so the registry
/// never owns texture memory on its own.
///
/// # Example
///
/// ```
/// use bevy_terrain_layers::texture::TextureRegistry;
///
/// let registry = TextureRegistry::new();
/// let grass = registry.acquire("Tileset/Grass.blp");
/// assert_eq!(registry.ref_count("tileset/grass.blp"), 1);
///
/// drop(grass);
/// assert!(!registry.contains("tileset/grass.blp"));
/// ```
#[derive(Resource, Clone, Default)]
pub struct TextureRegistry {
    entries: Arc<Mutex<EntryMap>>,
}

impl TextureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a handle for `name`, creating the entry on first use.
    pub fn acquire(&self, name: &str) -> TextureRef {
        let key = name.to_lowercase();
        let mut entries = lock(&self.entries);
        let entry = entries.entry(key.clone()).or_insert_with(|| {
            Arc::new(TextureEntry {
                name: key,
                refs: AtomicU32::new(0),
                registry: Arc::downgrade(&self.entries),
            })
        });
        entry.refs.fetch_add(1, Ordering::AcqRel);
        TextureRef {
            entry: Arc::clone(entry),
        }
    }

    /// Number of live references to `name`, or 0 if it is not loaded.
    pub fn ref_count(&self, name: &str) -> u32 {
        lock(&self.entries)
            .get(&name.to_lowercase())
            .map(|entry| entry.refs.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    /// Whether `name` currently has at least one live reference.
    pub fn contains(&self, name: &str) -> bool {
        lock(&self.entries).contains_key(&name.to_lowercase())
    }

    /// Names of every texture still held by someone, sorted.
    pub fn loaded_names(&self) -> Vec<String> {
        let mut names: Vec<String> = lock(&self.entries).keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for TextureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureRegistry")
            .field("loaded", &self.loaded_names())
            .finish()
    }
}

fn lock(entries: &Mutex<EntryMap>) -> MutexGuard<'_, EntryMap> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle to a registry texture.
///
/// Cloning acquires another reference and dropping releases one. Two handles
/// compare equal when they point at the same registry entry.
pub struct TextureRef {
    entry: Arc<TextureEntry>,
}

impl TextureRef {
    /// Lowercase texture name this handle was acquired with.
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Current reference count of the underlying texture.
    pub fn ref_count(&self) -> u32 {
        self.entry.refs.load(Ordering::Acquire)
    }
}

impl Clone for TextureRef {
    fn clone(&self) -> Self {
        // Count changes happen under the registry lock so a concurrent
        // release cannot evict an entry that is being re-acquired.
        match self.entry.registry.upgrade() {
            Some(entries) => {
                let _guard = lock(&entries);
                self.entry.refs.fetch_add(1, Ordering::AcqRel);
            }
            None => {
                self.entry.refs.fetch_add(1, Ordering::AcqRel);
            }
        }
        Self {
            entry: Arc::clone(&self.entry),
        }
    }
}

impl Drop for TextureRef {
    fn drop(&mut self) {
        let Some(entries) = self.entry.registry.upgrade() else {
            self.entry.refs.fetch_sub(1, Ordering::AcqRel);
            return;
        };
        let mut entries = lock(&entries);
        if self.entry.refs.fetch_sub(1, Ordering::AcqRel) == 1 {
            entries.remove(&self.entry.name);
        }
    }
}

impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl Eq for TextureRef {}

impl Hash for TextureRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.entry).hash(state);
    }
}

impl fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextureRef").field(&self.entry.name).finish()
    }
}
