use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the booking draft is stored under.
pub const STORAGE_KEY: &str = "villa-sekipan-booking";

/// Per-session key/value store holding serialized drafts. Lives as long as
/// the browsing session it belongs to; nothing here is shared across
/// sessions.
pub trait SessionCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Directory side files (audit logs and the like) may be written to.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// One JSON file per key inside a session directory.
pub struct FileSessionCache {
    dir: PathBuf,
}

impl FileSessionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionCache for FileSessionCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let value = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}

/// Process-local cache, gone when the value is dropped.
#[derive(Default)]
pub struct MemorySessionCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("session cache lock poisoned"))
    }
}

impl SessionCache for MemorySessionCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_cache_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = FileSessionCache::new(dir.path().join("session"));

        assert_eq!(cache.get(STORAGE_KEY).unwrap(), None);

        cache.set(STORAGE_KEY, r#"{"promoCode":"TRAVEL10"}"#).unwrap();
        assert_eq!(
            cache.get(STORAGE_KEY).unwrap().as_deref(),
            Some(r#"{"promoCode":"TRAVEL10"}"#)
        );
        assert!(dir.path().join("session/villa-sekipan-booking.json").exists());

        cache.remove(STORAGE_KEY).unwrap();
        assert_eq!(cache.get(STORAGE_KEY).unwrap(), None);
        // removing twice is fine
        cache.remove(STORAGE_KEY).unwrap();
    }

    #[test]
    fn sessions_do_not_share_entries() {
        let dir = TempDir::new().unwrap();
        let first = FileSessionCache::new(dir.path().join("a"));
        let second = FileSessionCache::new(dir.path().join("b"));

        first.set(STORAGE_KEY, "{}").unwrap();
        assert_eq!(second.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn memory_cache_overwrites() {
        let cache = MemorySessionCache::new();
        cache.set("k", "one").unwrap();
        cache.set("k", "two").unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("two"));
        assert!(cache.location().is_none());

        cache.remove("k").unwrap();
        assert_eq!(cache.get("k").unwrap(), None);
    }
}
