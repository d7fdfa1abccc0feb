/// Test utilities for session-backed tests
///
/// Each `TestSession` owns a fresh temporary directory holding one
/// file-backed session cache. The directory goes away when the harness is
/// dropped, so tests never see each other's drafts.
///
/// ```rust,ignore
/// let session = TestSession::new();
/// let store = session.open_store().unwrap();
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::application::BookingStore;
    use crate::infrastructure::{FileSessionCache, HookRegistry, STORAGE_KEY, SessionCache};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    pub struct TestSession {
        cache: Arc<FileSessionCache>,
        _temp_dir: TempDir,
    }

    impl TestSession {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let cache = Arc::new(FileSessionCache::new(temp_dir.path().join("session")));

            Self {
                cache,
                _temp_dir: temp_dir,
            }
        }

        pub fn cache(&self) -> Arc<FileSessionCache> {
            self.cache.clone()
        }

        pub fn dir(&self) -> PathBuf {
            self._temp_dir.path().join("session")
        }

        /// Opens a store over this session with the default hooks.
        pub fn open_store(&self) -> Result<BookingStore> {
            BookingStore::open("test", self.cache.clone(), HookRegistry::with_defaults())
        }

        /// Raw JSON currently cached for the draft.
        pub fn cached_draft(&self) -> Option<String> {
            self.cache.get(STORAGE_KEY).expect("Failed to read session cache")
        }

        pub fn write_raw(&self, json: &str) {
            self.cache
                .set(STORAGE_KEY, json)
                .expect("Failed to write session cache");
        }
    }

    /// Calendar day shorthand for tests.
    pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    pub fn with_test_session<F, R>(test_fn: F) -> R
    where
        F: FnOnce(&TestSession) -> R,
    {
        let session = TestSession::new();
        test_fn(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;

    #[test]
    fn fresh_session_has_no_draft() {
        with_test_session(|session| {
            assert!(session.cached_draft().is_none());
            let store = session.open_store().unwrap();
            assert!(store.draft().is_pristine());
        });
    }

    #[test]
    fn sessions_are_isolated() {
        let first = TestSession::new();
        let second = TestSession::new();

        first.write_raw("{}");
        assert!(first.cached_draft().is_some());
        assert!(second.cached_draft().is_none());
    }
}
