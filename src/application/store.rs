use crate::domain::{BookingDraft, GuestInfo};
use crate::infrastructure::{HookRegistry, PersistContext, STORAGE_KEY, SessionCache};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;

/// The session's one booking draft, kept in step with the session cache.
///
/// Every change is written to the cache before it is taken into memory, so
/// the draft in hand and a reopened session never disagree.
pub struct BookingStore {
    session: String,
    cache: Arc<dyn SessionCache>,
    hooks: HookRegistry,
    draft: BookingDraft,
}

impl BookingStore {
    pub fn open(
        session: impl Into<String>,
        cache: Arc<dyn SessionCache>,
        hooks: HookRegistry,
    ) -> Result<Self> {
        let session = session.into();
        let draft = Self::hydrate(cache.as_ref(), &session)?;

        Ok(Self {
            session,
            cache,
            hooks,
            draft,
        })
    }

    fn hydrate(cache: &dyn SessionCache, session: &str) -> Result<BookingDraft> {
        let Some(raw) = cache.get(STORAGE_KEY)? else {
            debug!("no cached draft for session {session}");
            return Ok(BookingDraft::default());
        };

        match serde_json::from_str(&raw) {
            Ok(draft) => {
                debug!("restored draft for session {session}");
                Ok(draft)
            }
            Err(e) => {
                warn!("discarding unreadable draft for session {session}: {e}");
                Ok(BookingDraft::default())
            }
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Applies `change` to a copy of the draft, persists the copy and only
    /// then keeps it.
    pub fn update<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BookingDraft),
    {
        let mut next = self.draft.clone();
        change(&mut next);
        self.write(&next)?;
        self.draft = next;
        Ok(())
    }

    pub fn set_form_data(&mut self, form: GuestInfo) -> Result<()> {
        self.update(|draft| draft.form_data = form)
    }

    pub fn set_guest_info(&mut self, guest: Option<GuestInfo>) -> Result<()> {
        self.update(|draft| draft.guest_info = guest)
    }

    fn write(&self, draft: &BookingDraft) -> Result<()> {
        let serialized =
            serde_json::to_string(draft).context("failed to serialize booking draft")?;
        self.cache
            .set(STORAGE_KEY, &serialized)
            .with_context(|| format!("failed to persist draft for session {}", self.session))?;
        debug!(
            "persisted draft for session {} ({} selected days)",
            self.session,
            draft.selected_dates.len()
        );

        let context = self.hook_context(serialized);
        self.hooks.execute_persist_hooks(&context, draft);
        Ok(())
    }

    /// Back to an empty draft, with the cache entry gone. If the entry
    /// cannot be removed the draft is left untouched.
    pub fn reset_booking(&mut self) -> Result<()> {
        self.cache
            .remove(STORAGE_KEY)
            .with_context(|| format!("failed to clear draft for session {}", self.session))?;
        self.draft = BookingDraft::default();
        debug!("cleared draft for session {}", self.session);

        let context = self.hook_context(String::new());
        self.hooks.execute_clear_hooks(&context);
        Ok(())
    }

    fn hook_context(&self, serialized: String) -> PersistContext {
        PersistContext {
            session: self.session.clone(),
            session_dir: self.cache.location().map(Path::to_path_buf),
            serialized,
        }
    }
}
