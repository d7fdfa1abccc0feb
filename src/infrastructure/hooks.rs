use crate::domain::BookingDraft;
use anyhow::Result;
use log::warn;
use std::path::PathBuf;

/// Context provided to draft hooks
#[derive(Debug, Clone)]
pub struct PersistContext {
    pub session: String,
    pub session_dir: Option<PathBuf>,
    pub serialized: String,
}

/// Trait for plugins that respond to draft persistence events
pub trait DraftHook: Send + Sync {
    /// Called after the draft has been written to the session cache
    fn on_draft_persisted(&self, context: &PersistContext, draft: &BookingDraft) -> Result<()>;

    /// Called after the draft has been cleared from the session cache
    fn on_draft_cleared(&self, _context: &PersistContext) -> Result<()> {
        Ok(())
    }

    /// Human-readable name for this hook
    fn name(&self) -> &str;

    fn enabled_by_default(&self) -> bool {
        true
    }
}

/// Registry for managing draft hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn DraftHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Registry with every hook that is on by default.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let audit = crate::infrastructure::AuditLogHook;
        if audit.enabled_by_default() {
            registry.register(audit);
        }
        registry
    }

    pub fn register<H>(&mut self, hook: H)
    where
        H: DraftHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Runs every hook. A failing hook is logged and skipped.
    pub fn execute_persist_hooks(&self, context: &PersistContext, draft: &BookingDraft) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_draft_persisted(context, draft) {
                warn!("hook '{}' failed: {e:#}", hook.name());
            }
        }
    }

    pub fn execute_clear_hooks(&self, context: &PersistContext) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_draft_cleared(context) {
                warn!("hook '{}' failed: {e:#}", hook.name());
            }
        }
    }

    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
