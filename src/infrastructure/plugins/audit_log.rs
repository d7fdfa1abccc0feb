use crate::domain::BookingDraft;
use crate::infrastructure::{DraftHook, PersistContext};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

const LOG_FILE: &str = "draft_log.txt";

/// Appends one line per saved draft to `draft_log.txt` in the session
/// directory. The log lives as long as the draft: clearing the draft
/// deletes it. Sessions without a directory are skipped.
pub struct AuditLogHook;

impl AuditLogHook {
    fn append(dir: &Path, line: &str) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))?;

        writeln!(
            file,
            "[{}] {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            line
        )?;
        Ok(())
    }
}

impl DraftHook for AuditLogHook {
    fn on_draft_persisted(&self, context: &PersistContext, draft: &BookingDraft) -> Result<()> {
        let Some(dir) = &context.session_dir else {
            return Ok(());
        };

        let stay = match draft.date_range.endpoints() {
            Some((check_in, check_out)) => format!("{check_in}..{check_out}"),
            None => "-".to_string(),
        };
        let promo = draft
            .applied_promo
            .as_ref()
            .map(|p| p.code.as_str())
            .unwrap_or("-");

        Self::append(
            dir,
            &format!(
                "Draft saved for session {} - Stay: {} - Selected: {} - Promo: {} - Total: {} - Size: {} bytes",
                context.session,
                stay,
                draft.selected_dates.len(),
                promo,
                draft.pricing.final_price,
                context.serialized.len()
            ),
        )
    }

    fn on_draft_cleared(&self, context: &PersistContext) -> Result<()> {
        let Some(dir) = &context.session_dir else {
            return Ok(());
        };

        let path = dir.join(LOG_FILE);
        match std::fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                Err(e).with_context(|| format!("failed to remove {}", path.display()))
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "Audit Log"
    }
}
