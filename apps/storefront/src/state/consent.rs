//! # Consent State
//!
//! Decides whether the cookie prompt is shown and records acceptance.
//!
//! ```text
//! visit ──► load flag ──► valid and unexpired? ── yes ──► Accepted (no prompt)
//!                                             └── no ───► PromptRequired after 1.5 s
//! "Accept" ──► new record, expires in 90 days
//! ```

use blin_core::consent::{ConsentRecord, ConsentStatus};
use blin_storage::ConsentRepository;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::state::ConfigState;

#[derive(Debug, Clone)]
pub struct ConsentState {
    repo: ConsentRepository,
    validity_days: i64,
    prompt_delay_ms: u64,
}

impl ConsentState {
    pub fn new(repo: ConsentRepository, config: &ConfigState) -> Self {
        ConsentState {
            repo,
            validity_days: config.consent_validity_days,
            prompt_delay_ms: config.consent_prompt_delay_ms,
        }
    }

    /// Whether the prompt should be shown at `now`.
    pub fn status(&self, now: DateTime<Utc>) -> ConsentStatus {
        let record = self.repo.load();
        let status = ConsentStatus::evaluate(record.as_ref(), now, self.prompt_delay_ms);
        debug!(?status, "Consent evaluated");
        status
    }

    /// Records acceptance. Only an explicit accept writes the flag.
    pub fn accept(&self, now: DateTime<Utc>) -> AppResult<ConsentRecord> {
        let record = ConsentRecord::accept(now, self.validity_days);
        self.repo.save(&record)?;
        info!(expires_at = %record.expires_at, "Cookie consent accepted");
        Ok(record)
    }

    /// Forgets acceptance so the next visit prompts again.
    pub fn reset(&self) -> AppResult<()> {
        self.repo.reset()?;
        info!("Cookie consent reset");
        Ok(())
    }
}
