//! # Cookie Consent
//!
//! Rules for the consent flag: when it counts as accepted and when the
//! prompt has to be shown.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  visit ──► flag absent / expired / malformed ──► PromptRequired         │
//! │                                                     │                   │
//! │                                         user clicks "Принять"           │
//! │                                                     ▼                   │
//! │  visit ──► flag valid (now < expires_at) ───────► Accepted              │
//! │                                                                         │
//! │  Acceptance is the ONLY way the flag gets written. Closing the banner  │
//! │  by clicking elsewhere does not record anything.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Value stored in the flag when the visitor accepted.
pub const ACCEPTED: &str = "accepted";

/// The persisted consent flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    /// Always [`ACCEPTED`] for a record written by this crate.
    pub value: String,
    pub accepted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ConsentRecord {
    /// Records an acceptance made at `now`, valid for `validity_days`.
    ///
    /// A window reaching past what `DateTime` can represent ends at
    /// `DateTime::<Utc>::MAX_UTC`.
    pub fn accept(now: DateTime<Utc>, validity_days: i64) -> Self {
        let expires_at = Duration::try_days(validity_days)
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        ConsentRecord {
            value: ACCEPTED.to_string(),
            accepted_at: now,
            expires_at,
        }
    }

    /// Whether the record still grants consent at `now`.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.value == ACCEPTED && now < self.expires_at
    }
}

/// What the page should do about the consent banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConsentStatus {
    /// Keep the banner hidden.
    #[serde(rename_all = "camelCase")]
    Accepted { expires_at: DateTime<Utc> },

    /// Show the banner after `delay_ms`.
    #[serde(rename_all = "camelCase")]
    PromptRequired { delay_ms: u64 },
}

impl ConsentStatus {
    /// Decides the banner state from whatever was found in the flag.
    pub fn evaluate(record: Option<&ConsentRecord>, now: DateTime<Utc>, delay_ms: u64) -> Self {
        match record {
            Some(record) if record.is_valid(now) => ConsentStatus::Accepted {
                expires_at: record.expires_at,
            },
            _ => ConsentStatus::PromptRequired { delay_ms },
        }
    }

    pub fn prompt_required(&self) -> bool {
        matches!(self, ConsentStatus::PromptRequired { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
