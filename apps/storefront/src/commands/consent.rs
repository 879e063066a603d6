//! # Consent Commands
//!
//! The cookie banner asks for its state on page load and reports "Принять".

use blin_core::consent::ConsentStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::ConsentState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentResponse {
    pub status: ConsentStatus,
}

pub fn consent_status(consent: &ConsentState, now: DateTime<Utc>) -> ConsentResponse {
    debug!("consent_status command");
    ConsentResponse {
        status: consent.status(now),
    }
}

pub fn accept_consent(
    consent: &ConsentState,
    now: DateTime<Utc>,
) -> Result<ConsentResponse, ApiError> {
    debug!("accept_consent command");
    consent.accept(now)?;
    Ok(consent_status(consent, now))
}

/// Clears the flag. Mostly useful while testing the banner.
pub fn reset_consent(
    consent: &ConsentState,
    now: DateTime<Utc>,
) -> Result<ConsentResponse, ApiError> {
    debug!("reset_consent command");
    consent.reset()?;
    Ok(consent_status(consent, now))
}
