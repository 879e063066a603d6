//! # Hotline Form
//!
//! Validation for the "Горячая линия" contact form.
//!
//! Every text field is required, and so is the privacy agreement checkbox.
//! All invalid fields are reported at once so the page can mark each of them.

use serde::{Deserialize, Serialize};

use crate::validation::is_filled;

/// Shown when the form is rejected.
pub const FORM_INVALID_MESSAGE: &str = "Пожалуйста, заполните все обязательные поля";

/// Shown when the form is accepted.
pub const FORM_SENT_MESSAGE: &str = "Сообщение отправлено! Мы свяжемся с вами в ближайшее время.";

/// A submitted hotline form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotlineForm {
    pub topic: String,
    pub name: String,
    pub contact: String,
    pub message: String,
    pub privacy_agreed: bool,
}

/// Form fields, as named by the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HotlineField {
    Topic,
    Name,
    Contact,
    Message,
    PrivacyAgreement,
}

impl HotlineForm {
    /// Returns the fields that block submission, in form order.
    pub fn invalid_fields(&self) -> Vec<HotlineField> {
        let mut invalid = Vec::new();

        for (field, value) in [
            (HotlineField::Topic, &self.topic),
            (HotlineField::Name, &self.name),
            (HotlineField::Contact, &self.contact),
            (HotlineField::Message, &self.message),
        ] {
            if !is_filled(value) {
                invalid.push(field);
            }
        }

        if !self.privacy_agreed {
            invalid.push(HotlineField::PrivacyAgreement);
        }

        invalid
    }

    /// `Ok(())` if the form can be sent, otherwise the invalid fields.
    pub fn validate(&self) -> Result<(), Vec<HotlineField>> {
        let invalid = self.invalid_fields();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(invalid)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
