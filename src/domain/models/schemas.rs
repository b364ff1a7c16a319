//! Conventional shapes of the known content documents.
//!
//! The repository itself never enforces these; they are the defaults that
//! callers pass in when a document has to be seeded.

use serde::{Deserialize, Serialize};

use super::{ContentKey, Fields, ABOUT_COLLECTION, CONTACT_COLLECTION};

pub const DEFAULT_CONTACT_EMAIL: &str = "contact@example.com";

/// Default content of the `contact` document.
///
/// The mail-relay identifiers are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDefaults {
    pub title: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub recipient_email: String,
}

impl Default for ContactDefaults {
    fn default() -> Self {
        Self {
            title: "Get in Touch".to_string(),
            description: "For assignments, licensing and print enquiries, send a message \
                          and I will get back to you as soon as possible."
                .to_string(),
            email: DEFAULT_CONTACT_EMAIL.to_string(),
            phone: String::new(),
            location: String::new(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            recipient_email: DEFAULT_CONTACT_EMAIL.to_string(),
        }
    }
}

impl ContactDefaults {
    pub fn into_fields(self) -> Fields {
        Fields::new()
            .with("title", self.title)
            .with("description", self.description)
            .with("email", self.email)
            .with("phone", self.phone)
            .with("location", self.location)
            .with("serviceId", self.service_id)
            .with("templateId", self.template_id)
            .with("publicKey", self.public_key)
            .with("recipientEmail", self.recipient_email)
    }
}

/// Default content of the `about` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutDefaults {
    pub title: String,
    pub subtitle: String,
    pub biography: String,
    pub portrait_url: String,
}

impl Default for AboutDefaults {
    fn default() -> Self {
        Self {
            title: "About".to_string(),
            subtitle: "Photojournalist".to_string(),
            biography: String::new(),
            portrait_url: String::new(),
        }
    }
}

impl AboutDefaults {
    pub fn into_fields(self) -> Fields {
        Fields::new()
            .with("title", self.title)
            .with("subtitle", self.subtitle)
            .with("biography", self.biography)
            .with("portraitUrl", self.portrait_url)
    }
}

/// Conventional defaults for a key, if it has a known shape.
pub fn defaults_for(key: &ContentKey, contact: &ContactDefaults) -> Option<Fields> {
    match key.collection() {
        CONTACT_COLLECTION => Some(contact.clone().into_fields()),
        ABOUT_COLLECTION => Some(AboutDefaults::default().into_fields()),
        _ => None,
    }
}
