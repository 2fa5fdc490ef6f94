//! Contact form deep link
//!
//! Submitting the contact form does not send anything itself; it opens a
//! WhatsApp chat with the message pre-filled:
//!
//! ```text
//! https://wa.me/6281268088246?text=%2AName%3A%2A%20Ada%0A%2AEmail%3A%2A%20...
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

const WHATSAPP_BASE: &str = "https://wa.me/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("'{0}' is not a valid phone number")]
    InvalidNumber(String),
}

/// Contact form fields
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        let email = self.email.trim();
        let valid = match email.rsplit_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Chat text with bold field labels, one field per line
    pub fn to_text(&self) -> String {
        format!(
            "*Name:* {}\n*Email:* {}\n*Subject:* {}\n*Message:* {}",
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim()
        )
    }
}

/// Builds deep links to one WhatsApp number
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactLink {
    number: String,
}

impl ContactLink {
    /// Keeps only the digits of `number` (`+62 812-...` becomes `62812...`)
    pub fn new(number: &str) -> Result<Self, ContactError> {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(ContactError::InvalidNumber(number.to_string()));
        }
        Ok(Self { number: digits })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Validate `message` and build its deep link
    pub fn url_for(&self, message: &ContactMessage) -> Result<String, ContactError> {
        message.validate()?;
        let url = format!(
            "{}{}?text={}",
            WHATSAPP_BASE,
            self.number,
            percent_encode(&message.to_text())
        );
        tracing::debug!("ContactLink::url_for - built link for '{}'", message.subject.trim());
        Ok(url)
    }
}

/// Percent-encode everything except RFC 3986 unreserved characters
pub fn percent_encode(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[usize::from(byte >> 4)] as char);
                out.push(HEX[usize::from(byte & 0x0F)] as char);
            }
        }
    }
    out
}
