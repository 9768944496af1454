//! Outbound message types

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::EmailError;

/// A file attached to an email, base64-encoded for the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    /// Base64 of the raw bytes
    pub content: String,
    pub content_type: String,
}

impl Attachment {
    /// Encodes raw bytes as an attachment
    pub fn from_bytes(filename: impl Into<String>, content_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            filename: filename.into(),
            content: STANDARD.encode(bytes),
            content_type: content_type.into(),
        }
    }

    /// Decodes the attachment back into bytes
    pub fn decode(&self) -> Result<Vec<u8>, EmailError> {
        STANDARD
            .decode(&self.content)
            .map_err(|e| EmailError::Invalid(format!("attachment {}: {}", self.filename, e)))
    }
}

/// An email ready to be sent
///
/// Only the sender's display name is set here; the adapter supplies the
/// address it is authorized to send from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutboundEmail {
    pub sender_name: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl OutboundEmail {
    pub fn new(
        sender_name: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            to: vec![to.into()],
            subject: subject.into(),
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// `Name <address>` header value for the given sender address
    pub fn from_header(&self, address: &str) -> String {
        if self.sender_name.is_empty() {
            address.to_string()
        } else {
            format!("{} <{}>", self.sender_name, address)
        }
    }
}

/// Provider acknowledgement of an accepted email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub id: String,
}
