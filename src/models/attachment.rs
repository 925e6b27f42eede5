//! Published stylesheet records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::CompanyId;
use crate::constants::SCSS_MIMETYPE;

/// Storage kind of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Content stored as bytes
    #[default]
    Binary,
    /// Content lives behind the URL only
    Url,
}

/// A blob keyed by `(company_id, url)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Stable identity, kept across content updates
    pub id: Uuid,
    /// Owning company
    pub company_id: CompanyId,
    /// Display name (the URL for generated stylesheets)
    pub name: String,
    /// URL the attachment is served under
    pub url: String,
    /// Content type
    pub mimetype: String,
    /// Storage kind
    pub kind: AttachmentKind,
    /// Raw content
    #[serde(with = "crate::storage::b64")]
    pub content: Vec<u8>,
    /// Hex SHA-256 of `content`
    pub checksum: String,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Last content update
    pub updated: DateTime<Utc>,
}

impl Attachment {
    /// Creates a binary `text/scss` attachment holding `content`.
    #[must_use]
    pub fn scss(company_id: CompanyId, url: impl Into<String>, content: &str) -> Self {
        let url = url.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id,
            name: url.clone(),
            url,
            mimetype: SCSS_MIMETYPE.to_string(),
            kind: AttachmentKind::Binary,
            content: content.as_bytes().to_vec(),
            checksum: checksum(content.as_bytes()),
            created: now,
            updated: now,
        }
    }

    /// Replaces the content in place, keeping the identity.
    pub fn replace_content(&mut self, url: &str, content: &str) {
        self.url = url.to_string();
        self.name = url.to_string();
        self.content = content.as_bytes().to_vec();
        self.checksum = checksum(&self.content);
        self.updated = Utc::now();
    }

    /// Content decoded as UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Hex SHA-256 digest of `data`.
#[must_use]
pub fn checksum(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Identity and location of a published stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceHandle {
    /// Attachment identity
    pub id: Uuid,
    /// Owning company
    pub company_id: CompanyId,
    /// Deterministic URL
    pub url: String,
    /// Hex SHA-256 of the published content
    pub checksum: String,
    /// True when this publish created the attachment
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scss_attachment_defaults() {
        let attachment = Attachment::scss(CompanyId(3), "/base/custom_colors.3.gen.scss", "a {}");
        assert_eq!(attachment.mimetype, "text/scss");
        assert_eq!(attachment.kind, AttachmentKind::Binary);
        assert_eq!(attachment.name, attachment.url);
        assert_eq!(attachment.text(), "a {}");
        assert_eq!(attachment.checksum.len(), 64);
    }

    #[test]
    fn test_replace_content_keeps_identity() {
        let mut attachment = Attachment::scss(CompanyId(3), "/u", "old");
        let id = attachment.id;
        let old_checksum = attachment.checksum.clone();

        attachment.replace_content("/u", "new");
        assert_eq!(attachment.id, id);
        assert_eq!(attachment.text(), "new");
        assert_ne!(attachment.checksum, old_checksum);
        assert!(attachment.updated >= attachment.created);
    }

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(
            checksum(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
