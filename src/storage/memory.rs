//! In-process store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AttachmentStore, CompanyStore, StoreResult};
use crate::error::StorageError;
use crate::models::{Attachment, Company, CompanyId};

/// Companies and attachments held in memory.
///
/// Also the on-disk document format of [`super::FsStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    last_company_id: u64,
    #[serde(default)]
    companies: BTreeMap<CompanyId, Company>,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompanyStore for MemoryStore {
    fn next_company_id(&mut self) -> StoreResult<CompanyId> {
        let highest = self.companies.keys().map(|id| id.0).max().unwrap_or(0);
        self.last_company_id = self.last_company_id.max(highest) + 1;
        Ok(CompanyId(self.last_company_id))
    }

    fn company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        Ok(self.companies.get(&id).cloned())
    }

    fn save_company(&mut self, company: &Company) -> StoreResult<()> {
        self.last_company_id = self.last_company_id.max(company.id.0);
        self.companies.insert(company.id, company.clone());
        Ok(())
    }

    fn remove_company(&mut self, id: CompanyId) -> StoreResult<Option<Company>> {
        Ok(self.companies.remove(&id))
    }

    fn companies(&self) -> StoreResult<Vec<Company>> {
        Ok(self.companies.values().cloned().collect())
    }
}

impl AttachmentStore for MemoryStore {
    fn find_attachment(
        &self,
        url: &str,
        company_id: CompanyId,
    ) -> StoreResult<Option<Attachment>> {
        Ok(self
            .attachments
            .iter()
            .find(|a| a.url == url && a.company_id == company_id)
            .cloned())
    }

    fn create_attachment(&mut self, attachment: Attachment) -> StoreResult<()> {
        self.attachments.push(attachment);
        Ok(())
    }

    fn update_attachment(&mut self, attachment: &Attachment) -> StoreResult<()> {
        let slot = self
            .attachments
            .iter_mut()
            .find(|a| a.id == attachment.id)
            .ok_or_else(|| StorageError::Missing {
                kind: "attachment",
                id: attachment.id.to_string(),
            })?;
        *slot = attachment.clone();
        Ok(())
    }

    fn delete_attachments(&mut self, url: &str, company_id: CompanyId) -> StoreResult<usize> {
        let before = self.attachments.len();
        self.attachments
            .retain(|a| !(a.url == url && a.company_id == company_id));
        Ok(before - self.attachments.len())
    }

    fn attachments(&self) -> StoreResult<Vec<Attachment>> {
        Ok(self.attachments.clone())
    }
}
