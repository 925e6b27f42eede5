//! File-backed store.
//!
//! The whole store is one JSON document (`store.json`) inside a directory.
//! Every mutation rewrites it with the temp file + rename pattern so the file
//! is never left half-written. Binary fields are base64 text in the document.
//! A mutation whose rewrite fails is undone in memory as well, so a later
//! successful write cannot persist it.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{AttachmentStore, CompanyStore, MemoryStore, StoreResult};
use crate::error::StorageError;
use crate::models::{Attachment, Company, CompanyId};

const STORE_FILE: &str = "store.json";

/// Store persisted as a JSON document in a directory.
#[derive(Debug)]
pub struct FsStore {
    path: PathBuf,
    state: MemoryStore,
}

impl FsStore {
    /// Opens the store in `dir`, creating the directory if needed.
    ///
    /// A missing document means an empty store.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        let path = dir.join(STORE_FILE);

        let state = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
            serde_json::from_str(&content)?
        } else {
            MemoryStore::new()
        };

        debug!(path = %path.display(), "Opened store");
        Ok(Self { path, state })
    }

    /// Location of the JSON document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&self.state)?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).map_err(|e| StorageError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }

    /// Applies `change` to the in-memory state and persists it.
    ///
    /// `change` returns the result plus whether anything changed. When the
    /// document cannot be written, the state goes back to what it was.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> StoreResult<(T, bool)>,
    ) -> StoreResult<T> {
        let snapshot = self.state.clone();
        let (result, changed) = match change(&mut self.state) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.state = snapshot;
                return Err(err);
            }
        };

        if changed {
            if let Err(err) = self.flush() {
                warn!(path = %self.path.display(), error = %err, "Store write failed, change discarded");
                self.state = snapshot;
                return Err(err);
            }
        }
        Ok(result)
    }
}

impl CompanyStore for FsStore {
    fn next_company_id(&mut self) -> StoreResult<CompanyId> {
        self.commit(|state| Ok((state.next_company_id()?, true)))
    }

    fn company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        self.state.company(id)
    }

    fn save_company(&mut self, company: &Company) -> StoreResult<()> {
        self.commit(|state| Ok((state.save_company(company)?, true)))
    }

    fn remove_company(&mut self, id: CompanyId) -> StoreResult<Option<Company>> {
        self.commit(|state| {
            let removed = state.remove_company(id)?;
            let changed = removed.is_some();
            Ok((removed, changed))
        })
    }

    fn companies(&self) -> StoreResult<Vec<Company>> {
        self.state.companies()
    }
}

impl AttachmentStore for FsStore {
    fn find_attachment(
        &self,
        url: &str,
        company_id: CompanyId,
    ) -> StoreResult<Option<Attachment>> {
        self.state.find_attachment(url, company_id)
    }

    fn create_attachment(&mut self, attachment: Attachment) -> StoreResult<()> {
        self.commit(|state| Ok((state.create_attachment(attachment)?, true)))
    }

    fn update_attachment(&mut self, attachment: &Attachment) -> StoreResult<()> {
        self.commit(|state| Ok((state.update_attachment(attachment)?, true)))
    }

    fn delete_attachments(&mut self, url: &str, company_id: CompanyId) -> StoreResult<usize> {
        self.commit(|state| {
            let removed = state.delete_attachments(url, company_id)?;
            Ok((removed, removed > 0))
        })
    }

    fn attachments(&self) -> StoreResult<Vec<Attachment>> {
        self.state.attachments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorSlot;
    use tempfile::TempDir;

    #[test]
    fn test_open_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::open(&temp_dir.path().join("nested")).unwrap();
        assert!(store.companies().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let attachment_id;
        {
            let mut store = FsStore::open(temp_dir.path()).unwrap();
            let id = store.next_company_id().unwrap();
            let mut company = Company::new(id, "Acme");
            company.logo = Some(vec![0, 159, 146, 150]);
            company.colors.set(ColorSlot::NavbarBackground, "#102030");
            store.save_company(&company).unwrap();

            let attachment = Attachment::scss(id, "/u.scss", "a { color: red; }");
            attachment_id = attachment.id;
            store.create_attachment(attachment).unwrap();
        }

        let store = FsStore::open(temp_dir.path()).unwrap();
        let company = store.company(CompanyId(1)).unwrap().unwrap();
        assert_eq!(company.name, "Acme");
        assert_eq!(company.logo, Some(vec![0, 159, 146, 150]));
        assert_eq!(company.colors.get(ColorSlot::NavbarBackground), Some("#102030"));

        let attachment = store.find_attachment("/u.scss", CompanyId(1)).unwrap().unwrap();
        assert_eq!(attachment.id, attachment_id);
        assert_eq!(attachment.text(), "a { color: red; }");
        assert!(!temp_dir.path().join("store.json.tmp").exists());
    }

    #[test]
    fn test_content_is_base64_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsStore::open(temp_dir.path()).unwrap();
        store
            .create_attachment(Attachment::scss(CompanyId(1), "/u", "abc"))
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"YWJj\""));
    }

    #[test]
    fn test_corrupt_document_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("store.json"), "{ not json").unwrap();
        let err = FsStore::open(temp_dir.path()).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    /// Makes the next document rewrite fail by occupying the temp file path.
    fn block_writes(store: &FsStore) -> PathBuf {
        let blocker = store.path().with_extension("json.tmp");
        fs::create_dir(&blocker).unwrap();
        blocker
    }

    #[test]
    fn test_failed_write_is_not_persisted_by_later_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsStore::open(temp_dir.path()).unwrap();
        let id = store.next_company_id().unwrap();
        let previous = Company::new(id, "Acme");
        store.save_company(&previous).unwrap();

        let mut attachment = Attachment::scss(id, "/u.scss", "OLD");
        store.create_attachment(attachment.clone()).unwrap();

        let mut updated = previous.clone();
        updated.colors.set(ColorSlot::NavbarBackground, "#102030");
        store.save_company(&updated).unwrap();

        let blocker = block_writes(&store);
        attachment.replace_content("/u.scss", "NEW");
        let err = store.update_attachment(&attachment).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        let current = store.find_attachment("/u.scss", id).unwrap().unwrap();
        assert_eq!(current.text(), "OLD");

        fs::remove_dir(&blocker).unwrap();
        store.save_company(&previous).unwrap();

        let reopened = FsStore::open(temp_dir.path()).unwrap();
        let company = reopened.company(id).unwrap().unwrap();
        assert!(company.colors.is_empty());
        let stored = reopened.find_attachment("/u.scss", id).unwrap().unwrap();
        assert_eq!(stored.text(), "OLD");
    }

    #[test]
    fn test_failed_create_leaves_no_orphan_attachment() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsStore::open(temp_dir.path()).unwrap();
        let id = store.next_company_id().unwrap();
        store.save_company(&Company::new(id, "Acme")).unwrap();

        let blocker = block_writes(&store);
        assert!(store
            .create_attachment(Attachment::scss(id, "/u.scss", "a {}"))
            .is_err());
        assert!(store.attachments().unwrap().is_empty());

        fs::remove_dir(&blocker).unwrap();
        assert!(store.remove_company(id).unwrap().is_some());

        let reopened = FsStore::open(temp_dir.path()).unwrap();
        assert!(reopened.companies().unwrap().is_empty());
        assert!(reopened.attachments().unwrap().is_empty());
    }

    #[test]
    fn test_failed_id_allocation_is_undone() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.next_company_id().unwrap(), CompanyId(1));

        let blocker = block_writes(&store);
        assert!(store.next_company_id().is_err());
        fs::remove_dir(&blocker).unwrap();

        assert_eq!(store.next_company_id().unwrap(), CompanyId(2));
    }
}
