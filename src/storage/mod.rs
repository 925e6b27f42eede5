//! Persistence collaborators for companies and published stylesheets.
//!
//! The service layer only talks to the traits defined here. Two backends are
//! provided: [`MemoryStore`] for embedding and tests, and [`FsStore`] which
//! keeps everything in one JSON document on disk.

pub mod b64;
pub mod cache;
pub mod fs;
pub mod memory;

pub use cache::{NoopCache, RecordingCache, RenderCache};
pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::error::StorageError;
use crate::models::{Attachment, Company, CompanyId};

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StorageError>;

/// Company records.
pub trait CompanyStore {
    /// Reserves the next unused company id.
    fn next_company_id(&mut self) -> StoreResult<CompanyId>;

    /// Loads a company.
    fn company(&self, id: CompanyId) -> StoreResult<Option<Company>>;

    /// Inserts or replaces a company.
    fn save_company(&mut self, company: &Company) -> StoreResult<()>;

    /// Deletes a company, returning it if it existed.
    fn remove_company(&mut self, id: CompanyId) -> StoreResult<Option<Company>>;

    /// All companies ordered by id.
    fn companies(&self) -> StoreResult<Vec<Company>>;
}

/// Binary attachments keyed by `(url, company_id)`.
pub trait AttachmentStore {
    /// Finds the attachment a company owns at `url`.
    fn find_attachment(&self, url: &str, company_id: CompanyId)
        -> StoreResult<Option<Attachment>>;

    /// Adds a new attachment.
    fn create_attachment(&mut self, attachment: Attachment) -> StoreResult<()>;

    /// Overwrites an existing attachment with the same id.
    fn update_attachment(&mut self, attachment: &Attachment) -> StoreResult<()>;

    /// Deletes every attachment the company owns at `url`; returns how many.
    fn delete_attachments(&mut self, url: &str, company_id: CompanyId) -> StoreResult<usize>;

    /// All attachments.
    fn attachments(&self) -> StoreResult<Vec<Attachment>>;
}
