//! Shared test fixtures for end-to-end tests.
#![allow(dead_code)] // Each test binary uses a different subset

use company_colors::models::{Attachment, Company, CompanyId};
use company_colors::storage::{AttachmentStore, CompanyStore, MemoryStore, StoreResult};
use company_colors::StorageError;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encodes an RGBA image as PNG bytes.
pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("PNG encoding should succeed");
    buf.into_inner()
}

/// A 16x16 single-color opaque logo.
pub fn solid_logo(r: u8, g: u8, b: u8) -> Vec<u8> {
    png_bytes(&RgbaImage::from_pixel(16, 16, Rgba([r, g, b, 255])))
}

/// The 0.8 gray logo: accent `#cccccc`, hover `#b3b3b3`, contrast `#000`.
pub fn gray_logo() -> Vec<u8> {
    solid_logo(204, 204, 204)
}

/// A dark navy logo whose contrast color is white.
pub fn navy_logo() -> Vec<u8> {
    solid_logo(0, 0, 128)
}

/// A logo made only of transparent and white pixels.
pub fn blank_logo() -> Vec<u8> {
    let img = RgbaImage::from_fn(16, 16, |x, _| {
        if x < 8 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([10, 20, 30, 0])
        }
    });
    png_bytes(&img)
}

/// Writes a logo into `dir` and returns its path.
pub fn write_logo(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write logo fixture");
    path
}

/// Memory store whose attachment writes can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_attachment_writes: bool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail_attachment_writes {
            return Err(StorageError::io(
                "attachments",
                std::io::Error::other("attachment store unavailable"),
            ));
        }
        Ok(())
    }
}

impl CompanyStore for FlakyStore {
    fn next_company_id(&mut self) -> StoreResult<CompanyId> {
        self.inner.next_company_id()
    }

    fn company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        self.inner.company(id)
    }

    fn save_company(&mut self, company: &Company) -> StoreResult<()> {
        self.inner.save_company(company)
    }

    fn remove_company(&mut self, id: CompanyId) -> StoreResult<Option<Company>> {
        self.inner.remove_company(id)
    }

    fn companies(&self) -> StoreResult<Vec<Company>> {
        self.inner.companies()
    }
}

impl AttachmentStore for FlakyStore {
    fn find_attachment(
        &self,
        url: &str,
        company_id: CompanyId,
    ) -> StoreResult<Option<Attachment>> {
        self.inner.find_attachment(url, company_id)
    }

    fn create_attachment(&mut self, attachment: Attachment) -> StoreResult<()> {
        self.check()?;
        self.inner.create_attachment(attachment)
    }

    fn update_attachment(&mut self, attachment: &Attachment) -> StoreResult<()> {
        self.check()?;
        self.inner.update_attachment(attachment)
    }

    fn delete_attachments(&mut self, url: &str, company_id: CompanyId) -> StoreResult<usize> {
        self.inner.delete_attachments(url, company_id)
    }

    fn attachments(&self) -> StoreResult<Vec<Attachment>> {
        self.inner.attachments()
    }
}
