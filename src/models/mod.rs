//! Data models for companies, colors and published stylesheets.
//!
//! Models are plain values; deriving, rendering and persistence live in
//! `services` and `storage`.

pub mod attachment;
pub mod color_set;
pub mod company;
pub mod rgb;

// Re-export all model types
pub use attachment::{Attachment, AttachmentKind, ResourceHandle};
pub use color_set::{ColorSet, ColorSlot, SlotRole};
pub use company::{Company, CompanyId, CompanyWrite, NewCompany, WriteOptions};
pub use rgb::{NormalizedRgb, ParseHexError, RgbColor};
