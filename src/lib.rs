//! Company Colors Library
//!
//! Derives a company's UI palette from its logo and publishes the matching
//! SCSS stylesheet under a stable, per-company URL.
//!
//! ## Example
//!
//! ```rust,no_run
//! use company_colors::config::Config;
//! use company_colors::models::{CompanyWrite, NewCompany, WriteOptions};
//! use company_colors::services::CompanyService;
//! use company_colors::storage::{MemoryStore, NoopCache};
//!
//! let mut service = CompanyService::from_config(&Config::new(), MemoryStore::new(), NoopCache);
//! let company = service.create(NewCompany::named("Acme"))?;
//! let logo = std::fs::read("logo.png").unwrap_or_default();
//! service.write(company.id, CompanyWrite::new().logo(logo), WriteOptions::default())?;
//! println!("{}", service.render(company.id)?);
//! # Ok::<(), company_colors::Error>(())
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logo;
pub mod models;
pub mod scss;
pub mod services;
pub mod storage;

pub use error::{Error, Result, StorageError};
