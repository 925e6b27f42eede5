//! Company lifecycle: creation, color-aware writes and removal.
//!
//! This service keeps a company's colors and its published stylesheet in
//! step. Within one call colors are recomputed first, the record is stored
//! next, and the stylesheet is republished last; if publishing fails the
//! record is put back the way it was.

use std::collections::BTreeMap;
use tracing::{info, warn};

use super::{ColorDeriver, StylesheetPublisher};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    color_set, Attachment, Company, CompanyId, CompanyWrite, NewCompany, ResourceHandle,
    WriteOptions,
};
use crate::storage::{AttachmentStore, CompanyStore, NoopCache, RenderCache};

/// Service coordinating companies, their colors and their stylesheets.
#[derive(Debug)]
pub struct CompanyService<S, C = NoopCache> {
    store: S,
    cache: C,
    deriver: ColorDeriver,
    publisher: StylesheetPublisher,
}

impl<S, C> CompanyService<S, C>
where
    S: CompanyStore + AttachmentStore,
    C: RenderCache,
{
    /// Assembles a service from its collaborators.
    pub fn new(store: S, cache: C, deriver: ColorDeriver, publisher: StylesheetPublisher) -> Self {
        Self {
            store,
            cache,
            deriver,
            publisher,
        }
    }

    /// Builds the deriver and publisher from configuration.
    pub fn from_config(config: &Config, store: S, cache: C) -> Self {
        Self::new(
            store,
            cache,
            ColorDeriver::new(config.default_slot_values()),
            StylesheetPublisher::new(config.publish.url_base.clone()),
        )
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The render cache hook.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The stylesheet publisher.
    pub fn publisher(&self) -> &StylesheetPublisher {
        &self.publisher
    }

    /// The color deriver.
    pub fn deriver(&self) -> &ColorDeriver {
        &self.deriver
    }

    /// Loads a company.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CompanyNotFound`] for unknown ids.
    pub fn company(&self, id: CompanyId) -> Result<Company> {
        self.store
            .company(id)?
            .ok_or(Error::CompanyNotFound { id })
    }

    /// All companies ordered by id.
    pub fn companies(&self) -> Result<Vec<Company>> {
        Ok(self.store.companies()?)
    }

    /// Creates a company and publishes its stylesheet.
    ///
    /// Colors are derived when a logo is given; otherwise the explicit colors
    /// are used. A company without colors still gets the placeholder
    /// stylesheet.
    pub fn create(&mut self, new: NewCompany) -> Result<Company> {
        let NewCompany { name, logo, colors } = new;
        let logo = logo.filter(|bytes| !bytes.is_empty());

        let mut updates = colors;
        color_set::validate_entries(updates.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        if let Some(bytes) = logo.as_deref() {
            updates.extend(self.deriver.derive(Some(bytes))?);
        }

        let id = self.store.next_company_id()?;
        let mut company = Company::new(id, name);
        company.logo = logo;
        company.colors.merge(&updates);
        self.store.save_company(&company)?;

        if let Err(err) = self.publish_company(&company) {
            warn!(company = %id, error = %err, "Publishing failed, discarding new company");
            if let Err(cleanup) = self.store.remove_company(id) {
                warn!(company = %id, error = %cleanup, "Failed to discard company");
            }
            return Err(err);
        }

        info!(company = %id, name = %company.name, "Created company");
        Ok(company)
    }

    /// Applies a partial update.
    ///
    /// - A new logo recomputes every slot, overriding colors in the same write.
    /// - A removed logo restores the defaults table.
    /// - Explicit colors are stored as given and republished.
    /// - [`WriteOptions::bypass_colors`] stores the write as-is, with no
    ///   recomputation and no republish.
    ///
    /// # Errors
    ///
    /// Fails before anything is stored when the logo cannot be decoded or an
    /// explicit color is invalid. A publish failure restores the previous
    /// record and is returned unchanged.
    pub fn write(
        &mut self,
        id: CompanyId,
        write: CompanyWrite,
        options: WriteOptions,
    ) -> Result<Company> {
        let previous = self.company(id)?;

        let mut updates: BTreeMap<String, String> = write.colors.clone();
        color_set::validate_entries(updates.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        let mut colors_changed = !updates.is_empty();

        if !options.bypass_colors && write.touches_logo() {
            updates.extend(self.deriver.derive(write.new_logo())?);
            colors_changed = true;
        }

        let mut company = previous.clone();
        if let Some(name) = write.name {
            company.name = name;
        }
        if let Some(logo) = write.logo {
            company.logo = logo.filter(|bytes| !bytes.is_empty());
        }
        company.colors.merge(&updates);
        self.store.save_company(&company)?;

        if !options.bypass_colors && colors_changed {
            if let Err(err) = self.publish_company(&company) {
                warn!(company = %id, error = %err, "Publishing failed, restoring previous colors");
                if let Err(restore) = self.store.save_company(&previous) {
                    warn!(company = %id, error = %restore, "Failed to restore company");
                }
                return Err(err);
            }
        }

        Ok(company)
    }

    /// Renders the stylesheet a company would publish now.
    pub fn render(&self, id: CompanyId) -> Result<String> {
        let company = self.company(id)?;
        self.publisher.render(&company.colors)
    }

    /// Re-renders and publishes a company's stylesheet.
    pub fn republish(&mut self, id: CompanyId) -> Result<ResourceHandle> {
        let company = self.company(id)?;
        self.publish_company(&company)
    }

    /// The stylesheet currently published for a company.
    pub fn stylesheet(&self, id: CompanyId) -> Result<Option<Attachment>> {
        self.company(id)?;
        self.publisher.published(&self.store, id)
    }

    /// Deletes a company together with its stylesheet.
    pub fn unlink(&mut self, id: CompanyId) -> Result<Company> {
        let company = self.company(id)?;
        let removed = self.publisher.unpublish(&mut self.store, id)?;
        self.store.remove_company(id)?;
        info!(company = %id, stylesheets = removed, "Deleted company");
        Ok(company)
    }

    fn publish_company(&mut self, company: &Company) -> Result<ResourceHandle> {
        let content = self.publisher.render(&company.colors)?;
        self.publisher
            .publish(&mut self.store, &mut self.cache, company.id, &content)
    }
}
