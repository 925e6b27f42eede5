//! Stylesheet rendering and publishing.
//!
//! Publishing is an upsert keyed by `(company_id, url)`: the first publish
//! creates a binary `text/scss` attachment, later ones overwrite its content
//! in place. Each successful publish invalidates the render cache once.

use tracing::{debug, info};

use crate::constants::PLACEHOLDER_CONTENT;
use crate::error::Result;
use crate::models::{Attachment, ColorSet, CompanyId, ResourceHandle};
use crate::scss::StylesheetTemplate;
use crate::storage::{AttachmentStore, RenderCache};

/// Renders color sets and keeps one published stylesheet per company.
#[derive(Debug, Clone)]
pub struct StylesheetPublisher {
    url_base: String,
    template: StylesheetTemplate,
}

impl StylesheetPublisher {
    /// Creates a publisher serving stylesheets under `url_base`.
    #[must_use]
    pub fn new(url_base: impl Into<String>) -> Self {
        Self {
            url_base: url_base.into(),
            template: StylesheetTemplate::default(),
        }
    }

    /// Replaces the template.
    #[must_use]
    pub fn with_template(mut self, template: StylesheetTemplate) -> Self {
        self.template = template;
        self
    }

    /// Stylesheet text for a color set.
    ///
    /// An empty set yields [`PLACEHOLDER_CONTENT`] without touching the
    /// template.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TemplateKey`] when a placeholder has no value.
    pub fn render(&self, colors: &ColorSet) -> Result<String> {
        if colors.is_empty() {
            return Ok(PLACEHOLDER_CONTENT.to_string());
        }
        self.template.render(&colors.sanitized())
    }

    /// Deterministic URL of a company's stylesheet.
    ///
    /// # Examples
    ///
    /// ```
    /// use company_colors::models::CompanyId;
    /// use company_colors::services::StylesheetPublisher;
    ///
    /// let publisher = StylesheetPublisher::new("/web_company_color/static/src/scss/");
    /// assert_eq!(
    ///     publisher.resource_url_for(CompanyId(1)),
    ///     "/web_company_color/static/src/scss/custom_colors.1.gen.scss"
    /// );
    /// ```
    #[must_use]
    pub fn resource_url_for(&self, company_id: CompanyId) -> String {
        format!("{}custom_colors.{}.gen.scss", self.url_base, company_id)
    }

    /// Creates or overwrites the company's stylesheet with `content`.
    pub fn publish<S, C>(
        &self,
        store: &mut S,
        cache: &mut C,
        company_id: CompanyId,
        content: &str,
    ) -> Result<ResourceHandle>
    where
        S: AttachmentStore + ?Sized,
        C: RenderCache + ?Sized,
    {
        let url = self.resource_url_for(company_id);

        let (attachment, created) = match store.find_attachment(&url, company_id)? {
            Some(mut existing) => {
                existing.replace_content(&url, content);
                store.update_attachment(&existing)?;
                (existing, false)
            }
            None => {
                let attachment = Attachment::scss(company_id, &url, content);
                store.create_attachment(attachment.clone())?;
                (attachment, true)
            }
        };

        cache.invalidate();
        info!(company = %company_id, url = %url, created, "Published company stylesheet");

        Ok(ResourceHandle {
            id: attachment.id,
            company_id,
            url,
            checksum: attachment.checksum,
            created,
        })
    }

    /// Removes the company's stylesheet; returns how many records went away.
    pub fn unpublish<S>(&self, store: &mut S, company_id: CompanyId) -> Result<usize>
    where
        S: AttachmentStore + ?Sized,
    {
        let url = self.resource_url_for(company_id);
        let removed = store.delete_attachments(&url, company_id)?;
        debug!(company = %company_id, url = %url, removed, "Removed company stylesheet");
        Ok(removed)
    }

    /// The currently published stylesheet of a company.
    pub fn published<S>(&self, store: &S, company_id: CompanyId) -> Result<Option<Attachment>>
    where
        S: AttachmentStore + ?Sized,
    {
        Ok(store.find_attachment(&self.resource_url_for(company_id), company_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_URL_BASE;
    use crate::models::ColorSlot;
    use crate::storage::{MemoryStore, RecordingCache};
    use crate::Error;

    fn publisher() -> StylesheetPublisher {
        StylesheetPublisher::new(DEFAULT_URL_BASE)
    }

    #[test]
    fn test_render_empty_is_placeholder() {
        let publisher = publisher();
        let first = publisher.render(&ColorSet::new()).unwrap();
        let second = publisher.render(&ColorSet::new()).unwrap();
        assert_eq!(first, "// No Web Company Color SCSS Content\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_colors() {
        let mut colors = ColorSet::new();
        colors.set(ColorSlot::PrimaryButtonBorder, "#fff");
        let css = publisher().render(&colors).unwrap();
        assert!(css.contains("border-color: #fff !important;"));
        assert!(css.contains(".btn-primary {"));
    }

    #[test]
    fn test_render_reports_missing_key() {
        let publisher = publisher().with_template(StylesheetTemplate::new("a { color: ${shadow}; }"));
        let colors = ColorSet::from_entries([("navbar-text", "#000")]);
        assert!(matches!(
            publisher.render(&colors).unwrap_err(),
            Error::TemplateKey { .. }
        ));
    }

    #[test]
    fn test_publish_is_idempotent_upsert() {
        let publisher = publisher();
        let mut store = MemoryStore::new();
        let mut cache = RecordingCache::new();
        let id = CompanyId(4);

        let first = publisher.publish(&mut store, &mut cache, id, "one").unwrap();
        let second = publisher.publish(&mut store, &mut cache, id, "two").unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.id, second.id);
        assert_eq!(cache.invalidations(), 2);

        let all = store.attachments().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text(), "two");
        assert_eq!(all[0].url, publisher.resource_url_for(id));
        assert_eq!(all[0].mimetype, "text/scss");
    }

    #[test]
    fn test_unpublish_only_touches_own_resource() {
        let publisher = publisher();
        let mut store = MemoryStore::new();
        let mut cache = RecordingCache::new();
        publisher.publish(&mut store, &mut cache, CompanyId(1), "a").unwrap();
        publisher.publish(&mut store, &mut cache, CompanyId(2), "b").unwrap();

        assert_eq!(publisher.unpublish(&mut store, CompanyId(1)).unwrap(), 1);
        assert_eq!(publisher.unpublish(&mut store, CompanyId(1)).unwrap(), 0);
        assert!(publisher.published(&store, CompanyId(1)).unwrap().is_none());
        assert_eq!(
            publisher.published(&store, CompanyId(2)).unwrap().unwrap().text(),
            "b"
        );
    }
}
