//! Render cache invalidation hook.

use tracing::debug;

/// Downstream cache of compiled assets that depend on published stylesheets.
pub trait RenderCache {
    /// Drops everything compiled from previously published content.
    fn invalidate(&mut self);
}

/// Cache hook that only logs; used when no asset pipeline is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl RenderCache for NoopCache {
    fn invalidate(&mut self) {
        debug!("Render cache invalidation requested (no cache attached)");
    }
}

/// Cache hook counting invalidations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingCache {
    invalidations: usize,
}

impl RecordingCache {
    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of invalidations seen so far.
    #[must_use]
    pub fn invalidations(&self) -> usize {
        self.invalidations
    }
}

impl RenderCache for RecordingCache {
    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

impl<C: RenderCache + ?Sized> RenderCache for &mut C {
    fn invalidate(&mut self) {
        (**self).invalidate();
    }
}
