//! Builds the tag report and the normalized preference model.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::models::{PreferenceModel, TagReport};
use crate::domain::ports::{PreferenceStore, StoreError};
use crate::infrastructure::model_cache::ModelCache;

/// Derives the report and model from current tag statistics and keeps the
/// compressed export up to date.
pub struct ModelBuilder<S: PreferenceStore> {
    store: Arc<S>,
    cache: ModelCache,
}

impl<S: PreferenceStore> ModelBuilder<S> {
    pub fn new(store: Arc<S>, cache: ModelCache) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    /// Rank every tag by dislike ratio, then by number of judgments.
    #[instrument(skip(self))]
    pub async fn build_report(&self) -> Result<TagReport, StoreError> {
        let stats = self.store.list_tag_stats().await?;
        let image_count = self.store.count_decisions().await?;
        Ok(TagReport::from_stats(&stats, image_count))
    }

    /// Normalize the report's scores and write the compressed export.
    ///
    /// A failed write is logged; the in-memory model is still returned.
    #[instrument(skip(self, report), fields(tags = report.entries.len()))]
    pub async fn export_model(&self, report: &TagReport) -> PreferenceModel {
        let model = report.export();
        if let Err(err) = self.cache.save(&model).await {
            warn!(error = %err, "failed to write model export");
        }
        model
    }

    /// Report, export, then reload the model from the export.
    pub async fn refresh(&self) -> Result<(TagReport, PreferenceModel), StoreError> {
        let report = self.build_report().await?;
        let exported = report.export();

        let model = match self.cache.save(&exported).await {
            Ok(()) => self.cache.load().await,
            Err(err) => {
                warn!(error = %err, "failed to write model export, using in-memory model");
                exported
            }
        };

        debug!(
            images = report.image_count,
            tags = model.len(),
            "preference model refreshed"
        );
        Ok((report, model))
    }
}
